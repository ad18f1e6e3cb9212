mod common;

use axum::http::StatusCode;
use common::{test_app, FakeQuotes, ScriptedAi};
use serde_json::json;

fn analyze_body() -> serde_json::Value {
    json!({
        "symbol": "AAPL",
        "stockData": { "price": 187.2, "currency": "USD", "prices": [{ "date": "2024-01-02", "close": 185.0 }] }
    })
}

// ---------------- analyze ----------------

#[tokio::test]
async fn analyze_returns_validated_analysis_with_derived_level() {
    let reply = r#"Here is the assessment:
```json
{"riskScore": 30, "riskLevel": "Moderate", "analysis": "Stable large cap.",
 "components": {"profitability": {"score": 90}, "liquidity": {"score": 70}, "solvency": {"score": 85}, "efficiency": {"score": 80}, "growth": {"score": 60}}}
```"#;
    let app = test_app(ScriptedAi::text(reply), FakeQuotes::default());

    let (status, body) = app.post("/api/analyze", analyze_body()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["riskScore"], 30);
    // 30 is Low under the single 0-30/31-70/71-100 banding, whatever the model said
    assert_eq!(body["riskLevel"], "Low");
    assert_eq!(body["analysis"], "Stable large cap.");
    assert_eq!(body["components"]["profitability"]["score"], 90);
    assert!(body["disclaimer"].as_str().unwrap().contains("educational"));
    assert_eq!(app.ai.calls(), 1);
}

#[tokio::test]
async fn analyze_quota_error_serves_randomized_fallback() {
    let app = test_app(ScriptedAi::quota(), FakeQuotes::default());

    let (status, body) = app.post("/api/analyze", analyze_body()).await;
    assert_eq!(status, StatusCode::OK);

    let score = body["riskScore"].as_u64().unwrap();
    assert!((30..60).contains(&score));
    assert!(body["analysis"].as_str().unwrap().starts_with("(Limit Reached)"));
    assert_eq!(body["components"]["solvency"]["score"], 80);
    // attempted exactly once, no retry
    assert_eq!(app.ai.calls(), 1);
}

#[tokio::test]
async fn analyze_other_upstream_error_is_500() {
    let app = test_app(ScriptedAi::fail(), FakeQuotes::default());

    let (status, body) = app.post("/api/analyze", analyze_body()).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "AI Analysis Failed");
}

#[tokio::test]
async fn analyze_malformed_model_output_is_500() {
    let app = test_app(ScriptedAi::text("{riskScore: forty-five}"), FakeQuotes::default());

    let (status, body) = app.post("/api/analyze", analyze_body()).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["details"].as_str().unwrap().contains("malformed JSON"));
}

#[tokio::test]
async fn analyze_schema_mismatch_is_reported_separately() {
    let app = test_app(ScriptedAi::text(r#"{"riskScore": 45}"#), FakeQuotes::default());

    let (status, body) = app.post("/api/analyze", analyze_body()).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["details"].as_str().unwrap().contains("unexpected JSON shape"));
}

#[tokio::test]
async fn analyze_requires_symbol() {
    let app = test_app(ScriptedAi::fail(), FakeQuotes::default());

    let (status, body) = app.post("/api/analyze", json!({ "stockData": {} })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Symbol is required");
    assert_eq!(app.ai.calls(), 0);
}

// ---------------- explain ----------------

#[tokio::test]
async fn explain_error_serves_static_fallback_with_200() {
    let app = test_app(ScriptedAi::fail(), FakeQuotes::default());

    let (status, body) = app
        .post(
            "/api/explain",
            json!({ "symbol": "AAPL", "stockData": {}, "riskAnalysis": { "riskScore": 45, "riskLevel": "Moderate" } }),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["summary"], "Detailed AI explanation unavailable due to rate limits.");
    assert!(body["details"].as_str().unwrap().starts_with("The system is currently experiencing high load."));
    assert!(body.get("benefits").is_none());
}

#[tokio::test]
async fn explain_passes_through_model_explanation() {
    let reply = r#"{"summary": "Concentration risk.", "details": "Most revenue comes from one product.",
        "benefits_data": {"growth_percentage": "8%", "pe_valuation": "Fair", "dividend_5y": "Rising", "future_plans": "Services"},
        "benefits": ["Strong brand", "Cash rich"]}"#;
    let app = test_app(ScriptedAi::text(reply), FakeQuotes::default());

    let (status, body) = app.post("/api/explain", json!({ "symbol": "AAPL" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["summary"], "Concentration risk.");
    assert_eq!(body["benefits_data"]["pe_valuation"], "Fair");
    assert_eq!(body["benefits"][1], "Cash rich");
}

// ---------------- projection ----------------

#[tokio::test]
async fn projection_quota_error_serves_ascending_fallback() {
    let app = test_app(ScriptedAi::quota(), FakeQuotes::default());

    let (status, body) = app
        .post("/api/projection", json!({ "symbol": "AAPL", "currentPrice": 150, "historicalPrices": [] }))
        .await;
    assert_eq!(status, StatusCode::OK);

    let base: Vec<f64> = body["scenarios"]["base"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_f64().unwrap())
        .collect();
    assert_eq!(base.len(), 5);
    assert!(base.iter().all(|p| *p > 150.0));
    assert!(base.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(body["confidence_level"], "Medium (Fallback)");
    assert_eq!(body["methodology"]["priceCAGR"], 5.0);
}

#[tokio::test]
async fn projection_other_error_is_500() {
    let app = test_app(ScriptedAi::fail(), FakeQuotes::default());

    let (status, body) = app
        .post("/api/projection", json!({ "symbol": "AAPL", "currentPrice": 150 }))
        .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Failed to generate projection");
}

#[tokio::test]
async fn projection_rejects_wrong_point_count_from_model() {
    let reply = r#"{"scenarios": {"base": [1,2,3], "conservative": [1,2,3,4,5], "optimistic": [1,2,3,4,5]},
        "confidence_level": "Low", "model_type": "m",
        "methodology": {"priceCAGR": 1, "revenueCAGR": 1, "profitCAGR": 1, "roeStability": 1, "fcfTrend": 1, "fsm": 1, "adjustedTrend": 1},
        "explanation": "e", "important_note": "n", "disclaimer": "d"}"#;
    let app = test_app(ScriptedAi::text(reply), FakeQuotes::default());

    let (status, _) = app
        .post("/api/projection", json!({ "symbol": "AAPL", "currentPrice": 150 }))
        .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

// ---------------- trending ----------------

#[tokio::test]
async fn trending_failure_serves_static_list() {
    let app = test_app(ScriptedAi::quota(), FakeQuotes::default());

    let (status, body) = app.get("/api/trending").await;
    assert_eq!(status, StatusCode::OK);
    let symbols: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["symbol"].as_str().unwrap())
        .collect();
    assert_eq!(symbols, vec!["NVDA", "MSFT", "AAPL", "TSLA"]);
}

#[tokio::test]
async fn trending_parses_array_out_of_prose() {
    let reply = r#"Sure, here are today's movers: [{"symbol": "AMD", "name": "AMD", "price": 160.1, "change": 4.2, "reason": "New accelerators"}] Let me know!"#;
    let app = test_app(ScriptedAi::text(reply), FakeQuotes::default());

    let (status, body) = app.get("/api/trending").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["symbol"], "AMD");
    assert_eq!(body.as_array().unwrap().len(), 1);
}

// ---------------- request bodies ----------------

#[tokio::test]
async fn analyze_accepts_numeric_string_prices() {
    let reply = r#"{"riskScore": 45, "riskLevel": "Moderate", "analysis": "ok",
        "components": {"profitability": {"score": 50}, "liquidity": {"score": 50}, "solvency": {"score": 50}, "efficiency": {"score": 50}, "growth": {"score": 50}}}"#;
    let app = test_app(ScriptedAi::text(reply), FakeQuotes::default());

    let (status, body) = app
        .post(
            "/api/analyze",
            json!({ "symbol": "AAPL", "stockData": { "price": "187.5", "prices": [{ "date": "2024-01-02", "close": "185" }] } }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["riskLevel"], "Moderate");
}

#[tokio::test]
async fn analyze_non_numeric_price_is_json_400() {
    let app = test_app(ScriptedAi::fail(), FakeQuotes::default());

    let (status, body) = app
        .post("/api/analyze", json!({ "symbol": "AAPL", "stockData": { "price": "lots" } }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("invalid number"));
    assert_eq!(app.ai.calls(), 0);
}

#[tokio::test]
async fn projection_accepts_numeric_string_current_price() {
    let app = test_app(ScriptedAi::quota(), FakeQuotes::default());

    let (status, body) = app
        .post("/api/projection", json!({ "symbol": "AAPL", "currentPrice": "200" }))
        .await;
    assert_eq!(status, StatusCode::OK);
    let first = body["scenarios"]["base"][0].as_f64().unwrap();
    assert!((first - 210.0).abs() < 1e-9);
}
