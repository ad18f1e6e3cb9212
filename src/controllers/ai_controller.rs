use axum::{extract::State, Json};
use serde::Deserialize;

use crate::{
    error::{ApiError, ApiJson, ApiResult},
    models::{
        quote::number_input, AiExplanation, InputPricePoint, PriceProjection, RiskAnalysis,
        RiskSummary, StockData, TrendingStock,
    },
    services::analysis_service,
    AppState,
};

fn required_symbol(symbol: &str) -> ApiResult<String> {
    let s = symbol.trim().to_uppercase();
    if s.is_empty() {
        return Err(ApiError::bad_request("Symbol is required"));
    }
    Ok(s)
}

// ---------------- ANALYZE ----------------

#[derive(Deserialize)]
pub struct AnalyzeBody {
    #[serde(default)]
    pub symbol: String,
    #[serde(default, rename = "stockData")]
    pub stock_data: StockData,
}

pub async fn analyze(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<AnalyzeBody>,
) -> ApiResult<Json<RiskAnalysis>> {
    let symbol = required_symbol(&body.symbol)?;

    let analysis = analysis_service::analyze(&state, &symbol, &body.stock_data)
        .await
        .map_err(|e| ApiError::internal_with("AI Analysis Failed", e))?;

    Ok(Json(analysis))
}

// ---------------- EXPLAIN ----------------

#[derive(Deserialize)]
pub struct ExplainBody {
    #[serde(default)]
    pub symbol: String,
    #[serde(default, rename = "stockData")]
    pub stock_data: StockData,
    #[serde(default, rename = "riskAnalysis")]
    pub risk_analysis: RiskSummary,
}

pub async fn explain(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<ExplainBody>,
) -> Json<AiExplanation> {
    let symbol = body.symbol.trim().to_uppercase();
    Json(analysis_service::explain(&state, &symbol, &body.stock_data, &body.risk_analysis).await)
}

// ---------------- PROJECTION ----------------

#[derive(Deserialize)]
pub struct ProjectionBody {
    #[serde(default)]
    pub symbol: String,
    #[serde(
        default,
        rename = "currentPrice",
        deserialize_with = "number_input::deserialize_option_f64"
    )]
    pub current_price: Option<f64>,
    #[serde(default, rename = "historicalPrices")]
    pub historical_prices: Vec<InputPricePoint>,
}

pub async fn projection(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<ProjectionBody>,
) -> ApiResult<Json<PriceProjection>> {
    let symbol = required_symbol(&body.symbol)?;

    let projection =
        analysis_service::project(&state, &symbol, body.current_price, &body.historical_prices)
            .await
            .map_err(|e| ApiError::internal_with("Failed to generate projection", e))?;

    Ok(Json(projection))
}

// ---------------- TRENDING ----------------

pub async fn trending(State(state): State<AppState>) -> Json<Vec<TrendingStock>> {
    Json(analysis_service::trending(&state).await)
}
