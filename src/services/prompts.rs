use crate::models::{InputPricePoint, RiskSummary, StockData, quote::recent_prices};

fn fmt_prices(xs: &[f64]) -> String {
    serde_json::to_string(xs).unwrap_or_else(|_| "[]".to_string())
}

pub fn risk_score(symbol: &str, stock: &StockData) -> String {
    format!(
        r#"
Evaluate investment risk for {symbol} (Price: {price} {currency}).
Recent closing prices: {recent}

You MUST return a JSON object with these exact keys:
- "riskScore": integer between 0 (Safe) and 100 (High Risk).
- "riskLevel": "Low" (0-30), "Moderate" (31-70), or "High" (71-100).
- "analysis": "One sentence summary of the risk."
- "components": Object with "profitability", "liquidity", "solvency", "efficiency", "growth". Each having a "score" (0-100 where 100 is best/safest).

Example:
{{
  "riskScore": 45,
  "riskLevel": "Moderate",
  "analysis": "Moderate volatility with stable cash flow.",
  "components": {{ "profitability": {{ "score": 75 }}, "liquidity": {{ "score": 60 }}, "solvency": {{ "score": 80 }}, "efficiency": {{ "score": 70 }}, "growth": {{ "score": 65 }} }}
}}
"#,
        price = stock.price_or_zero(),
        currency = stock.currency_or_usd(),
        recent = fmt_prices(&stock.recent_prices(10)),
    )
}

pub fn explanation(symbol: &str, stock: &StockData, risk: &RiskSummary) -> String {
    let score = risk.risk_score.unwrap_or(0.0);
    let level = risk.risk_level.as_deref().unwrap_or("Unknown");

    format!(
        r#"
Provide a professional, 2-paragraph explanation of the investment risk for {symbol}.

Context:
- Risk Score: {score}/100 ({level})
- Current Price: {price} {currency}
- Recent Trend: {recent}

Output JSON:

{{
    "summary": "One concise sentence summarizing the main risk.",
    "details": "A detailed paragraph explaining why the score is {score}, citing specific financial factors (suggested) like volatility, market conditions, or sector headwinds.",
    "benefits_data": {{
        "growth_percentage": "Expected growth, e.g. '8-10% annually'",
        "pe_valuation": "Short comment on the P/E valuation",
        "dividend_5y": "Dividend outlook over 5 years",
        "future_plans": "Key company plans that may drive value"
    }},
    "benefits": ["Up to 4 short strength statements"]
}}
"#,
        price = stock.price_or_zero(),
        currency = stock.currency_or_usd(),
        recent = fmt_prices(&stock.recent_prices(5)),
    )
}

pub fn projection(symbol: &str, current_price: f64, history: &[InputPricePoint]) -> String {
    format!(
        r#"
Generate 3 plausible 5-year price scenarios for {symbol} starting at ${current_price}.
Use historical volatility as a reference. Recent closing prices: {recent}
Each scenario must contain exactly 5 yearly prices.

Return JSON only:
{{
    "scenarios": {{
        "base": [... numbers only ...],
        "conservative": [... numbers only ...],
        "optimistic": [... numbers only ...]
    }},
    "confidence_level": "High/Medium/Low",
    "model_type": "Gemini Volatility Model",
    "methodology": {{
        "priceCAGR": 5.5,
        "revenueCAGR": 4.2,
        "profitCAGR": 3.8,
        "roeStability": 85,
        "fcfTrend": 2.5,
        "fsm": 1.2,
        "adjustedTrend": 4.5
    }},
    "explanation": "Brief explanation of why these numbers were chosen.",
    "important_note": "Key factor influencing this projection.",
    "disclaimer": "Standard investment disclaimer."
}}
"#,
        recent = fmt_prices(&recent_prices(history, 30)),
    )
}

pub fn trending() -> String {
    r#"
List 4 currently trending or popular US stocks that are interesting for investors right now.
Focus on major movers or popular tech/growth names.

Return ONLY a valid JSON array of objects:
[
    {
        "symbol": "TICKER",
        "name": "Company Name",
        "price": 123.45 (number),
        "change": 2.5 (number, percentage change),
        "reason": "Short reason why it's trending (max 10 words)"
    }
]
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompts_embed_caller_figures() {
        let stock: StockData = serde_json::from_value(serde_json::json!({
            "price": 187.5,
            "currency": "USD",
            "prices": [{"price": 1.0}, {"price": 2.0}, {"price": 3.0}, {"price": 4.0}, {"price": 5.0}, {"price": 6.0}]
        }))
        .unwrap();

        let p = risk_score("AAPL", &stock);
        assert!(p.contains("AAPL (Price: 187.5 USD)"));
        assert!(p.contains("\"riskScore\": 45"));

        let risk = RiskSummary {
            risk_score: Some(62.0),
            risk_level: Some("Moderate".into()),
        };
        let e = explanation("AAPL", &stock, &risk);
        assert!(e.contains("Risk Score: 62/100 (Moderate)"));
        assert!(e.contains("Recent Trend: [2.0,3.0,4.0,5.0,6.0]"));

        let pr = projection("AAPL", 150.0, &stock.prices);
        assert!(pr.contains("starting at $150."));
        assert!(pr.contains("exactly 5 yearly prices"));
    }
}
