//! Substitute payloads served when the model is unavailable. Each one has the
//! exact shape of the corresponding success response.

use rand::Rng;

use crate::models::{
    AiExplanation, ComponentScore, Methodology, PriceProjection, RiskAnalysis, RiskComponents,
    RiskLevel, Scenarios, TrendingStock, analysis::ANALYSIS_DISCLAIMER,
};

pub const DEFAULT_PROJECTION_PRICE: f64 = 150.0;

pub fn risk_analysis() -> RiskAnalysis {
    let score: u8 = rand::thread_rng().gen_range(30..60);
    risk_analysis_with_score(score)
}

pub fn risk_analysis_with_score(score: u8) -> RiskAnalysis {
    RiskAnalysis {
        risk_score: score,
        risk_level: RiskLevel::from_score(score),
        analysis: "(Limit Reached) Historical volatility suggests moderate risk levels.".to_string(),
        components: RiskComponents {
            profitability: ComponentScore { score: 75 },
            liquidity: ComponentScore { score: 60 },
            solvency: ComponentScore { score: 80 },
            efficiency: ComponentScore { score: 70 },
            growth: ComponentScore { score: 65 },
        },
        disclaimer: ANALYSIS_DISCLAIMER.to_string(),
    }
}

pub fn explanation() -> AiExplanation {
    AiExplanation {
        summary: "Detailed AI explanation unavailable due to rate limits.".to_string(),
        details: "The system is currently experiencing high load. Key risks likely include general market volatility and sector-specific headwinds common to this industry.".to_string(),
        benefits_data: None,
        benefits: Vec::new(),
    }
}

fn ladder(p: f64, step: f64) -> Vec<f64> {
    (1..=5).map(|year| p * (1.0 + step * year as f64)).collect()
}

/// Straight-line drift off `current_price`; non-positive or missing prices
/// fall back to 150.
pub fn projection(current_price: Option<f64>) -> PriceProjection {
    let p = current_price
        .filter(|p| p.is_finite() && *p > 0.0)
        .unwrap_or(DEFAULT_PROJECTION_PRICE);

    PriceProjection {
        scenarios: Scenarios {
            base: ladder(p, 0.05),
            conservative: ladder(p, 0.02),
            optimistic: ladder(p, 0.10),
        },
        confidence_level: "Medium (Fallback)".to_string(),
        model_type: "Historical Trend (Limit Enforced)".to_string(),
        methodology: Methodology {
            price_cagr: 5.0,
            revenue_cagr: 4.0,
            profit_cagr: 3.0,
            roe_stability: 80.0,
            fcf_trend: 2.0,
            fsm: 1.0,
            adjusted_trend: 4.0,
        },
        explanation: "Due to high traffic/limits, this projection uses a standard historical drift model.".to_string(),
        important_note: "This is a fallback projection. Please try again later for AI-enhanced models.".to_string(),
        disclaimer: "Standard fallback disclaimer.".to_string(),
    }
}

pub fn trending() -> Vec<TrendingStock> {
    let row = |symbol: &str, name: &str, price: f64, change: f64, reason: &str| TrendingStock {
        symbol: symbol.to_string(),
        name: name.to_string(),
        price,
        change,
        reason: reason.to_string(),
    };

    vec![
        row("NVDA", "NVIDIA Corp", 895.40, 3.2, "AI chip dominance continues"),
        row("MSFT", "Microsoft", 425.20, 1.1, "Cloud and AI expansion"),
        row("AAPL", "Apple Inc", 175.50, -0.5, "Stable tech staple"),
        row("TSLA", "Tesla Inc", 180.25, 2.8, "EV market volatility"),
    ]
}
