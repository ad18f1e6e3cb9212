use serde::{Deserialize, Serialize};

use super::Validate;

pub const PROJECTION_YEARS: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenarios {
    pub conservative: Vec<f64>,
    pub base: Vec<f64>,
    pub optimistic: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Methodology {
    #[serde(rename = "priceCAGR")]
    pub price_cagr: f64,
    #[serde(rename = "revenueCAGR")]
    pub revenue_cagr: f64,
    #[serde(rename = "profitCAGR")]
    pub profit_cagr: f64,
    #[serde(rename = "roeStability")]
    pub roe_stability: f64,
    #[serde(rename = "fcfTrend")]
    pub fcf_trend: f64,
    pub fsm: f64,
    #[serde(rename = "adjustedTrend")]
    pub adjusted_trend: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceProjection {
    pub scenarios: Scenarios,
    pub confidence_level: String,
    pub model_type: String,
    pub methodology: Methodology,
    pub explanation: String,
    pub important_note: String,
    pub disclaimer: String,
}

fn check_series(name: &str, xs: &[f64]) -> Result<(), String> {
    if xs.len() != PROJECTION_YEARS {
        return Err(format!(
            "scenarios.{name} must have {PROJECTION_YEARS} points, got {}",
            xs.len()
        ));
    }
    if let Some(bad) = xs.iter().find(|x| !x.is_finite() || **x <= 0.0) {
        return Err(format!("scenarios.{name} contains invalid price {bad}"));
    }
    Ok(())
}

impl Validate for PriceProjection {
    fn validate(&self) -> Result<(), String> {
        check_series("conservative", &self.scenarios.conservative)?;
        check_series("base", &self.scenarios.base)?;
        check_series("optimistic", &self.scenarios.optimistic)?;
        Ok(())
    }
}
