use serde::{Deserialize, Serialize};

use super::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenefitsData {
    #[serde(default)]
    pub growth_percentage: String,
    #[serde(default)]
    pub pe_valuation: String,
    #[serde(default)]
    pub dividend_5y: String,
    #[serde(default)]
    pub future_plans: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiExplanation {
    pub summary: String,
    pub details: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub benefits_data: Option<BenefitsData>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub benefits: Vec<String>,
}

impl Validate for AiExplanation {
    fn validate(&self) -> Result<(), String> {
        if self.summary.trim().is_empty() {
            return Err("summary must not be empty".into());
        }
        if self.details.trim().is_empty() {
            return Err("details must not be empty".into());
        }
        Ok(())
    }
}
