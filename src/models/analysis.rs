use std::fmt;

use serde::{Deserialize, Serialize};

use super::Validate;

pub const ANALYSIS_DISCLAIMER: &str = "This analysis is generated by AI (Gemini) and utilizes market data. It is for educational purposes only.";

/// Categorical risk band. One banding is used everywhere:
/// 0-30 Low, 31-70 Moderate, 71-100 High.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
}

impl RiskLevel {
    pub fn from_score(score: u8) -> Self {
        match score {
            0..=30 => RiskLevel::Low,
            31..=70 => RiskLevel::Moderate,
            _ => RiskLevel::High,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Moderate => "Moderate",
            RiskLevel::High => "High",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComponentScore {
    pub score: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskComponents {
    pub profitability: ComponentScore,
    pub liquidity: ComponentScore,
    pub solvency: ComponentScore,
    pub efficiency: ComponentScore,
    pub growth: ComponentScore,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskAnalysis {
    pub risk_score: u8,
    pub risk_level: RiskLevel,
    pub analysis: String,
    pub components: RiskComponents,
    pub disclaimer: String,
}

// ---------------- model reply ----------------

#[derive(Debug, Clone, Deserialize)]
pub struct ComponentReply {
    pub score: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ComponentsReply {
    pub profitability: ComponentReply,
    pub liquidity: ComponentReply,
    pub solvency: ComponentReply,
    pub efficiency: ComponentReply,
    pub growth: ComponentReply,
}

/// What the score prompt asks the model to return. The model's own
/// `riskLevel` is accepted but not trusted.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskAssessmentReply {
    pub risk_score: f64,
    #[serde(default)]
    pub risk_level: Option<String>,
    pub analysis: String,
    pub components: ComponentsReply,
}

fn check_score(name: &str, v: f64) -> Result<(), String> {
    if !v.is_finite() || !(0.0..=100.0).contains(&v) {
        return Err(format!("{name} must be within 0..=100, got {v}"));
    }
    Ok(())
}

fn to_score(v: f64) -> u8 {
    v.round().clamp(0.0, 100.0) as u8
}

impl Validate for RiskAssessmentReply {
    fn validate(&self) -> Result<(), String> {
        check_score("riskScore", self.risk_score)?;
        let c = &self.components;
        check_score("components.profitability", c.profitability.score)?;
        check_score("components.liquidity", c.liquidity.score)?;
        check_score("components.solvency", c.solvency.score)?;
        check_score("components.efficiency", c.efficiency.score)?;
        check_score("components.growth", c.growth.score)?;
        if self.analysis.trim().is_empty() {
            return Err("analysis must not be empty".into());
        }
        Ok(())
    }
}

impl From<RiskAssessmentReply> for RiskAnalysis {
    fn from(r: RiskAssessmentReply) -> Self {
        let score = to_score(r.risk_score);
        let c = r.components;
        RiskAnalysis {
            risk_score: score,
            risk_level: RiskLevel::from_score(score),
            analysis: r.analysis.trim().to_string(),
            components: RiskComponents {
                profitability: ComponentScore { score: to_score(c.profitability.score) },
                liquidity: ComponentScore { score: to_score(c.liquidity.score) },
                solvency: ComponentScore { score: to_score(c.solvency.score) },
                efficiency: ComponentScore { score: to_score(c.efficiency.score) },
                growth: ComponentScore { score: to_score(c.growth.score) },
            },
            disclaimer: ANALYSIS_DISCLAIMER.to_string(),
        }
    }
}

/// The figures `/api/explain` receives about a previous analysis.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskSummary {
    #[serde(default)]
    pub risk_score: Option<f64>,
    #[serde(default)]
    pub risk_level: Option<String>,
}
