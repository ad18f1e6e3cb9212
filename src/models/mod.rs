pub mod user;
pub mod quote;
pub mod analysis;
pub mod explanation;
pub mod projection;
pub mod trending;

pub use user::{NewUser, Plan, PublicUser, User, HISTORY_LIMIT};
pub use quote::{InputPricePoint, PricePoint, Quote, StockData, MAX_PRICE_POINTS};
pub use analysis::{ComponentScore, RiskAnalysis, RiskAssessmentReply, RiskComponents, RiskLevel, RiskSummary};
pub use explanation::{AiExplanation, BenefitsData};
pub use projection::{Methodology, PriceProjection, Scenarios, PROJECTION_YEARS};
pub use trending::TrendingStock;

/// Domain checks run on model output after it deserialized cleanly.
pub trait Validate {
    fn validate(&self) -> Result<(), String>;
}
