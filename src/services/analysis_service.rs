use serde::de::DeserializeOwned;

use crate::{
    models::{
        AiExplanation, InputPricePoint, PriceProjection, RiskAnalysis, RiskAssessmentReply,
        RiskSummary, StockData, TrendingStock, Validate,
    },
    AppState,
};

use super::{
    fallback,
    gemini::GenerationError,
    json_extract::{parse_ai_json, AiParseError, Delimiter},
    prompts,
};

#[derive(Debug, thiserror::Error)]
pub enum AiError {
    #[error(transparent)]
    Upstream(#[from] GenerationError),

    #[error(transparent)]
    Parse(#[from] AiParseError),
}

impl AiError {
    pub fn is_quota(&self) -> bool {
        matches!(self, AiError::Upstream(e) if e.is_quota())
    }
}

/// One model round trip: generate once, then extract and validate.
async fn ask<T>(state: &AppState, prompt: &str, delim: Delimiter) -> Result<T, AiError>
where
    T: DeserializeOwned + Validate,
{
    let text = state.ai.generate(prompt).await?;
    Ok(parse_ai_json::<T>(&text, delim)?)
}

pub async fn analyze(state: &AppState, symbol: &str, stock: &StockData) -> Result<RiskAnalysis, AiError> {
    tracing::info!(symbol, "analyzing");
    let prompt = prompts::risk_score(symbol, stock);

    match ask::<RiskAssessmentReply>(state, &prompt, Delimiter::Object).await {
        Ok(reply) => Ok(RiskAnalysis::from(reply)),
        Err(e) if e.is_quota() => {
            tracing::warn!(symbol, error = %e, "falling back to mock analysis due to quota limit");
            Ok(fallback::risk_analysis())
        }
        Err(e) => {
            tracing::error!(symbol, error = %e, "analysis failed");
            Err(e)
        }
    }
}

/// Never fails: any problem yields the static explanation.
pub async fn explain(
    state: &AppState,
    symbol: &str,
    stock: &StockData,
    risk: &RiskSummary,
) -> AiExplanation {
    let prompt = prompts::explanation(symbol, stock, risk);

    match ask::<AiExplanation>(state, &prompt, Delimiter::Object).await {
        Ok(e) => e,
        Err(e) => {
            tracing::warn!(symbol, error = %e, "explain failed, serving static explanation");
            fallback::explanation()
        }
    }
}

pub async fn project(
    state: &AppState,
    symbol: &str,
    current_price: Option<f64>,
    history: &[InputPricePoint],
) -> Result<PriceProjection, AiError> {
    let price = current_price.unwrap_or(fallback::DEFAULT_PROJECTION_PRICE);
    let prompt = prompts::projection(symbol, price, history);

    match ask::<PriceProjection>(state, &prompt, Delimiter::Object).await {
        Ok(p) => Ok(p),
        Err(e) if e.is_quota() => {
            tracing::warn!(symbol, error = %e, "falling back to mock projection due to quota limit");
            Ok(fallback::projection(current_price))
        }
        Err(e) => {
            tracing::error!(symbol, error = %e, "projection failed");
            Err(e)
        }
    }
}

/// Never fails: any problem yields the static list.
pub async fn trending(state: &AppState) -> Vec<TrendingStock> {
    match ask::<Vec<TrendingStock>>(state, &prompts::trending(), Delimiter::Array).await {
        Ok(list) => list,
        Err(e) => {
            tracing::warn!(error = %e, "trending failed, serving static list");
            fallback::trending()
        }
    }
}
