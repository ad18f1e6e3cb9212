use crate::{models::Quote, AppState};

use super::yahoo::QuoteError;

#[derive(Debug, thiserror::Error)]
pub enum StockError {
    #[error("Company \"{0}\" not found. Try using the exact ticker symbol (e.g., AAPL).")]
    NotFound(String),

    #[error(transparent)]
    Upstream(#[from] QuoteError),
}

/// Resolve a ticker or company name to a quote.
///
/// - direct chart lookup on the uppercased input
/// - on not-found, one name search and one retry with its first symbol
/// - a failing search counts as not-found
/// - successful results are cached per input for the configured TTL
pub async fn fetch_quote(state: &AppState, input: &str) -> Result<Quote, StockError> {
    let symbol = input.trim().to_uppercase();
    if symbol.is_empty() {
        return Err(StockError::NotFound(symbol));
    }

    if let Some(hit) = state.quote_cache.get(&symbol).await {
        tracing::debug!(%symbol, "quote cache hit");
        return Ok(hit);
    }

    tracing::info!(%symbol, "fetching quote");

    let quote = match state.quotes.chart(&symbol).await? {
        Some(q) => Some(q),
        None => {
            tracing::info!(%symbol, "direct lookup failed, searching for company name");
            match state.quotes.search(&symbol).await {
                Ok(Some(found)) => {
                    tracing::info!(%symbol, %found, "resolved company name");
                    state.quotes.chart(&found).await?
                }
                Ok(None) => None,
                Err(e) => {
                    tracing::warn!(%symbol, error = %e, "search API failed");
                    None
                }
            }
        }
    };

    match quote {
        Some(q) => {
            state.quote_cache.insert(&symbol, q.clone()).await;
            Ok(q)
        }
        None => Err(StockError::NotFound(symbol)),
    }
}
