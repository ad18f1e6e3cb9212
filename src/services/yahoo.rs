use async_trait::async_trait;
use chrono::DateTime;
use reqwest::{Client, StatusCode, Url};
use serde::{Deserialize, Serialize};

use crate::models::{PricePoint, Quote, MAX_PRICE_POINTS};

const USER_AGENT: &str = "Mozilla/5.0";

#[derive(Debug, thiserror::Error)]
pub enum QuoteError {
    #[error("quote request failed: {status} {body}")]
    Http { status: u16, body: String },

    #[error("quote transport error: {0}")]
    Transport(String),

    #[error("unexpected quote payload: {0}")]
    Decode(String),
}

/// Market-data adapter. `Ok(None)` means the upstream does not know the
/// symbol; every other failure is an error.
#[async_trait]
pub trait QuoteSource: Send + Sync {
    /// Daily closes for roughly the last month.
    async fn chart(&self, symbol: &str) -> Result<Option<Quote>, QuoteError>;

    /// Best matching ticker for a free-text company name.
    async fn search(&self, query: &str) -> Result<Option<String>, QuoteError>;
}

#[derive(Clone)]
pub struct YahooClient {
    http: Client,
    base_url: String,
}

impl YahooClient {
    pub fn new(base_url: String) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// `{base}/v8/finance/chart/{symbol}` with the symbol encoded as a single
    /// path segment, so `/`, `?` or `#` in user input stay inside it.
    pub fn chart_url(&self, symbol: &str) -> Result<Url, QuoteError> {
        let mut url = Url::parse(&self.base_url).map_err(|e| QuoteError::Transport(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| QuoteError::Transport(format!("unusable base URL: {}", self.base_url)))?
            .pop_if_empty()
            .extend(["v8", "finance", "chart", symbol]);
        Ok(url)
    }
}

#[async_trait]
impl QuoteSource for YahooClient {
    async fn chart(&self, symbol: &str) -> Result<Option<Quote>, QuoteError> {
        let url = self.chart_url(symbol)?;
        let res = self
            .http
            .get(url)
            .query(&[("interval", "1d"), ("range", "1mo")])
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .send()
            .await
            .map_err(|e| QuoteError::Transport(e.to_string()))?;

        if res.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        if !res.status().is_success() {
            let status = res.status();
            let body = res.text().await.unwrap_or_default();
            return Err(QuoteError::Http {
                status: status.as_u16(),
                body,
            });
        }

        let body = res
            .json::<ChartResponse>()
            .await
            .map_err(|e| QuoteError::Decode(e.to_string()))?;

        Ok(body
            .chart
            .result
            .and_then(|r| r.into_iter().next())
            .map(ChartResult::into_quote))
    }

    async fn search(&self, query: &str) -> Result<Option<String>, QuoteError> {
        let url = format!("{}/v1/finance/search", self.base_url);
        let res = self
            .http
            .get(&url)
            .query(&[("q", query), ("quotesCount", "1"), ("newsCount", "0")])
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .send()
            .await
            .map_err(|e| QuoteError::Transport(e.to_string()))?;

        if !res.status().is_success() {
            let status = res.status();
            let body = res.text().await.unwrap_or_default();
            return Err(QuoteError::Http {
                status: status.as_u16(),
                body,
            });
        }

        let body = res
            .json::<SearchResponse>()
            .await
            .map_err(|e| QuoteError::Decode(e.to_string()))?;

        Ok(body
            .quotes
            .into_iter()
            .filter_map(|q| q.symbol)
            .find(|s| !s.trim().is_empty()))
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ChartResponse {
    pub chart: ChartEnvelope,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ChartEnvelope {
    #[serde(default)]
    pub result: Option<Vec<ChartResult>>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ChartResult {
    pub meta: ChartMeta,
    #[serde(default)]
    pub timestamp: Vec<i64>,
    #[serde(default)]
    pub indicators: Indicators,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartMeta {
    pub symbol: String,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub regular_market_price: Option<f64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Indicators {
    #[serde(default)]
    pub quote: Vec<QuoteIndicator>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct QuoteIndicator {
    // null on days without a close
    #[serde(default)]
    pub close: Vec<Option<f64>>,
}

impl ChartResult {
    /// Flattens the chart into a quote: null closes are skipped, a repeated
    /// day keeps its latest close, earlier days out of order are dropped, and
    /// only the most recent points are kept.
    pub fn into_quote(self) -> Quote {
        let closes = self
            .indicators
            .quote
            .into_iter()
            .next()
            .map(|q| q.close)
            .unwrap_or_default();

        let mut prices: Vec<PricePoint> = Vec::with_capacity(self.timestamp.len());
        for (ts, close) in self.timestamp.iter().zip(closes) {
            let (Some(close), Some(dt)) = (close, DateTime::from_timestamp(*ts, 0)) else {
                continue;
            };
            let date = dt.format("%Y-%m-%d").to_string();

            match prices.last_mut() {
                Some(last) if last.date == date => last.price = close,
                Some(last) if last.date > date => {}
                _ => prices.push(PricePoint { date, price: close }),
            }
        }

        let skip = prices.len().saturating_sub(MAX_PRICE_POINTS);
        let prices: Vec<PricePoint> = prices.into_iter().skip(skip).collect();

        let price = self
            .meta
            .regular_market_price
            .or_else(|| prices.last().map(|p| p.price))
            .unwrap_or(0.0);

        Quote {
            symbol: self.meta.symbol,
            price,
            currency: self.meta.currency.unwrap_or_else(|| "USD".to_string()),
            prices,
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub quotes: Vec<SearchItem>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct SearchItem {
    #[serde(default)]
    pub symbol: Option<String>,
}
