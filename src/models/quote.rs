use serde::{Deserialize, Serialize};

pub const MAX_PRICE_POINTS: usize = 30;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    // YYYY-MM-DD
    pub date: String,
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub symbol: String,
    pub price: f64,
    pub currency: String,
    pub prices: Vec<PricePoint>,
}

/// Price figures a client echoes back to the AI endpoints. Every field is
/// optional because clients send partial data; points may use `close`
/// instead of `price`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct StockData {
    #[serde(default, deserialize_with = "number_input::deserialize_option_f64")]
    pub price: Option<f64>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub prices: Vec<InputPricePoint>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct InputPricePoint {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(
        default,
        alias = "close",
        deserialize_with = "number_input::deserialize_option_f64"
    )]
    pub price: Option<f64>,
}

impl StockData {
    pub fn price_or_zero(&self) -> f64 {
        self.price.unwrap_or(0.0)
    }

    pub fn currency_or_usd(&self) -> &str {
        self.currency.as_deref().unwrap_or("USD")
    }

    /// Last `n` prices, missing values as 0.
    pub fn recent_prices(&self, n: usize) -> Vec<f64> {
        recent_prices(&self.prices, n)
    }
}

pub fn recent_prices(points: &[InputPricePoint], n: usize) -> Vec<f64> {
    let skip = points.len().saturating_sub(n);
    points
        .iter()
        .skip(skip)
        .map(|p| p.price.unwrap_or(0.0))
        .collect()
}

/// Prices sent by clients arrive as JSON numbers or numeric strings.
pub mod number_input {
    use serde::{Deserialize, Deserializer, de::Error};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberInput {
        Number(f64),
        String(String),
        Null,
    }

    /// Number or numeric string; `null` and blank strings are `None`.
    pub fn deserialize_option_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<NumberInput>::deserialize(deserializer)? {
            None | Some(NumberInput::Null) => Ok(None),
            Some(NumberInput::Number(n)) => Ok(Some(n)),
            Some(NumberInput::String(s)) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return Ok(None);
                }
                trimmed
                    .parse::<f64>()
                    .ok()
                    .filter(|n| n.is_finite())
                    .map(Some)
                    .ok_or_else(|| D::Error::custom(format!("invalid number '{s}'")))
            }
        }
    }
}
