use serde::{Deserialize, Serialize};

use super::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendingStock {
    pub symbol: String,
    pub name: String,
    pub price: f64,
    // percent
    pub change: f64,
    pub reason: String,
}

impl Validate for Vec<TrendingStock> {
    fn validate(&self) -> Result<(), String> {
        if self.is_empty() {
            return Err("trending list is empty".into());
        }
        if let Some(s) = self.iter().find(|s| s.symbol.trim().is_empty()) {
            return Err(format!("trending entry without symbol: {}", s.name));
        }
        Ok(())
    }
}
