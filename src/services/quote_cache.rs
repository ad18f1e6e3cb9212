use std::time::Duration;

use moka::future::Cache;

use crate::models::Quote;

pub const DEFAULT_MAX_ENTRIES: u64 = 1000;

/// Short-lived in-process cache of successful quote lookups, keyed by the
/// normalized user input. Entries expire after the TTL and the cache never
/// holds more than `max_entries`. A zero TTL disables it.
#[derive(Clone)]
pub struct QuoteCache {
    entries: Option<Cache<String, Quote>>,
}

impl QuoteCache {
    pub fn new(ttl: Duration, max_entries: u64) -> Self {
        if ttl.is_zero() {
            return Self::disabled();
        }

        let entries = Cache::builder()
            .time_to_live(ttl)
            .max_capacity(max_entries)
            .build();

        Self {
            entries: Some(entries),
        }
    }

    pub fn disabled() -> Self {
        Self { entries: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.entries.is_some()
    }

    pub async fn get(&self, key: &str) -> Option<Quote> {
        self.entries.as_ref()?.get(key).await
    }

    pub async fn insert(&self, key: &str, quote: Quote) {
        if let Some(entries) = &self.entries {
            entries.insert(key.to_string(), quote).await;
        }
    }

    /// Live entry count after pending evictions have been applied.
    pub async fn len(&self) -> u64 {
        match &self.entries {
            Some(entries) => {
                entries.run_pending_tasks().await;
                entries.entry_count()
            }
            None => 0,
        }
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
