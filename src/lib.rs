//! Library entrypoint for the CapitalCare backend.
//!
//! Kept separate from `main.rs` so integration tests under `tests/` can build
//! the router around their own `AppState`.

use std::{sync::Arc, time::Duration};

pub mod config;
pub mod error;
pub mod models;

#[path = "middleware/auth.rs"]
pub mod auth;

pub mod services;

pub mod controllers;
pub mod routes;

use services::{
    db_init,
    gemini::{GeminiClient, GeminiConfig, TextGenerator},
    quote_cache::QuoteCache,
    user_store::{MemoryUserStore, MongoUserStore, UserStore},
    yahoo::{QuoteSource, YahooClient},
};

#[derive(Clone)]
pub struct AppState {
    pub settings: config::Settings,
    pub users: Arc<dyn UserStore>,
    pub quotes: Arc<dyn QuoteSource>,
    pub quote_cache: QuoteCache,
    pub ai: Arc<dyn TextGenerator>,
}

impl AppState {
    /// Wires the production collaborators. Index creation failures are
    /// logged, not fatal, so the API still serves quotes and AI routes while
    /// the database is unreachable.
    pub async fn from_settings(settings: config::Settings) -> Result<Self, String> {
        let users: Arc<dyn UserStore> = if settings.uses_memory_store() {
            tracing::warn!("MONGODB_URI=memory: users are kept in process memory only");
            Arc::new(MemoryUserStore::new())
        } else {
            let db = db_init::connect(&settings.mongodb_uri, &settings.mongodb_db).await?;
            if let Err(e) = db_init::ensure_indexes(&db).await {
                tracing::error!(error = %e, "could not ensure MongoDB indexes");
            }
            Arc::new(MongoUserStore::new(db))
        };

        let ai = GeminiClient::new(GeminiConfig::from_settings(&settings)).map_err(|e| e.to_string())?;
        let quotes = YahooClient::new(settings.yahoo_base_url.clone());
        let quote_cache = QuoteCache::new(
            Duration::from_secs(settings.quote_cache_ttl_secs),
            settings.quote_cache_max_entries,
        );

        Ok(Self {
            settings,
            users,
            quotes: Arc::new(quotes),
            quote_cache,
            ai: Arc::new(ai),
        })
    }
}
