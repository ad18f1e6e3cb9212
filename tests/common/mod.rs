#![allow(dead_code)]

use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
    time::Duration,
};

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use capitalcare::{
    config::Settings,
    models::{PricePoint, Quote},
    routes,
    services::{
        gemini::{GenerationError, TextGenerator},
        quote_cache::QuoteCache,
        user_store::MemoryUserStore,
        yahoo::{QuoteError, QuoteSource},
    },
    AppState,
};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

pub const JWT_SECRET: &str = "test-secret";

pub fn settings() -> Settings {
    Settings {
        mongodb_uri: "memory".into(),
        mongodb_db: "capital-care-test".into(),
        host: "127.0.0.1".into(),
        port: 0,
        jwt_secret: JWT_SECRET.into(),
        jwt_ttl_hours: 24,
        bcrypt_cost: 4,
        gemini_api_key: "test-key".into(),
        gemini_model: "gemini-2.5-flash".into(),
        gemini_base_url: "http://127.0.0.1:9".into(),
        gemini_timeout_secs: None,
        yahoo_base_url: "http://127.0.0.1:9".into(),
        quote_cache_ttl_secs: 60,
        quote_cache_max_entries: 100,
    }
}

// ---------------- AI double ----------------

pub enum Reply {
    Text(String),
    Quota,
    Fail,
}

pub struct ScriptedAi {
    reply: Reply,
    pub calls: AtomicUsize,
}

impl ScriptedAi {
    pub fn text(s: &str) -> Self {
        Self { reply: Reply::Text(s.to_string()), calls: AtomicUsize::new(0) }
    }

    pub fn quota() -> Self {
        Self { reply: Reply::Quota, calls: AtomicUsize::new(0) }
    }

    pub fn fail() -> Self {
        Self { reply: Reply::Fail, calls: AtomicUsize::new(0) }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextGenerator for ScriptedAi {
    async fn generate(&self, _prompt: &str) -> Result<String, GenerationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.reply {
            Reply::Text(s) => Ok(s.clone()),
            Reply::Quota => Err(GenerationError::RateLimited {
                status: 429,
                body: "Quota exceeded".into(),
            }),
            Reply::Fail => Err(GenerationError::Transport("connection reset".into())),
        }
    }
}

// ---------------- quote double ----------------

#[derive(Default)]
pub struct FakeQuotes {
    pub charts: HashMap<String, Quote>,
    pub names: HashMap<String, String>,
    pub chart_fails: bool,
    pub search_fails: bool,
    pub chart_calls: AtomicUsize,
    pub search_calls: AtomicUsize,
}

impl FakeQuotes {
    pub fn with_chart(mut self, quote: Quote) -> Self {
        self.charts.insert(quote.symbol.clone(), quote);
        self
    }

    pub fn with_name(mut self, name: &str, symbol: &str) -> Self {
        self.names.insert(name.to_string(), symbol.to_string());
        self
    }
}

#[async_trait]
impl QuoteSource for FakeQuotes {
    async fn chart(&self, symbol: &str) -> Result<Option<Quote>, QuoteError> {
        self.chart_calls.fetch_add(1, Ordering::SeqCst);
        if self.chart_fails {
            return Err(QuoteError::Http { status: 502, body: "bad gateway".into() });
        }
        Ok(self.charts.get(symbol).cloned())
    }

    async fn search(&self, query: &str) -> Result<Option<String>, QuoteError> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        if self.search_fails {
            return Err(QuoteError::Transport("timed out".into()));
        }
        Ok(self.names.get(query).cloned())
    }
}

pub fn sample_quote(symbol: &str, days: usize) -> Quote {
    let prices = (0..days)
        .map(|i| PricePoint {
            date: format!("2024-{:02}-{:02}", 1 + i / 28, 1 + i % 28),
            price: 100.0 + i as f64,
        })
        .collect();
    Quote {
        symbol: symbol.to_string(),
        price: 100.0 + days as f64,
        currency: "USD".into(),
        prices,
    }
}

// ---------------- harness ----------------

pub struct TestApp {
    pub router: Router,
    pub users: Arc<MemoryUserStore>,
    pub ai: Arc<ScriptedAi>,
    pub quotes: Arc<FakeQuotes>,
}

pub fn test_app(ai: ScriptedAi, quotes: FakeQuotes) -> TestApp {
    let users = Arc::new(MemoryUserStore::new());
    let ai = Arc::new(ai);
    let quotes = Arc::new(quotes);
    let settings = settings();

    let state = AppState {
        quote_cache: QuoteCache::new(
            Duration::from_secs(settings.quote_cache_ttl_secs),
            settings.quote_cache_max_entries,
        ),
        settings,
        users: users.clone(),
        quotes: quotes.clone(),
        ai: ai.clone(),
    };

    TestApp {
        router: routes::app(state),
        users,
        ai,
        quotes,
    }
}

pub fn default_app() -> TestApp {
    test_app(ScriptedAi::fail(), FakeQuotes::default())
}

impl TestApp {
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let auth = token.map(|t| format!("Bearer {t}"));
        self.send_raw(method, uri, auth.as_deref(), body.map(|v| v.to_string()), true)
            .await
    }

    /// Full control over the `Authorization` value and the body text;
    /// `json_content_type` toggles the content-type header.
    pub async fn send_raw(
        &self,
        method: Method,
        uri: &str,
        authorization: Option<&str>,
        body: Option<String>,
        json_content_type: bool,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(a) = authorization {
            builder = builder.header(header::AUTHORIZATION, a);
        }

        let req = match body {
            Some(text) => {
                if json_content_type {
                    builder = builder.header(header::CONTENT_TYPE, "application/json");
                }
                builder.body(Body::from(text)).unwrap()
            }
            None => builder.body(Body::empty()).unwrap(),
        };

        let res = self.router.clone().oneshot(req).await.unwrap();
        let status = res.status();
        let bytes = res.into_body().collect().await.unwrap().to_bytes();
        let value = serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).to_string()));

        (status, value)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Method::GET, uri, None, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::POST, uri, None, Some(body)).await
    }

    /// Registers a user and returns its bearer token.
    pub async fn register(&self, email: &str) -> String {
        let (status, body) = self
            .post(
                "/api/auth/register",
                serde_json::json!({ "name": "Test User", "email": email, "password": "hunter22" }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["token"].as_str().unwrap().to_string()
    }
}
