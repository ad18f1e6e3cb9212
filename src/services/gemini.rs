use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::config::Settings;

#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("GEMINI_API_KEY not set")]
    MissingApiKey,

    #[error("rate limited ({status}): {body}")]
    RateLimited { status: u16, body: String },

    #[error("generation failed ({status}): {body}")]
    Http { status: u16, body: String },

    #[error("transport error: {0}")]
    Transport(String),

    #[error("model returned no text")]
    EmptyResponse,
}

impl GenerationError {
    /// Quota / rate-limit / overload failures, the only ones that justify a
    /// substitute payload on the strict endpoints.
    pub fn is_quota(&self) -> bool {
        matches!(self, GenerationError::RateLimited { .. })
    }

    fn from_status(status: StatusCode, body: String) -> Self {
        let lower = body.to_ascii_lowercase();
        let quota_marker = lower.contains("quota") || lower.contains("resource_exhausted");

        if status == StatusCode::TOO_MANY_REQUESTS
            || status == StatusCode::SERVICE_UNAVAILABLE
            || quota_marker
        {
            GenerationError::RateLimited {
                status: status.as_u16(),
                body,
            }
        } else {
            GenerationError::Http {
                status: status.as_u16(),
                body,
            }
        }
    }
}

/// A text-generation backend: one prompt in, raw text out.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;
}

#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub timeout: Option<Duration>,
}

impl GeminiConfig {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            api_key: settings.gemini_api_key.clone(),
            model: settings.gemini_model.clone(),
            base_url: settings.gemini_base_url.trim_end_matches('/').to_string(),
            timeout: settings.gemini_timeout_secs.map(Duration::from_secs),
        }
    }
}

#[derive(Clone)]
pub struct GeminiClient {
    http: Client,
    config: GeminiConfig,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Result<Self, GenerationError> {
        let mut builder = Client::builder();
        if let Some(t) = config.timeout {
            builder = builder.timeout(t);
        }
        let http = builder
            .build()
            .map_err(|e| GenerationError::Transport(e.to_string()))?;

        Ok(Self { http, config })
    }

    fn has_key(&self) -> bool {
        !self.config.api_key.trim().is_empty()
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        if !self.has_key() {
            return Err(GenerationError::MissingApiKey);
        }

        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url, self.config.model
        );

        let res = self
            .http
            .post(&url)
            .query(&[("key", self.config.api_key.as_str())])
            .json(&json!({ "contents": [{ "parts": [{ "text": prompt }] }] }))
            .send()
            .await
            .map_err(|e| GenerationError::Transport(e.to_string()))?;

        if !res.status().is_success() {
            let status = res.status();
            let body = res.text().await.unwrap_or_default();
            return Err(GenerationError::from_status(status, body));
        }

        let body = res
            .json::<GenerateContentResponse>()
            .await
            .map_err(|e| GenerationError::Transport(e.to_string()))?;

        body.text().ok_or(GenerationError::EmptyResponse)
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Content {
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Part {
    #[serde(default)]
    pub text: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text parts of the first candidate.
    pub fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();
        if text.trim().is_empty() { None } else { Some(text) }
    }
}
