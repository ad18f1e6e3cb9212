use axum::{
    Json,
    extract::{FromRequest, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::services::{auth_service::AuthError, stocks_service::StockError, user_service::UserError};

/// Error returned by every JSON handler. Renders as `{"error": ..}` with an
/// optional `details` string carrying the raw cause.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{message}")]
    Internal {
        message: String,
        details: Option<String>,
    },
}

impl ApiError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal {
            message: msg.into(),
            details: None,
        }
    }

    pub fn internal_with(msg: impl Into<String>, details: impl ToString) -> Self {
        Self::Internal {
            message: msg.into(),
            details: Some(details.to_string()),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            Self::Internal {
                message,
                details: Some(details),
            } => json!({ "error": message, "details": details }),
            other => json!({ "error": other.to_string() }),
        };
        (status, Json(body)).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

/// `Json<T>` whose rejections (bad content type, syntax, wrong field types)
/// come back as a 400 in the usual error envelope.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<StockError> for ApiError {
    fn from(e: StockError) -> Self {
        match e {
            StockError::NotFound(_) => ApiError::NotFound(e.to_string()),
            StockError::Upstream(inner) => ApiError::internal_with("Failed to fetch stock data", inner),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::MissingFields
            | AuthError::InvalidEmail
            | AuthError::UserExists
            | AuthError::InvalidCredentials => ApiError::BadRequest(e.to_string()),
            other => {
                tracing::error!(error = %other, "auth failure");
                ApiError::internal_with("Internal server error", other)
            }
        }
    }
}

impl UserError {
    /// `context` is the message used when the store itself failed.
    pub fn into_api(self, context: &str) -> ApiError {
        match self {
            UserError::NotFound => ApiError::NotFound(self.to_string()),
            UserError::MissingSymbol | UserError::InvalidPlan => ApiError::BadRequest(self.to_string()),
            UserError::Store(e) => {
                tracing::error!(error = %e, "{context}");
                ApiError::internal_with(context, e)
            }
        }
    }
}
