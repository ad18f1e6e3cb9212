use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use crate::{error::ApiError, AppState};

pub async fn home() -> impl IntoResponse {
    "CapitalCare backend running"
}

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

pub async fn health_db(State(state): State<AppState>) -> impl IntoResponse {
    match state.users.ping().await {
        Ok(()) => (StatusCode::OK, Json(json!({ "db": "ok" }))).into_response(),
        Err(e) => ApiError::internal_with("Database unavailable", e).into_response(),
    }
}

pub async fn not_found() -> impl IntoResponse {
    ApiError::NotFound("Not found".into())
}
