use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::{
    auth::{self, Credentials},
    error::{ApiError, ApiJson, ApiResult},
    models::{PublicUser, User},
    services::auth_service,
    AppState,
};

#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: PublicUser,
}

fn issue(state: &AppState, user: &User) -> ApiResult<AuthResponse> {
    let token = auth_service::make_jwt(state, user)?;
    Ok(AuthResponse {
        token,
        user: PublicUser::from(user),
    })
}

// ---------------- REGISTER ----------------

#[derive(Deserialize)]
pub struct RegisterBody {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

pub async fn register(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<RegisterBody>,
) -> ApiResult<impl IntoResponse> {
    let user = auth_service::register_user(
        &state,
        body.name.as_deref().unwrap_or(""),
        body.email.as_deref().unwrap_or(""),
        body.password.as_deref().unwrap_or(""),
    )
    .await?;

    tracing::info!(user_id = %user.id, "registered user");
    Ok((StatusCode::CREATED, Json(issue(&state, &user)?)))
}

// ---------------- LOGIN ----------------

#[derive(Deserialize)]
pub struct LoginBody {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

pub async fn login(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<LoginBody>,
) -> ApiResult<Json<AuthResponse>> {
    let user = auth_service::login_user(
        &state,
        body.email.as_deref().unwrap_or(""),
        body.password.as_deref().unwrap_or(""),
    )
    .await?;

    Ok(Json(issue(&state, &user)?))
}

// ---------------- ME ----------------

/// Fresh profile from the store, so a plan change shows up before the token
/// is reissued.
pub async fn me(State(state): State<AppState>, headers: HeaderMap) -> ApiResult<impl IntoResponse> {
    // any header that is present but unusable reads as an invalid token
    let token = match auth::credentials(&headers) {
        Credentials::Missing => return Err(ApiError::Unauthorized("No token provided".into())),
        Credentials::Malformed => return Err(ApiError::Unauthorized("Invalid token".into())),
        Credentials::Bearer(token) => token,
    };

    let caller = auth::authenticate(&state, &token)
        .ok_or_else(|| ApiError::Unauthorized("Invalid token".into()))?;

    let user = state
        .users
        .find_by_id(caller.id)
        .await
        .map_err(|_| ApiError::Unauthorized("Invalid token".into()))?
        .ok_or_else(|| ApiError::Unauthorized("User not found".into()))?;

    Ok(Json(json!({ "user": PublicUser::from(user) })))
}
