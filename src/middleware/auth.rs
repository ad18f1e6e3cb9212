use axum::{
    extract::State,
    http::{header::AUTHORIZATION, HeaderMap, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::headers::{authorization::Bearer, Authorization, HeaderMapExt};
use mongodb::bson::oid::ObjectId;

use crate::{
    error::ApiError,
    services::auth_service::{verify_token, Claims},
    AppState,
};

/// Identity of the caller, taken from a verified bearer token.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: ObjectId,
    pub claims: Claims,
}

/// What the `Authorization` header carried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credentials {
    Missing,
    // header present but not `Bearer <token>`
    Malformed,
    Bearer(String),
}

pub fn credentials(headers: &HeaderMap) -> Credentials {
    if !headers.contains_key(AUTHORIZATION) {
        return Credentials::Missing;
    }

    match headers.typed_get::<Authorization<Bearer>>() {
        Some(Authorization(b)) if !b.token().is_empty() => Credentials::Bearer(b.token().to_string()),
        _ => Credentials::Malformed,
    }
}

pub fn authenticate(state: &AppState, token: &str) -> Option<AuthUser> {
    let claims = verify_token(&state.settings.jwt_secret, token).ok()?;
    let id = ObjectId::parse_str(&claims.sub).ok()?;
    Some(AuthUser { id, claims })
}

/// Guards `/api/user/*`: no header is 401; a malformed header or a bad or
/// expired token is 403.
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request<axum::body::Body>,
    next: Next,
) -> Response {
    let token = match credentials(req.headers()) {
        Credentials::Missing => {
            return ApiError::Unauthorized("No token provided".into()).into_response();
        }
        Credentials::Malformed => return ApiError::Forbidden("Invalid token".into()).into_response(),
        Credentials::Bearer(token) => token,
    };

    match authenticate(&state, &token) {
        Some(user) => {
            // handlers read it back with Extension<AuthUser>
            req.extensions_mut().insert(user);
            next.run(req).await
        }
        None => ApiError::Forbidden("Invalid token".into()).into_response(),
    }
}
