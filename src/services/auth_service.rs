use std::sync::LazyLock;

use bcrypt::{hash, verify};
use chrono::{TimeDelta, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::{
    models::{NewUser, Plan, User},
    AppState,
};

use super::user_store::StoreError;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("static email regex"));

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    // user id as hex string
    pub sub: String,
    pub email: String,
    pub name: String,
    pub plan: Plan,
    pub iat: usize,
    // expiry (unix timestamp seconds)
    pub exp: usize,
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("All fields are required")]
    MissingFields,

    #[error("Invalid email")]
    InvalidEmail,

    #[error("User already exists")]
    UserExists,

    // same message for unknown email and wrong password
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("password hashing failed: {0}")]
    Hash(String),

    #[error("token signing failed: {0}")]
    Token(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

pub fn make_jwt(state: &AppState, user: &User) -> Result<String, AuthError> {
    sign_token(&state.settings.jwt_secret, state.settings.jwt_ttl_hours, user)
}

/// Signs `{sub,email,name,plan,iat,exp}` for `user`. Fails instead of
/// panicking when `ttl_hours` is not a representable positive span.
pub fn sign_token(secret: &str, ttl_hours: i64, user: &User) -> Result<String, AuthError> {
    let now = Utc::now();
    let exp = TimeDelta::try_hours(ttl_hours)
        .filter(|ttl| *ttl > TimeDelta::zero())
        .and_then(|ttl| now.checked_add_signed(ttl))
        .ok_or_else(|| AuthError::Token(format!("invalid token lifetime: {ttl_hours}h")))?;

    let claims = Claims {
        sub: user.id.to_hex(),
        email: user.email.clone(),
        name: user.name.clone(),
        plan: user.plan,
        iat: now.timestamp() as usize,
        exp: exp.timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AuthError::Token(e.to_string()))
}

/// Checks signature and expiry; nothing is looked up server-side.
pub fn verify_token(secret: &str, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;

    decode::<Claims>(token, &DecodingKey::from_secret(secret.as_bytes()), &validation)
        .map(|data| data.claims)
}

pub async fn register_user(
    state: &AppState,
    name: &str,
    email: &str,
    password: &str,
) -> Result<User, AuthError> {
    let name = name.trim();
    let email = email.trim();

    if name.is_empty() || email.is_empty() || password.is_empty() {
        return Err(AuthError::MissingFields);
    }
    if !is_valid_email(email) {
        return Err(AuthError::InvalidEmail);
    }

    // unique email
    if state.users.find_by_email(email).await?.is_some() {
        return Err(AuthError::UserExists);
    }

    let password_hash =
        hash(password, state.settings.bcrypt_cost).map_err(|e| AuthError::Hash(e.to_string()))?;

    let new_user = NewUser {
        name: name.to_string(),
        email: email.to_string(),
        password_hash,
    };

    match state.users.insert(new_user).await {
        Ok(u) => Ok(u),
        Err(StoreError::DuplicateEmail) => Err(AuthError::UserExists),
        Err(e) => Err(e.into()),
    }
}

pub async fn login_user(state: &AppState, email: &str, password: &str) -> Result<User, AuthError> {
    let email = email.trim();
    if email.is_empty() || password.is_empty() {
        return Err(AuthError::InvalidCredentials);
    }

    let user = match state.users.find_by_email(email).await? {
        Some(u) => u,
        None => return Err(AuthError::InvalidCredentials),
    };

    if !verify(password, &user.password_hash).unwrap_or(false) {
        return Err(AuthError::InvalidCredentials);
    }

    Ok(user)
}
