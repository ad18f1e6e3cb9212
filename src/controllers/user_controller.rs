use axum::{
    extract::{Extension, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{
    auth::AuthUser,
    error::{ApiJson, ApiResult},
    models::PublicUser,
    services::user_service,
    AppState,
};

// ---------------- History ----------------

pub async fn get_history(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> ApiResult<Json<Value>> {
    let history = user_service::get_history(&state, user.id)
        .await
        .map_err(|e| e.into_api("Failed to fetch history"))?;

    Ok(Json(json!({ "history": history })))
}

#[derive(Deserialize)]
pub struct HistoryBody {
    #[serde(default)]
    pub symbol: Option<String>,
}

pub async fn post_history(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    ApiJson(body): ApiJson<HistoryBody>,
) -> ApiResult<Json<Value>> {
    let symbol = body.symbol.unwrap_or_default();

    let history = user_service::push_history(&state, user.id, &symbol)
        .await
        .map_err(|e| e.into_api("Failed to save history"))?;

    Ok(Json(json!({ "success": true, "history": history })))
}

// ---------------- Plan ----------------

#[derive(Deserialize)]
pub struct UpgradeBody {
    #[serde(default)]
    pub plan: Option<String>,
}

pub async fn upgrade(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    ApiJson(body): ApiJson<UpgradeBody>,
) -> ApiResult<Json<Value>> {
    let plan = body.plan.unwrap_or_default();

    let updated = user_service::assign_plan(&state, user.id, &plan)
        .await
        .map_err(|e| e.into_api("Failed to upgrade plan"))?;

    tracing::info!(user_id = %user.id, plan = %updated.plan, "plan assigned");
    Ok(Json(json!({ "success": true, "user": PublicUser::from(updated) })))
}
