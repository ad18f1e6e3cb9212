use axum::{
    extract::{Path, State},
    Json,
};

use crate::{error::ApiResult, models::Quote, services::stocks_service, AppState};

pub async fn get_stock(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
) -> ApiResult<Json<Quote>> {
    let quote = stocks_service::fetch_quote(&state, &symbol).await.map_err(|e| {
        tracing::error!(%symbol, error = %e, "stock fetch error");
        e
    })?;
    Ok(Json(quote))
}
