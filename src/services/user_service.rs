use mongodb::bson::oid::ObjectId;

use crate::{
    models::{Plan, User, HISTORY_LIMIT},
    AppState,
};

use super::user_store::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum UserError {
    #[error("User not found")]
    NotFound,

    #[error("Symbol is required")]
    MissingSymbol,

    #[error("Invalid plan")]
    InvalidPlan,

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Moves `symbol` to the end of `history` (adding it if absent) and keeps
/// only the last `HISTORY_LIMIT` entries.
pub fn push_symbol(history: &[String], symbol: &str) -> Vec<String> {
    let mut next: Vec<String> = history.iter().filter(|s| *s != symbol).cloned().collect();
    next.push(symbol.to_string());

    if next.len() > HISTORY_LIMIT {
        next = next.split_off(next.len() - HISTORY_LIMIT);
    }
    next
}

async fn load(state: &AppState, user_id: ObjectId) -> Result<User, UserError> {
    state.users.find_by_id(user_id).await?.ok_or(UserError::NotFound)
}

/// Most recent first.
pub async fn get_history(state: &AppState, user_id: ObjectId) -> Result<Vec<String>, UserError> {
    let user = load(state, user_id).await?;
    Ok(user.history.into_iter().rev().collect())
}

/// Returns the stored order (oldest first). Read-modify-write: concurrent
/// pushes for the same user are last-writer-wins.
pub async fn push_history(state: &AppState, user_id: ObjectId, symbol: &str) -> Result<Vec<String>, UserError> {
    let symbol = symbol.trim().to_uppercase();
    if symbol.is_empty() {
        return Err(UserError::MissingSymbol);
    }

    let user = load(state, user_id).await?;
    let history = push_symbol(&user.history, &symbol);

    if !state.users.set_history(user_id, &history).await? {
        return Err(UserError::NotFound);
    }
    Ok(history)
}

/// Plan assignment only; no billing is involved.
pub async fn assign_plan(state: &AppState, user_id: ObjectId, plan: &str) -> Result<User, UserError> {
    let plan: Plan = plan.parse().map_err(|_| UserError::InvalidPlan)?;

    state
        .users
        .set_plan(user_id, plan)
        .await?
        .ok_or(UserError::NotFound)
}
