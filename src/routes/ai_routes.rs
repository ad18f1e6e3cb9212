use axum::{Router, routing::{get, post}};
use crate::{AppState, controllers::ai_controller};

pub fn add_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/api/analyze", post(ai_controller::analyze))
        .route("/api/explain", post(ai_controller::explain))
        .route("/api/projection", post(ai_controller::projection))
        .route("/api/trending", get(ai_controller::trending))
}
