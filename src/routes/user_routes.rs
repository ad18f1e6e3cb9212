use axum::{Router, middleware::from_fn_with_state, routing::{get, post}};
use crate::{AppState, controllers::user_controller};

// every route here needs a bearer token
pub fn add_routes(router: Router<AppState>, state: AppState) -> Router<AppState> {
    let user = Router::<AppState>::new()
        .route(
            "/api/user/history",
            get(user_controller::get_history).post(user_controller::post_history),
        )
        .route("/api/user/upgrade", post(user_controller::upgrade))
        .route_layer(from_fn_with_state(state, crate::auth::require_auth));

    router.merge(user)
}
