pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::launch::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Launch API
        .route(
            "/api/v1/launch/hypothesis",
            post(handlers::handle_generate_hypothesis),
        )
        .route(
            "/api/v1/launch/launch-type",
            post(handlers::handle_select_launch_type),
        )
        .route("/api/v1/launch/task", post(handlers::handle_generate_task))
        .route(
            "/api/v1/launch/learn",
            post(handlers::handle_learn_and_iterate),
        )
        .with_state(state)
}
