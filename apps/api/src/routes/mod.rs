pub mod health;
pub mod page;

use axum::{
    routing::{get, post},
    Router,
};

use crate::assessment::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(page::index_handler))
        .route("/health", get(health::health_handler))
        // Assessment API
        .route(
            "/api/v1/assessments",
            post(handlers::handle_start_assessment),
        )
        .route(
            "/api/v1/assessments/:id",
            get(handlers::handle_get_assessment).delete(handlers::handle_end_assessment),
        )
        .route(
            "/api/v1/assessments/:id/responses",
            post(handlers::handle_submit_response),
        )
        .with_state(state)
}
