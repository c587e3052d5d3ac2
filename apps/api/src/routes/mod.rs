pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::analysis::handlers as analysis;
use crate::logbook::handlers as logbook;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/roles", get(analysis::handle_list_roles))
        .route("/api/v1/analyze", post(analysis::handle_analyze))
        .route("/api/v1/logs", get(logbook::handle_get_logs))
        .with_state(state)
}
