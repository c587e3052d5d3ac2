use axum::{extract::State, Json};
use serde::Serialize;

use crate::logbook::writer::read_log;
use crate::state::AppState;

#[derive(Serialize)]
pub struct LogsResponse {
    pub logs: String,
}

/// GET /api/v1/logs
pub async fn handle_get_logs(State(state): State<AppState>) -> Json<LogsResponse> {
    let logs = read_log(state.log_store.as_ref()).await;
    Json(LogsResponse { logs })
}
