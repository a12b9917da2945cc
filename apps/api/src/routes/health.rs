use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Returns a simple status object with service version and model.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    let open_sessions = state.sessions.count().await;
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "assessor",
        "model": state.config.gemini_model,
        "open_sessions": open_sessions
    }))
}
