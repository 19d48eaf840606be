use axum::{extract::State, http::StatusCode, response::Json};
use serde_json::{json, Value};

use crate::server::app::AppState;

pub async fn health_check(State(state): State<AppState>) -> Result<Json<Value>, StatusCode> {
    if let Err(e) = state.db.ping().await {
        tracing::warn!("Health check failed to reach the database: {}", e);
        return Err(StatusCode::SERVICE_UNAVAILABLE);
    }

    Ok(Json(json!({
        "status": "healthy",
        "service": "commander",
        "version": env!("CARGO_PKG_VERSION")
    })))
}
