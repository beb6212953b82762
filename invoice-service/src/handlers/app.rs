use axum::{extract::State, response::IntoResponse, Json};
use serde_json::json;

use crate::AppState;

pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let database = match state.db.health_check().await {
        Ok(()) => "up",
        Err(_) => "down",
    };

    Json(json!({
        "status": "ok",
        "service": "invoice-service",
        "database": database,
    }))
}
