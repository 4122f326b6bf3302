use axum::{extract::State, response::Json};
use chrono::Utc;

use crate::{server::AppState, types::HealthResponse};

pub const SERVICE_NAME: &str = "ChromaticBotBackEnd";

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        service: SERVICE_NAME.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: (Utc::now() - state.started_at).num_seconds(),
    })
}
