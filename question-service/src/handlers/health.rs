use crate::startup::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use service_core::error::AppError;

/// Liveness endpoint.
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "question-service",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Readiness check: the generator backend must answer.
pub async fn readiness_check(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    state.generator.health_check().await.map_err(|e| {
        tracing::warn!(error = %e, "Question generator is not ready");
        AppError::ServiceUnavailable
    })?;
    Ok(StatusCode::OK)
}
