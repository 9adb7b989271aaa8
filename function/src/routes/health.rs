use axum::Json;
use serde::Serialize;

/// Health status of the function
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: String,
    /// Current version of the function
    semver: String,
    /// Commit hash of the current build (if available)
    rev: Option<String>,
}

/// Health check endpoint
///
/// Used by the watchdog and the orchestrator to decide whether the function can
/// take invocations. It never touches the object store.
pub async fn handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        semver: env!("CARGO_PKG_VERSION").to_string(),
        rev: option_env!("GIT_REV").map(ToString::to_string),
    })
}
