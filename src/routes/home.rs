//! Health check route handler.

use axum::Json;
use serde::Serialize;

/// Health check response body.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub name: &'static str,
    pub healthy: bool,
}

/// Liveness health check endpoint.
///
/// Returns the service banner. Does not check dependencies.
pub async fn index() -> Json<HealthResponse> {
    Json(HealthResponse {
        name: "Welcome to the purchases server",
        healthy: true,
    })
}
