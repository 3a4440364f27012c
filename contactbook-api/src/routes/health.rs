/// Health check endpoints
///
/// # Endpoints
///
/// - `GET /health` - service and database status, always 200
/// - `GET /health/live` - process is up, always 200
/// - `GET /health/ready` - 200 once startup seeding finished and the store
///   answers, 503 otherwise
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "database": "connected"
/// }
/// ```

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,

    /// Application version
    pub version: String,

    /// Database status
    pub database: String,
}

/// Probe response
#[derive(Debug, Serialize, Deserialize)]
pub struct ProbeResponse {
    /// Always "up" on success
    pub status: String,
}

impl ProbeResponse {
    fn up() -> Self {
        Self {
            status: "up".to_string(),
        }
    }
}

/// Reports service health including database connectivity
pub async fn health_check(State(state): State<AppState>) -> ApiResult<Json<HealthResponse>> {
    let connected = match state.store.ping().await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "Store health check failed");
            false
        }
    };

    Ok(Json(HealthResponse {
        status: if connected { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: if connected { "connected" } else { "disconnected" }.to_string(),
    }))
}

/// Liveness probe
pub async fn liveness() -> Json<ProbeResponse> {
    Json(ProbeResponse::up())
}

/// Readiness probe
pub async fn readiness(State(state): State<AppState>) -> ApiResult<Json<ProbeResponse>> {
    if !state.is_ready() {
        return Err(ApiError::ServiceUnavailable(
            "Startup seeding has not finished".to_string(),
        ));
    }

    state.store.ping().await.map_err(|e| {
        tracing::warn!(error = %e, "Store not reachable");
        ApiError::ServiceUnavailable("Database unavailable".to_string())
    })?;

    Ok(Json(ProbeResponse::up()))
}
