use axum::{extract::State, http::StatusCode, response::Json};
use serde_json::json;
use std::sync::Arc;
use std::time::{Duration, Instant};
use utoipa::ToSchema;

use crate::application::cache::{CacheStats, MediaListCache};
use crate::application::ports::{MediaRepository, RepositoryError};

const READINESS_TIMEOUT: Duration = Duration::from_secs(2);

/// Dependencies probed by the readiness check
#[derive(Clone)]
pub struct HealthState {
    pub media_repo: Arc<dyn MediaRepository>,
    pub cache: Arc<MediaListCache>,
}

/// Basic health check response
#[derive(serde::Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
}

/// Repository readiness response
#[derive(serde::Serialize, ToSchema)]
pub struct ReadinessResponse {
    pub status: String,
    pub service: String,
    pub repository: String,
    pub cache: CacheStats,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// GET /health
/// Liveness probe (no repository check)
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    )
)]
pub async fn health_handler() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "service": env!("CARGO_PKG_NAME"),
            "version": env!("CARGO_PKG_VERSION"),
            "timestamp": chrono::Utc::now().to_rfc3339(),
        })),
    )
}

/// GET /health/ready
/// Readiness probe with repository connectivity check
#[utoipa::path(
    get,
    path = "/health/ready",
    tag = "health",
    responses(
        (status = 200, description = "Service is ready", body = ReadinessResponse),
        (status = 503, description = "Service is not ready", body = ReadinessResponse)
    )
)]
pub async fn readiness_handler(
    State(state): State<HealthState>,
) -> (StatusCode, Json<serde_json::Value>) {
    let start_time = Instant::now();

    let check = tokio::time::timeout(READINESS_TIMEOUT, state.media_repo.ping()).await;

    let response_time = start_time.elapsed();
    let cache = state.cache.stats();

    match check {
        Ok(Ok(())) => (
            StatusCode::OK,
            Json(json!({
                "status": "ready",
                "service": env!("CARGO_PKG_NAME"),
                "repository": "connected",
                "cache": cache,
                "response_time_ms": response_time.as_millis(),
            })),
        ),
        Ok(Err(e)) => {
            tracing::warn!(error = %e, "Readiness check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "not_ready",
                    "service": env!("CARGO_PKG_NAME"),
                    "repository": "disconnected",
                    "error": sanitize_repository_error(&e),
                    "cache": cache,
                    "response_time_ms": response_time.as_millis(),
                })),
            )
        }
        Err(_) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "status": "not_ready",
                "service": env!("CARGO_PKG_NAME"),
                "repository": "timeout",
                "error": format!("Repository check timed out after {} seconds", READINESS_TIMEOUT.as_secs()),
                "cache": cache,
                "response_time_ms": response_time.as_millis(),
            })),
        ),
    }
}

/// Error text safe to return to unauthenticated probes
pub fn sanitize_repository_error(error: &RepositoryError) -> &'static str {
    match error {
        RepositoryError::Database(sqlx::Error::PoolTimedOut) => "Database pool timeout",
        RepositoryError::Database(sqlx::Error::PoolClosed) => "Database pool closed",
        RepositoryError::Database(sqlx::Error::Io(_)) => "Database connection error",
        RepositoryError::Database(sqlx::Error::Tls(_)) => "Database TLS error",
        RepositoryError::Database(sqlx::Error::Configuration(_)) => "Database configuration error",
        RepositoryError::Database(_) => "Database operation error",
        RepositoryError::NotFound(_) | RepositoryError::Internal(_) => "Repository error",
    }
}
