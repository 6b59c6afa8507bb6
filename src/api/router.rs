use axum::{
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{delete, get, post},
    Extension, Json, Router,
};
use std::sync::Arc;
use tower_http::services::ServeDir;
use utoipa::OpenApi;

use crate::api::extractors::FallbackHost;
use crate::api::handlers::{
    delete_handler, health_handler, list_handler, readiness_handler, upload_handler, HealthState,
};
use crate::api::middleware::{cors, request_log};
use crate::api::openapi::ApiDoc;
use crate::application::cache::MediaListCache;
use crate::application::ports::MediaRepository;
use crate::application::use_cases::{DeleteMediaUseCase, ListMediaUseCase, UploadMediaUseCase};
use crate::config::Config;
use crate::infrastructure::storage::IMAGES_DIR;

/// Application state container
pub struct AppState {
    pub media_repo: Arc<dyn MediaRepository>,
    pub cache: Arc<MediaListCache>,
    pub list_use_case: Arc<ListMediaUseCase>,
    pub upload_use_case: Arc<UploadMediaUseCase>,
    pub delete_use_case: Arc<DeleteMediaUseCase>,
    pub config: Config,
}

/// Create router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    let health_state = HealthState {
        media_repo: Arc::clone(&state.media_repo),
        cache: Arc::clone(&state.cache),
    };
    let images_dir = state.config.public_dir.join(IMAGES_DIR);

    Router::new()
        .route("/health", get(health_handler))
        .route(
            "/health/ready",
            get(readiness_handler).with_state(health_state),
        )
        .route(
            "/media",
            get(list_handler).with_state(Arc::clone(&state.list_use_case)),
        )
        .route(
            "/media",
            post(upload_handler).with_state(Arc::clone(&state.upload_use_case)),
        )
        .route(
            "/media/{id}",
            delete(delete_handler).with_state(Arc::clone(&state.delete_use_case)),
        )
        .route(
            "/api-docs/openapi.json",
            get(|| async { Json(ApiDoc::openapi()) }),
        )
        // Stored blobs, so generated URLs resolve
        .nest_service("/images", ServeDir::new(images_dir))
        .layer(DefaultBodyLimit::max(state.config.max_upload_bytes))
        .layer(Extension(FallbackHost(state.config.fallback_host())))
        .layer(cors::create_cors_layer_for(&state.config))
        .layer(axum_middleware::from_fn(request_log::request_log_middleware))
}
