use utoipa::OpenApi;

use crate::api::handlers::{
    delete::DeleteResponse,
    health::{HealthResponse, ReadinessResponse},
    list::MediaListResponse,
    upload::UploadResponse,
};
use crate::application::cache::CacheStats;
use crate::application::dto::{MediaDto, UploadRequest};

/// OpenAPI document for the media API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Media Store API",
        version = "0.1.0",
        description = "Upload, list and delete images stored on the local filesystem"
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        crate::api::handlers::health::health_handler,
        crate::api::handlers::health::readiness_handler,
        crate::api::handlers::list::list_handler,
        crate::api::handlers::upload::upload_handler,
        crate::api::handlers::delete::delete_handler,
    ),
    components(
        schemas(
            MediaDto,
            UploadRequest,
            MediaListResponse,
            UploadResponse,
            DeleteResponse,
            HealthResponse,
            ReadinessResponse,
            CacheStats,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "media", description = "Media operations")
    )
)]
pub struct ApiDoc;
