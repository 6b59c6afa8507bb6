use axum::{
    extract::{rejection::JsonRejection, State},
    response::Json,
};
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

use crate::api::errors::ApiError;
use crate::api::extractors::RequestOrigin;
use crate::application::dto::{MediaDto, UploadRequest};
use crate::application::use_cases::UploadMediaUseCase;

#[derive(Debug, Serialize, ToSchema)]
pub struct UploadResponse {
    pub status: String,
    pub data: MediaDto,
}

/// POST /media
/// Upload a base64 data URI image
#[utoipa::path(
    post,
    path = "/media",
    tag = "media",
    request_body = UploadRequest,
    responses(
        (status = 200, description = "Image stored", body = UploadResponse),
        (status = 400, description = "Invalid base64 or unsupported media type"),
        (status = 413, description = "Payload too large"),
        (status = 500, description = "Failed to save media")
    )
)]
pub async fn upload_handler(
    State(use_case): State<Arc<UploadMediaUseCase>>,
    RequestOrigin(origin): RequestOrigin,
    payload: Result<Json<UploadRequest>, JsonRejection>,
) -> Result<Json<UploadResponse>, ApiError> {
    // Keep the error envelope for malformed and oversized bodies
    let Json(request) =
        payload.map_err(|rejection| ApiError::new(rejection.status(), rejection.body_text()))?;

    let media = use_case.execute(request, &origin).await?;

    Ok(Json(UploadResponse {
        status: "success".to_string(),
        data: media,
    }))
}
