use axum::{
    extract::{Path, State},
    response::Json,
};
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

use crate::api::errors::{ApiError, MEDIA_NOT_FOUND};
use crate::application::use_cases::DeleteMediaUseCase;
use crate::domain::value_objects::MediaId;

#[derive(Debug, Serialize, ToSchema)]
pub struct DeleteResponse {
    pub status: String,
    pub message: String,
}

/// DELETE /media/{id}
/// Delete a media record and its image
#[utoipa::path(
    delete,
    path = "/media/{id}",
    tag = "media",
    params(
        ("id" = i64, Path, description = "Media id")
    ),
    responses(
        (status = 200, description = "Image deleted successfully", body = DeleteResponse),
        (status = 400, description = "Image could not be removed from storage"),
        (status = 404, description = "Media not found"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn delete_handler(
    State(use_case): State<Arc<DeleteMediaUseCase>>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>, ApiError> {
    // A non-numeric id cannot name a record
    let media_id = id
        .parse::<MediaId>()
        .map_err(|_| ApiError::not_found(MEDIA_NOT_FOUND))?;

    use_case.execute(media_id).await?;

    Ok(Json(DeleteResponse {
        status: "success".to_string(),
        message: "Image deleted successfully".to_string(),
    }))
}
