use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

use crate::application::use_cases::{DeleteError, ListError, UploadError};

pub const MEDIA_NOT_FOUND: &str = "Media not found";

/// API error response
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "status": "error",
            "message": self.message,
        }));

        (self.status, body).into_response()
    }
}

// Convert use case errors to API errors

impl From<UploadError> for ApiError {
    fn from(err: UploadError) -> Self {
        match err {
            UploadError::InvalidPayload(e) => ApiError::bad_request(e.to_string()),
            UploadError::Storage(e) => {
                error!(error = %e, "Failed to write image");
                ApiError::internal_error("Failed to save image")
            }
            UploadError::Persistence { .. } => ApiError::internal_error("Failed to save media"),
        }
    }
}

impl From<DeleteError> for ApiError {
    fn from(err: DeleteError) -> Self {
        match err {
            DeleteError::NotFound(_) => ApiError::not_found(MEDIA_NOT_FOUND),
            DeleteError::Storage(e) => {
                error!(error = %e, "Failed to delete image");
                ApiError::bad_request(e.to_string())
            }
            DeleteError::Persistence(e) => {
                error!(error = %e, "Failed to delete media record");
                ApiError::internal_error("Failed to delete media")
            }
        }
    }
}

impl From<ListError> for ApiError {
    fn from(err: ListError) -> Self {
        match err {
            ListError::Persistence(e) => {
                error!(error = %e, "Failed to list media");
                ApiError::internal_error("Failed to fetch media")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{RepositoryError, StorageError};
    use crate::domain::errors::DomainError;
    use crate::domain::value_objects::MediaId;

    #[test]
    fn test_upload_phases_map_to_status() {
        let invalid: ApiError = UploadError::InvalidPayload(DomainError::InvalidEncoding).into();
        assert_eq!(invalid.status(), StatusCode::BAD_REQUEST);
        assert_eq!(invalid.message(), "Invalid base64");

        let storage: ApiError =
            UploadError::Storage(StorageError::Io(std::io::Error::other("disk full"))).into();
        assert_eq!(storage.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let persistence: ApiError = UploadError::Persistence {
            location: "images/1-a.png".to_string(),
            source: RepositoryError::Internal("insert failed".to_string()),
        }
        .into();
        assert_eq!(persistence.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(persistence.message(), "Failed to save media");
    }

    #[test]
    fn test_delete_phases_map_to_status() {
        let not_found: ApiError = DeleteError::NotFound(MediaId::new(7)).into();
        assert_eq!(not_found.status(), StatusCode::NOT_FOUND);
        assert_eq!(not_found.message(), MEDIA_NOT_FOUND);

        let storage: ApiError =
            DeleteError::Storage(StorageError::NotFound("images/7.png".to_string())).into();
        assert_eq!(storage.status(), StatusCode::BAD_REQUEST);

        let persistence: ApiError =
            DeleteError::Persistence(RepositoryError::Internal("gone".to_string())).into();
        assert_eq!(persistence.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_unsupported_media_type_is_bad_request() {
        let err: ApiError =
            UploadError::InvalidPayload(DomainError::UnsupportedMediaType("text/plain".into()))
                .into();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }
}
