use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::json;
use sha2::{Digest, Sha256};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::api::errors::ApiError;
use crate::api::extractors::RequestOrigin;
use crate::application::dto::MediaDto;
use crate::application::use_cases::ListMediaUseCase;

pub const X_CACHE: &str = "x-cache";

/// Successful list response
#[derive(Serialize, ToSchema)]
pub struct MediaListResponse {
    /// Always `"success"`
    pub status: String,
    pub data: Vec<MediaDto>,
}

/// GET /media
/// List all media with absolute image URLs
#[utoipa::path(
    get,
    path = "/media",
    tag = "media",
    params(
        ("If-None-Match" = Option<String>, Header, description = "ETag of a previously fetched list")
    ),
    responses(
        (status = 200, description = "Media retrieved successfully", body = MediaListResponse),
        (status = 304, description = "List unchanged since the given ETag"),
        (status = 500, description = "Failed to fetch media")
    )
)]
pub async fn list_handler(
    State(use_case): State<Arc<ListMediaUseCase>>,
    RequestOrigin(origin): RequestOrigin,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    let list = use_case.execute(&origin).await?;

    let body = serde_json::to_vec(&json!({
        "status": "success",
        "data": list.media.as_slice(),
    }))
    .map_err(|e| ApiError::internal_error(format!("Failed to encode media list: {}", e)))?;

    let etag = etag_for(&body);
    let cache_control = format!("public, max-age={}", use_case.cache_ttl().as_secs());

    let mut response_headers = HeaderMap::new();
    response_headers.insert(header::ETAG, header_value(&etag)?);
    response_headers.insert(header::CACHE_CONTROL, header_value(&cache_control)?);
    response_headers.insert(
        X_CACHE,
        HeaderValue::from_static(if list.cache_hit { "HIT" } else { "MISS" }),
    );

    if if_none_match(&headers, &etag) {
        return Ok((StatusCode::NOT_MODIFIED, response_headers).into_response());
    }

    response_headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    Ok((StatusCode::OK, response_headers, Body::from(body)).into_response())
}

/// Strong ETag over the serialized body
fn etag_for(body: &[u8]) -> String {
    format!("\"{}\"", hex::encode(Sha256::digest(body)))
}

fn header_value(value: &str) -> Result<HeaderValue, ApiError> {
    HeaderValue::from_str(value)
        .map_err(|e| ApiError::internal_error(format!("Invalid header value: {}", e)))
}

/// Whether `If-None-Match` names `etag` (weak comparison)
fn if_none_match(headers: &HeaderMap, etag: &str) -> bool {
    headers
        .get_all(header::IF_NONE_MATCH)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(','))
        .map(|tag| tag.trim())
        .any(|tag| tag == "*" || tag.trim_start_matches("W/") == etag)
}
