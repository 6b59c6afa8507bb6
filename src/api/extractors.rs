use std::convert::Infallible;

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap},
};

use crate::domain::value_objects::Origin;

const FORWARDED_PROTO: &str = "x-forwarded-proto";

/// Host used for absolute URLs when a request carries no `Host` header.
/// Installed on the router as an extension.
#[derive(Debug, Clone)]
pub struct FallbackHost(pub String);

/// Origin of the current request: scheme from `X-Forwarded-Proto`
/// (default `http`), host from `Host`.
#[derive(Debug, Clone)]
pub struct RequestOrigin(pub Origin);

impl RequestOrigin {
    pub fn from_headers(headers: &HeaderMap, fallback_host: &str) -> Self {
        let scheme = headers
            .get(FORWARDED_PROTO)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.split(',').next())
            .map(|value| value.trim().to_ascii_lowercase())
            .filter(|scheme| scheme == "http" || scheme == "https")
            .unwrap_or_else(|| "http".to_string());

        let host = headers
            .get(header::HOST)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|host| !host.is_empty())
            .unwrap_or(fallback_host);

        Self(Origin::new(scheme, host))
    }
}

impl<S> FromRequestParts<S> for RequestOrigin
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let fallback = parts
            .extensions
            .get::<FallbackHost>()
            .map(|host| host.0.as_str())
            .unwrap_or("localhost");

        Ok(Self::from_headers(&parts.headers, fallback))
    }
}
