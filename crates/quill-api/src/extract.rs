//! Request extractors.

use axum::extract::FromRequestParts;
use axum::http::header;
use axum::http::request::Parts;

use crate::error::ApiError;

/// Bearer token from the `Authorization` header, passed to the services as an
/// opaque string.
///
/// Rejects the request with 401 when the header is missing or not a Bearer
/// scheme; whether the token itself is valid is the services' call.
#[derive(Debug, Clone)]
pub struct BearerToken(pub String);

#[axum::async_trait]
impl<S> FromRequestParts<S> for BearerToken
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok());

        match auth_header {
            Some(header) if header.starts_with("Bearer ") => {
                let token = header.trim_start_matches("Bearer ").trim();
                if token.is_empty() {
                    return Err(ApiError::Unauthorized("empty bearer token".to_string()));
                }
                Ok(BearerToken(token.to_string()))
            }
            _ => Err(ApiError::Unauthorized("missing bearer token".to_string())),
        }
    }
}
