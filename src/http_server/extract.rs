//! Extractors that reject through the error normalizer

use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use axum::Json;
use serde::de::DeserializeOwned;

use super::errors::ApiError;

/// Like `axum::Json`, but a bad body becomes `ApiError::MalformedBody`.
pub struct JsonBody<T>(pub T);

#[axum::async_trait]
impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(JsonBody(value))
    }
}

/// The raw `:id` path segment. A segment that does not even decode (bad
/// percent-encoding, invalid UTF-8) becomes `ApiError::MalformedIdentifier`.
pub struct PathId(pub String);

#[axum::async_trait]
impl<S> FromRequestParts<S> for PathId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| ApiError::MalformedIdentifier(rejection.body_text()))?;
        Ok(PathId(id))
    }
}
