//! # Error normalizer
//!
//! Every handler that touches the store returns `Result<_, ApiError>`. The
//! `IntoResponse` impl below is the single place failures become HTTP
//! responses, and it logs each failure before choosing one.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::person::StoreError;

pub const MALFORMED_ID_MESSAGE: &str = "malformed id";
pub const MALFORMED_BODY_MESSAGE: &str = "malformed request body";
pub const INTERNAL_ERROR_MESSAGE: &str = "internal server error";

/// Result type for HTTP handlers
pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug)]
pub enum ApiError {
    /// The path id does not have the identifier shape
    MalformedIdentifier(String),
    /// A field failed validation; carries the client-facing message
    ValidationFailure(String),
    /// The request body was not a usable JSON object
    MalformedBody(String),
    /// Anything else; detail stays in the server log
    Unhandled(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MalformedIdentifier(_)
            | ApiError::ValidationFailure(_)
            | ApiError::MalformedBody(_) => StatusCode::BAD_REQUEST,
            ApiError::Unhandled(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The message logged server-side.
    pub fn log_message(&self) -> &str {
        match self {
            ApiError::MalformedIdentifier(message)
            | ApiError::ValidationFailure(message)
            | ApiError::MalformedBody(message)
            | ApiError::Unhandled(message) => message,
        }
    }

    /// The message sent to the client.
    pub fn client_message(&self) -> &str {
        match self {
            ApiError::MalformedIdentifier(_) => MALFORMED_ID_MESSAGE,
            ApiError::ValidationFailure(message) => message,
            ApiError::MalformedBody(_) => MALFORMED_BODY_MESSAGE,
            ApiError::Unhandled(_) => INTERNAL_ERROR_MESSAGE,
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::MalformedIdentifier(e) => ApiError::MalformedIdentifier(e.to_string()),
            StoreError::ValidationFailure(e) => ApiError::ValidationFailure(e.to_string()),
            StoreError::Backend(message) => ApiError::Unhandled(message),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::MalformedBody(rejection.body_text())
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::error!(status = self.status_code().as_u16(), "{}", self.log_message());

        let status = self.status_code();
        let body = Json(ErrorResponse {
            error: self.client_message().to_string(),
        });
        (status, body).into_response()
    }
}
