//! Transport-level errors and their HTTP mapping.
//!
//! Every failure a handler or the auth gate can produce goes through
//! [`ApiError`]. `IntoResponse` is the single table from error kind to
//! status code; every body has the shape `{"error": "..."}`.

use axum::{
    extract::rejection::JsonRejection,
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::auth::AuthError;
use crate::tagging::ModelError;

/// Message returned when `name` or `description` is missing.
pub const VALIDATION_MESSAGE: &str = "Name and description are required";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Required fields missing or blank. `legacy_status` keeps the 200 that
    /// older clients expect.
    #[error("Name and description are required")]
    Validation { legacy_status: bool },

    /// Body is not JSON, has the wrong content type, or has wrong field types.
    #[error("malformed request body: {0}")]
    MalformedBody(#[from] JsonRejection),

    #[error(transparent)]
    Model(#[from] ModelError),
}

/// Error response JSON.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Auth(_) => StatusCode::UNAUTHORIZED,
            ApiError::Validation { legacy_status: true } => StatusCode::OK,
            ApiError::Validation { legacy_status: false } => StatusCode::BAD_REQUEST,
            ApiError::MalformedBody(rejection) => rejection.status(),
            ApiError::Model(ModelError::Timeout(_)) => StatusCode::GATEWAY_TIMEOUT,
            ApiError::Model(ModelError::Unavailable(_)) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Model(ModelError::MalformedReply(_)) => StatusCode::BAD_GATEWAY,
            ApiError::Model(ModelError::Configuration(_)) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Client-facing message. Upstream detail stays in the logs.
    fn message(&self) -> String {
        match self {
            ApiError::Auth(e) => e.to_string(),
            ApiError::Validation { .. } => VALIDATION_MESSAGE.to_string(),
            ApiError::MalformedBody(rejection) => rejection.body_text(),
            ApiError::Model(ModelError::Timeout(_)) => {
                "Language model did not respond in time".to_string()
            }
            ApiError::Model(ModelError::Unavailable(_)) => {
                "Language model is unavailable".to_string()
            }
            ApiError::Model(ModelError::MalformedReply(_)) => {
                "Language model returned an unusable reply".to_string()
            }
            ApiError::Model(ModelError::Configuration(_)) => "Internal server error".to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorBody {
            error: self.message(),
        };

        let mut response = (status, Json(body)).into_response();
        if let ApiError::Auth(_) = self {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }
        response
    }
}
