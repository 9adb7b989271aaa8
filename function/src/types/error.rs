//! Errors propagated out of an invocation

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use super::ConfigError;
use crate::{credentials::CredentialError, object_storage::StorageError};

/// Error envelope returned with a 500 response
#[derive(Debug, Serialize)]
struct ApiErrorResponse {
    error: ErrorBody,
}

/// Error body containing code and message
#[derive(Debug, Serialize)]
struct ErrorBody {
    /// Machine-readable error code
    code: &'static str,
    /// Human-readable error message
    message: String,
}

/// Failure of an invocation; always answered with HTTP 500
#[derive(Error, Debug)]
pub enum HandlerError {
    /// Configuration could not be resolved
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Credentials could not be acquired
    #[error(transparent)]
    Credentials(#[from] CredentialError),

    /// Client construction or the object fetch failed
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl HandlerError {
    /// Machine-readable error code
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Config(_) => "configuration_error",
            Self::Credentials(_) => "credentials_error",
            Self::Storage(StorageError::InvalidEndpoint { .. }) => "client_error",
            Self::Storage(_) => "storage_error",
        }
    }

    fn message(&self) -> String {
        match self {
            // Names the offending variable, never a value
            Self::Config(err) => err.to_string(),
            Self::Credentials(_) => "Storage credentials are unavailable".to_string(),
            Self::Storage(StorageError::InvalidEndpoint { .. }) => {
                "Storage client could not be created".to_string()
            }
            Self::Storage(_) => "Failed to fetch object".to_string(),
        }
    }
}

impl IntoResponse for HandlerError {
    fn into_response(self) -> Response {
        let body = ApiErrorResponse {
            error: ErrorBody {
                code: self.code(),
                message: self.message(),
            },
        };

        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}
