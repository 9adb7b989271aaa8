//! Error types for object storage operations

use aws_sdk_s3::{
    error::{DisplayErrorContext, ProvideErrorMetadata, SdkError},
    operation::get_object::GetObjectError,
};
use thiserror::Error;

/// Result type for object storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors that can occur while talking to the object store
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// The configured endpoint cannot be turned into a client
    #[error("invalid storage endpoint {endpoint:?}: {reason}")]
    InvalidEndpoint {
        /// Endpoint as configured
        endpoint: String,
        /// Why it was rejected
        reason: String,
    },

    /// The object key was rejected before any request was sent
    #[error("invalid object name: {0}")]
    InvalidKey(String),

    /// The request never produced a service reply (connection, TLS, timeout)
    #[error("failed to open object: {0}")]
    Open(String),

    /// The store answered with an error code
    #[error("storage service error {}: {message}", .code.as_deref().unwrap_or("Unknown"))]
    Service {
        /// S3 error code, when the reply carried one
        code: Option<String>,
        /// Message from the reply
        message: String,
    },

    /// The object body failed while it was being read
    #[error("failed to read object body: {0}")]
    Read(String),
}

/// How a storage failure is reported to the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Credentials lack permission for the object
    AccessDenied,
    /// Bucket or key does not exist, or the bucket name is malformed
    NotFound,
    /// Anything else
    Internal,
}

impl ErrorClass {
    /// Classifies an S3 error code
    #[must_use]
    pub fn from_code(code: &str) -> Self {
        match code {
            "AccessDenied" => Self::AccessDenied,
            "NoSuchBucket" | "InvalidBucketName" | "NoSuchKey" => Self::NotFound,
            _ => Self::Internal,
        }
    }
}

impl StorageError {
    /// Creates a service error carrying an S3 error code
    #[must_use]
    pub fn service(code: &str, message: impl Into<String>) -> Self {
        Self::Service {
            code: Some(code.to_string()),
            message: message.into(),
        }
    }

    /// Classification of this error; only service replies can map below 500
    #[must_use]
    pub fn class(&self) -> ErrorClass {
        match self {
            Self::Service {
                code: Some(code), ..
            } => ErrorClass::from_code(code),
            _ => ErrorClass::Internal,
        }
    }
}

impl From<SdkError<GetObjectError>> for StorageError {
    fn from(error: SdkError<GetObjectError>) -> Self {
        match error {
            SdkError::ServiceError(err) => {
                let err = err.into_err();
                Self::Service {
                    code: err.code().map(ToString::to_string),
                    message: err.message().unwrap_or_default().to_string(),
                }
            }
            other => Self::Open(DisplayErrorContext(&other).to_string()),
        }
    }
}
