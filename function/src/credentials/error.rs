//! Error types for credential loading

use std::path::PathBuf;

use thiserror::Error;

/// Result type for credential loading
pub type CredentialResult<T> = Result<T, CredentialError>;

/// Errors that can occur while acquiring the storage credentials
#[derive(Error, Debug)]
pub enum CredentialError {
    /// A secret file could not be read
    #[error("failed to read secret {}: {source}", .path.display())]
    Unreadable {
        /// Path of the secret file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A secret file does not contain UTF-8 text
    #[error("secret {} is not valid UTF-8", .path.display())]
    NotUtf8 {
        /// Path of the secret file
        path: PathBuf,
    },

    /// A credential is empty once surrounding whitespace is removed
    #[error("missing {0}")]
    Empty(&'static str),
}
