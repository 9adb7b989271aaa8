//! Static storage credentials
mod error;

use std::fmt;
use std::path::Path;

pub use error::{CredentialError, CredentialResult};

use crate::types::CredentialSource;

/// Access key pair used to sign storage requests
#[derive(Clone, PartialEq, Eq)]
pub struct StaticCredentials {
    access_key_id: String,
    secret_access_key: String,
}

impl StaticCredentials {
    /// Creates credentials from raw values, trimming surrounding whitespace
    ///
    /// # Errors
    ///
    /// Returns `CredentialError::Empty` if either value is blank
    pub fn new(access_key_id: &str, secret_access_key: &str) -> CredentialResult<Self> {
        let access_key_id = access_key_id.trim();
        if access_key_id.is_empty() {
            return Err(CredentialError::Empty("access key id"));
        }

        let secret_access_key = secret_access_key.trim();
        if secret_access_key.is_empty() {
            return Err(CredentialError::Empty("secret access key"));
        }

        Ok(Self {
            access_key_id: access_key_id.to_string(),
            secret_access_key: secret_access_key.to_string(),
        })
    }

    /// Access key id
    #[must_use]
    pub fn access_key_id(&self) -> &str {
        &self.access_key_id
    }

    /// Secret access key
    #[must_use]
    pub fn secret_access_key(&self) -> &str {
        &self.secret_access_key
    }
}

impl fmt::Debug for StaticCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticCredentials")
            .field("access_key_id", &"<redacted>")
            .field("secret_access_key", &"<redacted>")
            .finish()
    }
}

/// Acquires credentials from the configured source
///
/// # Errors
///
/// Returns `CredentialError::Unreadable` or `CredentialError::NotUtf8` if a secret file
/// cannot be used, and `CredentialError::Empty` if a value is blank after trimming
pub async fn load(source: &CredentialSource) -> CredentialResult<StaticCredentials> {
    match source {
        CredentialSource::FromFiles {
            access_key_id_path,
            secret_access_key_path,
        } => {
            let access_key_id = read_secret(access_key_id_path).await?;
            if access_key_id.trim().is_empty() {
                return Err(CredentialError::Empty("access key id"));
            }

            let secret_access_key = read_secret(secret_access_key_path).await?;
            StaticCredentials::new(&access_key_id, &secret_access_key)
        }
        CredentialSource::FromEnv {
            access_key_id,
            secret_access_key,
        } => StaticCredentials::new(access_key_id, secret_access_key),
    }
}

async fn read_secret(path: &Path) -> CredentialResult<String> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|source| CredentialError::Unreadable {
            path: path.to_path_buf(),
            source,
        })?;

    String::from_utf8(bytes).map_err(|_| CredentialError::NotUtf8 {
        path: path.to_path_buf(),
    })
}
