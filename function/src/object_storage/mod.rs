//! Object storage access
//!
//! The handler only sees the [`ObjectStore`] and [`StorageConnector`] traits, so the
//! S3 implementation can be swapped for an in-memory store in tests.
mod error;
mod s3;

use async_trait::async_trait;

pub use error::{ErrorClass, StorageError, StorageResult};
pub use s3::{endpoint_url, S3Connector, S3ObjectStore};

use crate::{credentials::StaticCredentials, types::Configuration};

/// Object content fetched from the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    /// Entire object body
    pub content: Vec<u8>,
    /// Content type recorded with the object, if any
    pub content_type: Option<String>,
}

/// Read access to objects by bucket and key
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Fetches the whole object at `key` in `bucket`.
    ///
    /// The body stream is consumed and released before this returns, whatever the
    /// outcome.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::InvalidKey` if `key` is empty,
    /// `StorageError::Open` if the request cannot be completed,
    /// `StorageError::Service` if the store replies with an error code and
    /// `StorageError::Read` if the body fails mid-stream
    async fn get_object(&self, bucket: &str, key: &str) -> StorageResult<StoredObject>;
}

/// Builds an authenticated store handle for one invocation
pub trait StorageConnector: Send + Sync + 'static {
    /// Store type produced by this connector
    type Store: ObjectStore;

    /// Creates a store handle from the resolved configuration and credentials
    ///
    /// # Errors
    ///
    /// Returns `StorageError::InvalidEndpoint` if the configured endpoint is unusable
    fn connect(
        &self,
        config: &Configuration,
        credentials: &StaticCredentials,
    ) -> StorageResult<Self::Store>;
}
