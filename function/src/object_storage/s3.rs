//! S3-compatible object store backed by `aws-sdk-s3`

use std::time::Duration;

use async_trait::async_trait;
use aws_config::{retry::RetryConfig, timeout::TimeoutConfig, BehaviorVersion};
use aws_sdk_s3::{
    config::{Credentials, Region},
    Client as S3Client,
};
use http::uri::Authority;

use super::{ObjectStore, StorageConnector, StorageError, StorageResult, StoredObject};
use crate::{credentials::StaticCredentials, types::Configuration};

const OPERATION_TIMEOUT_SECS: u64 = 30;
const CREDENTIALS_PROVIDER_NAME: &str = "s3-http-function";

/// Builds authenticated S3 clients from an invocation's configuration
#[derive(Debug, Clone)]
pub struct S3Connector {
    operation_timeout: Duration,
}

impl S3Connector {
    /// Creates a connector whose clients give up on a request after `operation_timeout`
    #[must_use]
    pub const fn new(operation_timeout: Duration) -> Self {
        Self { operation_timeout }
    }
}

impl Default for S3Connector {
    fn default() -> Self {
        Self::new(Duration::from_secs(OPERATION_TIMEOUT_SECS))
    }
}

impl StorageConnector for S3Connector {
    type Store = S3ObjectStore;

    fn connect(
        &self,
        config: &Configuration,
        credentials: &StaticCredentials,
    ) -> StorageResult<S3ObjectStore> {
        let endpoint_url = endpoint_url(&config.endpoint, config.use_ssl)?;

        let credentials = Credentials::new(
            credentials.access_key_id(),
            credentials.secret_access_key(),
            None,
            None,
            CREDENTIALS_PROVIDER_NAME,
        );

        let timeout_config = TimeoutConfig::builder()
            .operation_timeout(self.operation_timeout)
            .build();

        let s3_config = aws_sdk_s3::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .endpoint_url(endpoint_url)
            .credentials_provider(credentials)
            .force_path_style(true)
            // Each invocation makes exactly one attempt
            .retry_config(RetryConfig::disabled())
            .timeout_config(timeout_config)
            .build();

        Ok(S3ObjectStore::new(S3Client::from_conf(s3_config)))
    }
}

/// Object store speaking the S3 API
#[derive(Debug, Clone)]
pub struct S3ObjectStore {
    client: S3Client,
}

impl S3ObjectStore {
    /// Wraps a pre-configured S3 client
    #[must_use]
    pub const fn new(client: S3Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn get_object(&self, bucket: &str, key: &str) -> StorageResult<StoredObject> {
        // An empty key would address the bucket itself
        if key.is_empty() {
            return Err(StorageError::InvalidKey(
                "Object name cannot be empty".to_string(),
            ));
        }

        let output = self
            .client
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await?;

        let content_type = output.content_type().map(ToString::to_string);
        let content = output
            .body
            .collect()
            .await
            .map_err(|e| StorageError::Read(e.to_string()))?
            .into_bytes()
            .to_vec();

        Ok(StoredObject {
            content,
            content_type,
        })
    }
}

/// Turns a `host[:port]` endpoint into a base URL
///
/// # Errors
///
/// Returns `StorageError::InvalidEndpoint` if the endpoint carries a scheme or a path,
/// or is not a valid authority
pub fn endpoint_url(endpoint: &str, use_ssl: bool) -> StorageResult<String> {
    let invalid = |reason: String| StorageError::InvalidEndpoint {
        endpoint: endpoint.to_string(),
        reason,
    };

    if endpoint.contains("://") {
        return Err(invalid("endpoint must not include a scheme".to_string()));
    }
    if endpoint.contains('/') {
        return Err(invalid("endpoint must not include a path".to_string()));
    }

    let authority = endpoint
        .parse::<Authority>()
        .map_err(|e| invalid(e.to_string()))?;
    let scheme = if use_ssl { "https" } else { "http" };

    Ok(format!("{scheme}://{authority}"))
}
