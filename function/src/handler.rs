//! Object fetch for a single function invocation

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header::CONTENT_TYPE, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use tracing::{debug, error, info, instrument, Level};

use crate::{
    credentials,
    object_storage::{ErrorClass, ObjectStore, StorageConnector, StoredObject},
    types::{ConfigSource, Configuration, HandlerError, InvocationLog},
};

/// Inbound request; only the raw query string is consulted
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FunctionRequest {
    /// Raw query string, used verbatim as the object key
    pub query_string: String,
}

impl FunctionRequest {
    /// Creates a request carrying `query_string`
    #[must_use]
    pub fn new(query_string: impl Into<String>) -> Self {
        Self {
            query_string: query_string.into(),
        }
    }
}

/// Outcome of a successful invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Response body; empty unless the object was found
    pub body: Vec<u8>,
    /// Content type recorded with the object
    pub content_type: Option<String>,
}

impl FunctionResponse {
    /// 200 with the object's content
    #[must_use]
    pub fn object(object: StoredObject) -> Self {
        Self {
            status: StatusCode::OK,
            body: object.content,
            content_type: object.content_type,
        }
    }

    /// Status without a body
    #[must_use]
    pub const fn empty(status: StatusCode) -> Self {
        Self {
            status,
            body: Vec::new(),
            content_type: None,
        }
    }
}

impl IntoResponse for FunctionResponse {
    fn into_response(self) -> Response {
        let mut response = (self.status, Body::from(self.body)).into_response();
        if let Some(value) = self
            .content_type
            .and_then(|content_type| HeaderValue::from_str(&content_type).ok())
        {
            response.headers_mut().insert(CONTENT_TYPE, value);
        }
        response
    }
}

/// Picks the object key for a request: the query string, or the default page
#[must_use]
pub fn resolve_object_key<'a>(query_string: &'a str, default_page: &'a str) -> &'a str {
    if query_string.is_empty() {
        default_page
    } else {
        query_string
    }
}

/// Serves objects from the configured bucket, one invocation at a time
pub struct FunctionHandler<C> {
    config_source: Arc<dyn ConfigSource>,
    connector: C,
}

impl<C: StorageConnector> FunctionHandler<C> {
    /// Creates a handler that resolves its configuration from `config_source` on every
    /// invocation and builds storage clients with `connector`
    #[must_use]
    pub fn new(config_source: Arc<dyn ConfigSource>, connector: C) -> Self {
        Self {
            config_source,
            connector,
        }
    }

    /// Handles one invocation
    ///
    /// Missing objects and denied access are regular responses (404 and 401); every
    /// other failure is returned as a `HandlerError`, which renders as a 500.
    ///
    /// # Errors
    ///
    /// Returns `HandlerError::Config` if the configuration is incomplete or malformed
    /// Returns `HandlerError::Credentials` if the credentials cannot be acquired
    /// Returns `HandlerError::Storage` if the client cannot be built or the fetch fails
    /// for a reason other than a missing object or denied access
    #[instrument(skip_all)]
    pub async fn handle(
        &self,
        request: &FunctionRequest,
    ) -> Result<FunctionResponse, HandlerError> {
        // No verbosity is known until the configuration resolves
        let config = Configuration::from_source(&*self.config_source)
            .inspect_err(|e| error!(error = %e, "Failed to resolve configuration"))?;
        let log = InvocationLog::new(config.log_level);

        let credentials = credentials::load(&config.credential_source)
            .await
            .inspect_err(|e| {
                if log.enabled(Level::ERROR) {
                    error!(error = %e, "Failed to load storage credentials");
                }
            })?;

        let store = self
            .connector
            .connect(&config, &credentials)
            .inspect_err(|e| {
                if log.enabled(Level::ERROR) {
                    error!(error = %e, "Failed to create storage client");
                }
            })?;

        if log.enabled(Level::INFO) {
            info!(
                endpoint = %config.endpoint,
                bucket = %config.bucket_name,
                secure = config.use_ssl,
                region = %config.region,
                "Storage client ready"
            );
        }

        let key = resolve_object_key(&request.query_string, &config.default_page);
        if log.enabled(Level::DEBUG) {
            if request.query_string.is_empty() {
                debug!("No page requested, using default page: '{key}'");
            } else {
                debug!("Requested page: '{key}'");
            }
        }

        fetch(&store, &config.bucket_name, key, log).await
    }
}

async fn fetch<S: ObjectStore>(
    store: &S,
    bucket: &str,
    key: &str,
    log: InvocationLog,
) -> Result<FunctionResponse, HandlerError> {
    match store.get_object(bucket, key).await {
        Ok(object) => Ok(FunctionResponse::object(object)),
        Err(err) => {
            if log.enabled(Level::ERROR) {
                error!(bucket, key, error = %err, "Failed to fetch object");
            }

            match err.class() {
                ErrorClass::AccessDenied => Ok(FunctionResponse::empty(StatusCode::UNAUTHORIZED)),
                ErrorClass::NotFound => Ok(FunctionResponse::empty(StatusCode::NOT_FOUND)),
                ErrorClass::Internal => Err(err.into()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_empty_query_wins() {
        assert_eq!(resolve_object_key("photo.png", "index.html"), "photo.png");
        assert_eq!(resolve_object_key("a b/c%20d?x", "index.html"), "a b/c%20d?x");
    }

    #[test]
    fn test_empty_query_uses_default_page() {
        assert_eq!(resolve_object_key("", "index.html"), "index.html");
        assert_eq!(resolve_object_key("", ""), "");
    }

    #[test]
    fn test_object_response_keeps_content_type() {
        let response = FunctionResponse::object(StoredObject {
            content: b"<html></html>".to_vec(),
            content_type: Some("text/html".to_string()),
        })
        .into_response();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[CONTENT_TYPE], "text/html");
    }

    #[test]
    fn test_empty_response_has_no_content_type() {
        let response = FunctionResponse::empty(StatusCode::NOT_FOUND).into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(response.headers().get(CONTENT_TYPE).is_none());
    }
}
