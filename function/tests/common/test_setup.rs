use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use axum::{body::Body, http::Request, response::Response, Router};
use http_body_util::BodyExt;
use s3_http_function::{
    handler::FunctionHandler,
    routes,
    types::{ACCESS_KEY_ID_SECRET, SECRET_ACCESS_KEY_SECRET},
};
use tempfile::TempDir;
use tower::ServiceExt;

use super::MemoryConnector;

/// Bucket every test context is configured with
pub const BUCKET: &str = "website";

/// Access key id written to the secret files
pub const FILE_ACCESS_KEY_ID: &str = "AKIDFROMFILE";

/// Secret access key written to the secret files
pub const FILE_SECRET_ACCESS_KEY: &str = "file-secret-value";

/// Initialize tracing for tests
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init()
        .ok();
}

/// Router wired to an in-memory store, with credentials mounted as secret files
pub struct TestContext {
    pub router: Router,
    pub connector: MemoryConnector,
    pub secrets_dir: TempDir,
}

impl TestContext {
    /// Context with the minimal valid configuration
    pub fn new() -> Self {
        Self::with_config(|_| {})
    }

    /// Context whose configuration variables are adjusted by `configure`
    pub fn with_config(configure: impl FnOnce(&mut HashMap<String, String>)) -> Self {
        setup_tracing();

        let secrets_dir = tempfile::tempdir().expect("Failed to create secrets dir");
        write_secret(secrets_dir.path(), ACCESS_KEY_ID_SECRET, FILE_ACCESS_KEY_ID);
        write_secret(
            secrets_dir.path(),
            SECRET_ACCESS_KEY_SECRET,
            FILE_SECRET_ACCESS_KEY,
        );

        let mut vars = HashMap::from([
            ("S3_HTTP_ENDPOINT".to_string(), "minio.local:9000".to_string()),
            ("S3_HTTP_BUCKET_NAME".to_string(), BUCKET.to_string()),
            (
                "S3_HTTP_SECRETS_PATH".to_string(),
                secrets_dir.path().display().to_string(),
            ),
        ]);
        configure(&mut vars);

        let connector = MemoryConnector::with_bucket(BUCKET);
        let function_handler = Arc::new(FunctionHandler::new(Arc::new(vars), connector.clone()));

        Self {
            router: routes::handler(function_handler),
            connector,
            secrets_dir,
        }
    }

    /// Overwrites one of the mounted secret files
    pub fn write_secret(&self, name: &str, value: &str) {
        write_secret(self.secrets_dir.path(), name, value);
    }

    /// Sends a GET request to the router
    pub async fn get(&self, uri: &str) -> Response {
        self.send(Request::get(uri).body(Body::empty()).unwrap())
            .await
    }

    /// Sends an arbitrary request to the router
    pub async fn send(&self, request: Request<Body>) -> Response {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("Router failed to respond")
    }
}

/// Writes a secret file
pub fn write_secret(dir: &Path, name: &str, value: &str) {
    std::fs::write(dir.join(name), value).expect("Failed to write secret");
}

/// Collects the response body
pub async fn body_bytes(response: Response) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

/// Parse response body to JSON
pub async fn parse_response_body(response: Response) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}
