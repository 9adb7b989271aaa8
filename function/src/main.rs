use std::sync::Arc;

use s3_http_function::{
    handler::FunctionHandler, object_storage::S3Connector, server, types::ProcessEnv,
};
use tracing_subscriber::{fmt, EnvFilter};

/// Ceiling for the per-invocation log level when `RUST_LOG` is not set
const DEFAULT_LOG_FILTER: &str = "info,s3_http_function=debug";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    // JSON for log shippers, plain text otherwise
    let json_logs = std::env::var("S3_HTTP_LOG_FORMAT")
        .is_ok_and(|format| format.eq_ignore_ascii_case("json"));
    if json_logs {
        fmt().json().with_env_filter(filter).init();
    } else {
        fmt().with_env_filter(filter).init();
    }

    // Configuration is resolved per invocation, so a bad setting fails requests
    // instead of the process
    let function_handler = Arc::new(FunctionHandler::new(
        Arc::new(ProcessEnv),
        S3Connector::default(),
    ));

    server::start(function_handler).await
}
