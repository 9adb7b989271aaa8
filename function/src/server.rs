use std::{sync::Arc, time::Duration};

use axum::{http::StatusCode, Router};
use tokio::net::TcpListener;
use tokio::signal::ctrl_c;
#[cfg(unix)]
use tokio::signal::unix;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::{handler::FunctionHandler, object_storage::StorageConnector, routes};

/// Port the watchdog forwards invocations to
pub const DEFAULT_PORT: u16 = 8082;

const REQUEST_TIMEOUT_SECS: u64 = 60;

/// Router with request tracing and the request timeout applied
#[must_use]
pub fn app<C: StorageConnector>(function_handler: Arc<FunctionHandler<C>>) -> Router {
    routes::handler(function_handler)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(REQUEST_TIMEOUT_SECS),
        ))
}

/// Starts the server in front of the given function handler
///
/// # Errors
///
/// Returns an error if the server fails to start or bind to the port
pub async fn start<C: StorageConnector>(
    function_handler: Arc<FunctionHandler<C>>,
) -> anyhow::Result<()> {
    let router = app(function_handler);

    let addr = std::net::SocketAddr::from((
        [0, 0, 0, 0],
        std::env::var("PORT").map_or(Ok(DEFAULT_PORT), |p| p.parse())?,
    ));

    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("S3 HTTP function listening on http://{addr}");

    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(anyhow::Error::from)
}

/// Waits for SIGTERM or Ctrl+C
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
        } else {
            tracing::info!("Received Ctrl+C signal, shutting down");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match unix::signal(unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
                tracing::info!("Received SIGTERM signal, shutting down");
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
