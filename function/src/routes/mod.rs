/// Function invocation route
pub mod function;

/// Health probe route
pub mod health;

use std::sync::Arc;

use axum::{routing::get, Extension, Router};

use crate::{handler::FunctionHandler, object_storage::StorageConnector};

/// Path polled by the watchdog to check the function is up
pub const HEALTH_PATH: &str = "/_/health";

/// Creates the router: the health probe, and the function behind every other route
pub fn handler<C: StorageConnector>(function_handler: Arc<FunctionHandler<C>>) -> Router {
    Router::new()
        .route(HEALTH_PATH, get(health::handler))
        .fallback(function::invoke::<C>)
        .layer(Extension(function_handler))
}
