//! S3 HTTP function
//!
//! Serves a single object from an S3-compatible bucket per request, using the raw
//! query string as the object key and falling back to a default page.

#![deny(clippy::all, clippy::pedantic, clippy::nursery)]
#![warn(missing_docs)]

/// Static storage credentials
pub mod credentials;

/// Per-invocation request handling
pub mod handler;

/// Object storage access
pub mod object_storage;

/// HTTP routes
pub mod routes;

/// HTTP server
pub mod server;

/// Configuration, logging and error types
pub mod types;
