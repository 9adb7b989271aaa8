use std::sync::Arc;

use axum::{extract::RawQuery, Extension};

use crate::{
    handler::{FunctionHandler, FunctionRequest, FunctionResponse},
    object_storage::StorageConnector,
    types::HandlerError,
};

/// Invokes the function for any method and path
///
/// Only the raw query string is forwarded; it is used as the object key without
/// any decoding.
pub async fn invoke<C: StorageConnector>(
    Extension(function): Extension<Arc<FunctionHandler<C>>>,
    RawQuery(query): RawQuery,
) -> Result<FunctionResponse, HandlerError> {
    let request = FunctionRequest::new(query.unwrap_or_default());
    function.handle(&request).await
}
