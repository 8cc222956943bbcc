//! Hello API Handler
//!
//! The greeting function. Unrelated to the empty-commit workflow.

use axum::body::Bytes;
use serde::Deserialize;

use crate::HELLO_FUNCTION;
use crate::api::error::{ApiError, ApiResult};
use crate::service::greeting;

#[derive(Debug, Default, Deserialize)]
struct HelloRequest {
    #[serde(default)]
    name: String,
}

/// ANY /hello
/// Greet the caller named in the JSON body
#[tracing::instrument(name = "invocation", skip_all, fields(function = HELLO_FUNCTION))]
pub async fn hello(body: Bytes) -> ApiResult<String> {
    tracing::info!("HelloHTTP function invoked");

    // A literal `null` body is treated like `{}`.
    let request = serde_json::from_slice::<Option<HelloRequest>>(&body)
        .map_err(|e| {
            tracing::warn!("Invalid JSON request: {}", e);
            ApiError::BadRequest("Invalid JSON request.".to_string())
        })?
        .unwrap_or_default();

    if request.name.is_empty() {
        tracing::info!("Hello request without name parameter");
    } else {
        tracing::info!(
            "Hello request with name: {}",
            greeting::escape_html(&request.name)
        );
    }

    Ok(greeting::greet(&request.name))
}
