// Typed clients for the remote back-office REST API
pub use backoffice_api::{BackofficeApi, HttpBackofficeApi};
pub use menu_api::{HttpMenuApi, MenuApi};
pub use order_api::{HttpOrderApi, OrderApi};
pub use rate_source::{HttpRateSource, RateSource};

mod backoffice_api;
mod menu_api;
mod order_api;
mod rate_source;

use serde::de::DeserializeOwned;
use tracing::Span;

use crate::models::{ApiError, ApiResult};

/// Span for an outbound call against the remote REST API, attributed the way
/// the trace backend groups client calls.
pub(crate) fn api_span(operation: &str, method: &str, url: &str) -> Span {
    tracing::info_span!(
        "backend_api",
        otel.name = format!("BackofficeApi.{}", operation),
        otel.kind = "client",
        http.method = method,
        http.url = url,
        http.status_code = tracing::field::Empty,
    )
}

/// Send a prepared request, mapping transport errors into the client taxonomy.
pub(crate) async fn send(
    endpoint: &str,
    request: reqwest::RequestBuilder,
) -> ApiResult<reqwest::Response> {
    request.send().await.map_err(|e| ApiError::Request {
        endpoint: endpoint.to_string(),
        message: e.to_string(),
    })
}

/// Reject non-2xx responses, carrying the response body for diagnostics.
pub(crate) async fn ensure_success(
    endpoint: &str,
    response: reqwest::Response,
) -> ApiResult<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(ApiError::Status {
        endpoint: endpoint.to_string(),
        status: status.as_u16(),
        body,
    })
}

/// Decode a JSON response body.
pub(crate) async fn decode_json<T: DeserializeOwned>(
    endpoint: &str,
    response: reqwest::Response,
) -> ApiResult<T> {
    response.json().await.map_err(|e| ApiError::Decode {
        endpoint: endpoint.to_string(),
        message: e.to_string(),
    })
}
