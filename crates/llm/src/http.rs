//! Shared HTTP plumbing for the provider adapters.

use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use pipeline::LlmError;

/// Builds the client shared by one provider instance.
///
/// No request timeout is set: a call runs until the provider answers or the
/// connection fails.
pub(crate) fn build_client() -> Result<Client, LlmError> {
    Client::builder()
        .build()
        .map_err(|e| LlmError::Configuration {
            message: format!("could not build HTTP client: {e}"),
        })
}

/// Sends `request` once and decodes a successful JSON body into `R`.
pub(crate) async fn send_json<R: DeserializeOwned>(
    provider: &str,
    request: RequestBuilder,
) -> Result<R, LlmError> {
    let response = request.send().await.map_err(|e| LlmError::Unreachable {
        message: format!("{provider}: {e}"),
    })?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        warn!(provider, status = status.as_u16(), "Provider returned an error status");
        return Err(match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => LlmError::Authentication {
                message: format!("{provider}: {body}"),
            },
            _ => LlmError::Api {
                status: status.as_u16(),
                body,
            },
        });
    }

    let bytes = response.bytes().await.map_err(|e| LlmError::Unreachable {
        message: format!("{provider}: {e}"),
    })?;
    debug!(provider, bytes = bytes.len(), "Provider response received");

    serde_json::from_slice(&bytes).map_err(|e| LlmError::InvalidResponse {
        message: format!("{provider}: {e}"),
    })
}

/// Removes trailing slashes so paths can be appended with `/`.
pub(crate) fn normalize_base_url(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}
