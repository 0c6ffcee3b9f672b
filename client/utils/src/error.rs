//! Errors encountered during API requests or reported by the remote server.
use anyhow::Result;
use reqwest::Response;
use serde::de::DeserializeOwned;
use serde::Deserialize;

/// The remote API rejected the request.
///
/// The message is taken from the remote error envelope when the response body
/// parses as one, otherwise the raw body is carried verbatim.
#[derive(Debug, thiserror::Error)]
#[error("API request failed with status {status}: {message}")]
pub struct ApiError {
    /// HTTP status code returned by the remote endpoint.
    pub status: u16,

    /// Message reported by the remote endpoint.
    pub message: String,
}

/// The server returned an empty API response.
#[derive(Debug, thiserror::Error)]
#[error("the server returned an empty API response")]
pub struct EmptyResponse;

/// Invalid API response received.
#[derive(Debug, thiserror::Error)]
#[error("invalid API response received: {response}")]
pub struct InvalidResponse {
    pub response: String,
}

/// The HTTP request could not be delivered to the remote endpoint.
#[derive(Debug, thiserror::Error)]
#[error("{method} request to {url} could not be delivered")]
pub struct RequestFailed {
    pub method: String,
    pub url: String,
}

/// The resource is not available, or access to it is restricted.
#[derive(Debug, thiserror::Error)]
#[error("the resource is not available, or access to it is restricted")]
pub struct ResourceNotFound;

/// Error envelope returned by Khulnasoft endpoints on failure.
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    message: String,
}

/// Decode the body of an HTTP response and correctly handle errors in the process.
pub async fn inspect<T>(response: Response) -> Result<Option<T>>
where
    T: DeserializeOwned,
{
    let code = response.status();
    let text = response.text().await?;

    // A 404 means the resource is gone, which callers may treat as non-fatal.
    if matches!(code, reqwest::StatusCode::NOT_FOUND) {
        anyhow::bail!(ResourceNotFound);
    }

    // On error, extract the message from the remote error envelope when possible.
    if code.is_client_error() || code.is_server_error() {
        let message = match serde_json::from_str::<ErrorEnvelope>(&text) {
            Ok(envelope) => envelope.message,
            Err(_) => text,
        };
        let status = code.as_u16();
        anyhow::bail!(ApiError { status, message });
    }

    // On success decode the payload, if any, into the requested type.
    if text.is_empty() {
        return Ok(None);
    }
    serde_json::from_str::<T>(&text)
        .map_err(|error| {
            let decode = InvalidResponse { response: text };
            anyhow::anyhow!(error).context(decode)
        })
        .map(Some)
}
