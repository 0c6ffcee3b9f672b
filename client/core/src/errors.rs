//! Errors reported while configuring or authenticating Khulnasoft clients.
//!
//! Classification errors raised by the response inspection layer are
//! re-exported here so callers have a single module to match against.
pub use khulnaclient_utils::ApiError;
pub use khulnaclient_utils::EmptyResponse;
pub use khulnaclient_utils::InvalidResponse;
pub use khulnaclient_utils::RequestFailed;
pub use khulnaclient_utils::ResourceNotFound;

/// Both username/password and API key credentials were provided.
#[derive(Debug, thiserror::Error)]
#[error("username/password and API key credentials are mutually exclusive")]
pub struct CredentialsConflict;

/// Neither username/password nor API key credentials were provided.
#[derive(Debug, thiserror::Error)]
#[error("either username/password or API key credentials must be provided")]
pub struct CredentialsMissing;

/// The configured base URL is empty.
#[derive(Debug, thiserror::Error)]
#[error("a base URL for the Khulnasoft deployment must be configured")]
pub struct EmptyBaseUrl;

/// The deployment rejected the login handshake.
#[derive(Debug, thiserror::Error)]
#[error("authentication failed with status {status}: {response}")]
pub struct AuthenticationFailed {
    /// HTTP status returned by the login endpoint.
    pub status: u16,

    /// Raw response body, kept for diagnostics.
    pub response: String,
}

/// An authenticated operation was attempted before a successful login handshake.
#[derive(Debug, thiserror::Error)]
#[error("no bearer token is available, authenticate the client first")]
pub struct NotAuthenticated;

/// The wait for a request dispatch slot was cancelled by the caller deadline.
#[derive(Debug, thiserror::Error)]
#[error("wait for a request dispatch slot was cancelled")]
pub struct WaitCancelled;
