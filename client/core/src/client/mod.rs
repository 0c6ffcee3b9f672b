//! Implementation of the API client object, to keep files organised.
use std::time::Duration;

use anyhow::Result;
use reqwest::Client as ReqwestClient;
use reqwest::Method;
use reqwest::RequestBuilder;
use reqwest::Response;
use slog::Logger;

use khulnaclient_utils::ClientOptions;
use khulnaclient_utils::RequestFailed;

use crate::credentials::Credentials;
use crate::endpoints;
use crate::endpoints::Deployment;
use crate::endpoints::Resolution;
use crate::errors::EmptyBaseUrl;
use crate::errors::NotAuthenticated;
use crate::limits::RequestLimits;

mod labels;
mod runtime_policy;
mod session;

pub use self::labels::Label;
pub use self::labels::Labels;
pub use self::runtime_policy::AllowedExecutables;
pub use self::runtime_policy::DriftPrevention;
pub use self::runtime_policy::RuntimePolicy;

/// String to set as the user agent in HTTP request.
static CLIENT_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Async API client to a Khulnasoft deployment.
///
/// The client owns the session state for one provider process: the effective
/// base URL, the resolved deployment endpoints and the bearer token obtained
/// by [`Client::authenticate`].
///
/// Domain operations borrow the client immutably and may run concurrently.
/// Re-authentication takes `&mut self` so the borrow checker serialises it
/// against in-flight calls instead of leaving the race to callers.
pub struct Client {
    /// Effective base URL for API requests, rewritten once by the SaaS handshake.
    base: String,

    /// Low-level [`Client`](reqwest::Client) to perform HTTP requests with.
    client: ReqwestClient,

    /// Credentials used by the login handshake.
    credentials: Credentials,

    /// Resolved deployment class and paired SaaS hosts.
    endpoints: Resolution,

    /// Token bucket shared by all outbound calls from this client.
    limits: RequestLimits,

    /// Logger for client-side diagnostics.
    logger: Logger,

    /// Bearer token obtained by the login handshake.
    token: Option<String>,
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // The bearer token grants full API access and is never printed.
        let token = self.token.as_ref().map(|_| crate::credentials::REDACTED);
        f.debug_struct("Client")
            .field("base", &self.base)
            .field("credentials", &self.credentials)
            .field("endpoints", &self.endpoints)
            .field("token", &token)
            .finish_non_exhaustive()
    }
}

impl Client {
    /// Initialise a client with [`ClientOptions`] and exactly one credential kind.
    pub fn new<O>(options: O, credentials: Credentials) -> Result<Client>
    where
        O: Into<ClientOptions>,
    {
        let options = options.into();
        if options.address.is_empty() {
            anyhow::bail!(EmptyBaseUrl);
        }
        let client = options.client(CLIENT_USER_AGENT)?.build()?;
        let resolution = endpoints::resolve(&options.address);
        Ok(Client {
            base: options.address,
            client,
            credentials,
            endpoints: resolution,
            limits: RequestLimits::new(),
            logger: options.logger,
            token: None,
        })
    }

    /// Effective base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base
    }

    /// Deployment class resolved from the configured base URL.
    pub fn deployment(&self) -> Deployment {
        self.endpoints.deployment()
    }

    /// Replace the effective base URL for all subsequent requests.
    pub fn set_base_url<S>(&mut self, base: S)
    where
        S: Into<String>,
    {
        self.base = base.into();
    }

    /// Override the resolved deployment endpoints.
    ///
    /// Production shards are resolved automatically from the base URL; this
    /// is an escape hatch for nonstandard deployments and test harnesses.
    pub fn set_endpoints(&mut self, endpoints: Resolution) {
        self.endpoints = endpoints;
    }

    /// Inject a bearer token obtained out of band.
    ///
    /// Allows a harness to reuse one session across many operations without
    /// re-running the login handshake each time.
    pub fn set_token<S>(&mut self, token: S)
    where
        S: Into<String>,
    {
        self.token = Some(token.into());
    }

    /// Perform an authenticated request against the deployment.
    ///
    /// This is the entry point used by every domain operation: it fails fast
    /// when no login handshake has succeeded, waits for a rate limit slot and
    /// attaches the bearer token.  Retries are the caller's policy, never the
    /// client's.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<Response> {
        self.request_with_deadline(method, path, body, None).await
    }

    /// Perform an authenticated request, bounding the wait for a dispatch slot.
    pub async fn request_with_deadline(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
        deadline: Option<Duration>,
    ) -> Result<Response> {
        let token = match self.token.as_deref() {
            Some(token) => token,
            None => anyhow::bail!(NotAuthenticated),
        };
        slog::debug!(
            self.logger, "dispatching API request";
            "method" => %method, "path" => path,
        );
        let url = format!("{}{}", self.base, path);
        let mut request = self.client.request(method, url).bearer_auth(token);
        if let Some(body) = body {
            request = request.json(&body);
        }
        self.dispatch(request, deadline).await
    }

    /// Single chokepoint through which every outbound call flows.
    ///
    /// Acquires a rate limit slot before dispatching and wraps transport
    /// failures so callers can classify them.
    pub(crate) async fn dispatch(
        &self,
        request: RequestBuilder,
        deadline: Option<Duration>,
    ) -> Result<Response> {
        self.limits.acquire(deadline).await?;
        let request = request.build()?;
        let method = request.method().to_string();
        let url = request.url().to_string();
        self.client.execute(request).await.map_err(|error| {
            let context = RequestFailed { method, url };
            anyhow::anyhow!(error).context(context)
        })
    }
}
