//! Configuration options for Khulnasoft HTTP(S) clients.
use std::time::Duration;

use anyhow::Result;
use reqwest::Certificate;
use reqwest::Client;
use reqwest::ClientBuilder;
use slog::Logger;

/// Options to initialise clients with.
///
/// Standard proxy environment variables (`HTTP_PROXY`, `HTTPS_PROXY`,
/// `NO_PROXY`) are resolved by [`reqwest`] once, when the client is built
/// from these options, and apply to every subsequent request.
pub struct ClientOptions {
    /// Address of the API server to connect to, without trailing slash.
    pub address: String,

    /// Logger for client-side diagnostics.
    pub logger: Logger,

    /// Timeout for requests made by the client.
    pub timeout: Duration,

    /// Timeout for new connections initialised by the client.
    pub timeout_connect: Duration,

    /// Additional root CA certificates, as a PEM bundle, to trust alongside system roots.
    pub tls_ca_bundle: Option<Vec<u8>>,

    /// Verify the TLS certificates presented by the remote server.
    pub tls_verify: bool,
}

impl ClientOptions {
    /// Configure a [`ClientBuilder`](reqwest::ClientBuilder) from these options.
    pub fn client(&self, user_agent: &str) -> Result<ClientBuilder> {
        let mut builder = Client::builder()
            .connect_timeout(self.timeout_connect)
            .timeout(self.timeout)
            .user_agent(user_agent);
        if !self.tls_verify {
            builder = builder.danger_accept_invalid_certs(true);
        }
        if let Some(bundle) = &self.tls_ca_bundle {
            for certificate in Certificate::from_pem_bundle(bundle)? {
                builder = builder.add_root_certificate(certificate);
            }
        }
        Ok(builder)
    }

    /// Define options for API clients.
    pub fn url<S>(address: S) -> ClientOptionsBuilder
    where
        S: Into<String>,
    {
        ClientOptionsBuilder {
            address: address.into(),
            logger: Logger::root(slog::Discard, slog::o!()),
            timeout: Duration::from_secs(30),
            timeout_connect: Duration::from_secs(1),
            tls_ca_bundle: None,
            tls_verify: true,
        }
    }
}

/// Incrementally build [`ClientOptions`] objects.
pub struct ClientOptionsBuilder {
    address: String,
    logger: Logger,
    timeout: Duration,
    timeout_connect: Duration,
    tls_ca_bundle: Option<Vec<u8>>,
    tls_verify: bool,
}

impl ClientOptionsBuilder {
    /// All options are set, get a usable options object.
    pub fn client(self) -> ClientOptions {
        self.into()
    }

    /// Set the logger to send client-side diagnostics to.
    pub fn logger(mut self, logger: Logger) -> Self {
        self.logger = logger;
        self
    }

    /// Set the timeout for requests made by the client.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the timeout for new connections initialised by the client.
    pub fn timeout_connect(mut self, timeout: Duration) -> Self {
        self.timeout_connect = timeout;
        self
    }

    /// Trust additional root CA certificates, provided as a PEM bundle.
    pub fn tls_ca_bundle<B>(mut self, bundle: B) -> Self
    where
        B: Into<Vec<u8>>,
    {
        self.tls_ca_bundle = Some(bundle.into());
        self
    }

    /// Enable or disable verification of remote TLS certificates.
    pub fn tls_verify(mut self, verify: bool) -> Self {
        self.tls_verify = verify;
        self
    }
}

impl From<ClientOptionsBuilder> for ClientOptions {
    fn from(value: ClientOptionsBuilder) -> Self {
        let mut address = value.address;
        while address.ends_with('/') {
            address.pop();
        }
        ClientOptions {
            address,
            logger: value.logger,
            timeout: value.timeout,
            timeout_connect: value.timeout_connect,
            tls_ca_bundle: value.tls_ca_bundle,
            tls_verify: value.tls_verify,
        }
    }
}
