//! Login handshakes producing the bearer token used by domain operations.
//!
//! The session moves from unauthenticated to authenticated only once the
//! handshake for the resolved deployment class completes.  Handshake results
//! are committed to the client in one place after every await, so a dropped
//! (cancelled) call never leaves a partially updated session behind.
use anyhow::Result;
use serde::Deserialize;
use serde::Serialize;

use khulnaclient_utils::inspect;
use khulnaclient_utils::EmptyResponse;
use khulnaclient_utils::InvalidResponse;

use crate::endpoints::Resolution;
use crate::endpoints::SaasEndpoints;
use crate::errors::AuthenticationFailed;

use super::Client;

/// Outcome of a login handshake, applied to the client atomically.
struct Handshake {
    /// Bearer token to authenticate subsequent requests with.
    token: String,

    /// Tenant-specific base URL discovered by the SaaS handshake, when known.
    base: Option<String>,
}

/// Login payload for on-premises installs.
#[derive(Serialize)]
struct CspLoginRequest<'a> {
    id: &'a str,
    password: &'a str,
}

/// Login response from on-premises installs.
#[derive(Deserialize)]
struct CspLoginResponse {
    token: String,
}

/// Signin payload for SaaS shards.
#[derive(Serialize)]
struct SaasSigninRequest<'a> {
    email: &'a str,
    password: &'a str,
}

/// Signin response from SaaS token-issuance hosts.
#[derive(Deserialize)]
struct SaasSigninResponse {
    data: SaasSigninData,
}

#[derive(Deserialize)]
struct SaasSigninData {
    token: String,
}

/// Environment discovery response from SaaS provisioning hosts.
#[derive(Deserialize)]
struct EnvsResponse {
    data: EnvsData,
}

#[derive(Deserialize)]
struct EnvsData {
    ese_url: String,
}

impl Client {
    /// Run the login handshake for the resolved deployment class.
    ///
    /// Returns the bearer token and the effective base URL for this session.
    /// May be called again at any time to force a fresh handshake, which
    /// overwrites the previous token and base URL.
    pub async fn authenticate(&mut self) -> Result<(String, String)> {
        let handshake = match &self.endpoints {
            Resolution::Csp => self.login_csp().await?,
            Resolution::Saas(endpoints) | Resolution::SaasDev(endpoints) => {
                self.login_saas(endpoints).await?
            }
        };
        self.token = Some(handshake.token.clone());
        if let Some(base) = handshake.base {
            self.base = base;
        }
        Ok((handshake.token, self.base.clone()))
    }

    /// Log into an on-premises install directly at the base URL.
    async fn login_csp(&self) -> Result<Handshake> {
        slog::debug!(
            self.logger, "logging into on-premises deployment";
            "url" => &self.base, "credentials" => ?self.credentials,
        );
        let payload = CspLoginRequest {
            id: self.credentials.identity(),
            password: self.credentials.secret(),
        };
        let url = format!("{}/api/v1/login", self.base);
        let request = self.client.post(url).json(&payload);
        let response = self.dispatch(request, None).await?;

        let status = response.status();
        let text = response.text().await?;
        if status != reqwest::StatusCode::OK {
            anyhow::bail!(AuthenticationFailed {
                status: status.as_u16(),
                response: text,
            });
        }
        let login: CspLoginResponse = serde_json::from_str(&text).map_err(|error| {
            let decode = InvalidResponse { response: text };
            anyhow::anyhow!(error).context(decode)
        })?;
        Ok(Handshake {
            token: login.token,
            base: None,
        })
    }

    /// Two-step handshake against a SaaS shard.
    ///
    /// Signs into the token-issuance host, then discovers the tenant service
    /// URL from the provisioning host.  A failed discovery is degraded but
    /// usable: the token is kept and requests continue against the configured
    /// base URL.
    async fn login_saas(&self, endpoints: &SaasEndpoints) -> Result<Handshake> {
        slog::debug!(
            self.logger, "signing into SaaS deployment";
            "url" => &endpoints.token_url, "credentials" => ?self.credentials,
        );
        let payload = SaasSigninRequest {
            email: self.credentials.identity(),
            password: self.credentials.secret(),
        };
        let url = format!("{}/v2/signin", endpoints.token_url);
        let request = self.client.post(url).json(&payload);
        let response = self.dispatch(request, None).await?;

        let status = response.status();
        let text = response.text().await?;
        if status != reqwest::StatusCode::OK {
            anyhow::bail!(AuthenticationFailed {
                status: status.as_u16(),
                response: text,
            });
        }
        let signin: SaasSigninResponse = serde_json::from_str(&text).map_err(|error| {
            let decode = InvalidResponse { response: text };
            anyhow::anyhow!(error).context(decode)
        })?;
        let token = signin.data.token;

        let base = match self.lookup_tenant_base(endpoints, &token).await {
            Ok(base) => Some(base),
            Err(error) => {
                slog::warn!(
                    self.logger,
                    "tenant service URL lookup failed, continuing with the configured base URL";
                    "url" => &endpoints.provisioning_url, "error" => %error,
                );
                None
            }
        };
        Ok(Handshake { token, base })
    }

    /// Discover the tenant-specific service URL from the provisioning host.
    async fn lookup_tenant_base(&self, endpoints: &SaasEndpoints, token: &str) -> Result<String> {
        let url = format!("{}/v1/envs", endpoints.provisioning_url);
        let request = self.client.get(url).bearer_auth(token);
        let response = self.dispatch(request, None).await?;
        match inspect::<EnvsResponse>(response).await? {
            None => anyhow::bail!(EmptyResponse),
            Some(envs) => Ok(format!("https://{}", envs.data.ese_url)),
        }
    }
}
