//! Credentials used to log into a Khulnasoft deployment.
use anyhow::Result;

use crate::errors::CredentialsConflict;
use crate::errors::CredentialsMissing;

/// Marker written in place of secret values in any diagnostic output.
pub const REDACTED: &str = "[REDACTED]";

/// Exactly one credential kind used to log into a deployment.
///
/// The [`Debug`] implementation redacts secret fields so credentials can be
/// attached to log records without ever exposing the secret values.
#[derive(Clone)]
pub enum Credentials {
    /// Username and password login.
    UsernamePassword { username: String, password: String },

    /// API key pair, reused as identity/secret by the login handshakes.
    ApiKey { key_id: String, secret: String },
}

impl Credentials {
    /// Username and password credentials.
    pub fn username_password<S1, S2>(username: S1, password: S2) -> Credentials
    where
        S1: Into<String>,
        S2: Into<String>,
    {
        Credentials::UsernamePassword {
            username: username.into(),
            password: password.into(),
        }
    }

    /// API key pair credentials.
    pub fn api_key<S1, S2>(key_id: S1, secret: S2) -> Credentials
    where
        S1: Into<String>,
        S2: Into<String>,
    {
        Credentials::ApiKey {
            key_id: key_id.into(),
            secret: secret.into(),
        }
    }

    /// Build credentials from the optional fields of the provider configuration.
    ///
    /// The configuration surface offers both credential kinds as separate
    /// optional fields but exactly one complete pair must be provided.
    /// Violations are reported before any network call is attempted.
    pub fn from_provider_config(
        username: Option<String>,
        password: Option<String>,
        key_id: Option<String>,
        secret: Option<String>,
    ) -> Result<Credentials> {
        let user_pass = match (username, password) {
            (Some(username), Some(password)) => Some(Credentials::UsernamePassword {
                username,
                password,
            }),
            _ => None,
        };
        let api_key = match (key_id, secret) {
            (Some(key_id), Some(secret)) => Some(Credentials::ApiKey { key_id, secret }),
            _ => None,
        };
        match (user_pass, api_key) {
            (Some(_), Some(_)) => anyhow::bail!(CredentialsConflict),
            (Some(credentials), None) => Ok(credentials),
            (None, Some(credentials)) => Ok(credentials),
            (None, None) => anyhow::bail!(CredentialsMissing),
        }
    }

    /// Identity sent to the login endpoints.
    pub(crate) fn identity(&self) -> &str {
        match self {
            Credentials::UsernamePassword { username, .. } => username,
            Credentials::ApiKey { key_id, .. } => key_id,
        }
    }

    /// Secret paired with the identity, never to be logged.
    pub(crate) fn secret(&self) -> &str {
        match self {
            Credentials::UsernamePassword { password, .. } => password,
            Credentials::ApiKey { secret, .. } => secret,
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Credentials::UsernamePassword { username, .. } => f
                .debug_struct("UsernamePassword")
                .field("username", username)
                .field("password", &REDACTED)
                .finish(),
            Credentials::ApiKey { key_id, .. } => f
                .debug_struct("ApiKey")
                .field("key_id", key_id)
                .field("secret", &REDACTED)
                .finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Credentials;
    use crate::errors::CredentialsConflict;
    use crate::errors::CredentialsMissing;

    #[test]
    fn both_credential_kinds_conflict() {
        let error = Credentials::from_provider_config(
            Some("admin".into()),
            Some("password".into()),
            Some("key".into()),
            Some("secret".into()),
        )
        .expect_err("both kinds must be rejected");
        assert!(error.is::<CredentialsConflict>());
    }

    #[test]
    fn no_credentials_is_an_error() {
        let error = Credentials::from_provider_config(None, None, None, None)
            .expect_err("missing credentials must be rejected");
        assert!(error.is::<CredentialsMissing>());
    }

    #[test]
    fn incomplete_pair_is_missing() {
        let error = Credentials::from_provider_config(Some("admin".into()), None, None, None)
            .expect_err("username without password must be rejected");
        assert!(error.is::<CredentialsMissing>());
    }

    #[test]
    fn username_password_pair_is_accepted() {
        let credentials = Credentials::from_provider_config(
            Some("admin".into()),
            Some("password".into()),
            None,
            None,
        )
        .expect("pair must be accepted");
        assert_eq!(credentials.identity(), "admin");
        assert_eq!(credentials.secret(), "password");
    }

    #[test]
    fn debug_redacts_secret_fields() {
        let credentials = Credentials::username_password("admin", "hunter2-secret");
        let debug = format!("{:?}", credentials);
        assert!(!debug.contains("hunter2-secret"));
        assert!(debug.contains(super::REDACTED));
        assert!(debug.contains("admin"));

        let credentials = Credentials::api_key("key-id", "api-secret-value");
        let debug = format!("{:?}", credentials);
        assert!(!debug.contains("api-secret-value"));
        assert!(debug.contains(super::REDACTED));
    }
}
