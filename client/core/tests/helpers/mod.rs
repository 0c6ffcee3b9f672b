//! Shared helpers for client integration tests.
#![allow(dead_code)]

use std::sync::Arc;
use std::sync::Mutex;

use slog::Drain;
use slog::Logger;

use khulnasoft_client::endpoints::Resolution;
use khulnasoft_client::endpoints::SaasEndpoints;
use khulnasoft_client::Client;
use khulnasoft_client::ClientOptions;
use khulnasoft_client::Credentials;

/// Username used by the test credentials.
pub const USERNAME: &str = "admin";

/// Password used by the test credentials, asserted absent from logs.
pub const PASSWORD: &str = "hunter2-secret";

/// Client pointing at the given base URL with username/password credentials.
pub fn csp_client(base: &str) -> Client {
    let options = ClientOptions::url(base).client();
    let credentials = Credentials::username_password(USERNAME, PASSWORD);
    Client::new(options, credentials).expect("client must initialise")
}

/// Client with a logger attached, for log inspection tests.
pub fn csp_client_with_logger(base: &str, logger: Logger) -> Client {
    let options = ClientOptions::url(base).logger(logger).client();
    let credentials = Credentials::username_password(USERNAME, PASSWORD);
    Client::new(options, credentials).expect("client must initialise")
}

/// Client forced onto the SaaS handshake against the given mock hosts.
pub fn saas_client(base: &str, token_url: &str, provisioning_url: &str) -> Client {
    let mut client = csp_client(base);
    client.set_endpoints(Resolution::Saas(SaasEndpoints {
        token_url: token_url.to_string(),
        provisioning_url: provisioning_url.to_string(),
    }));
    client
}

/// Drain capturing rendered log records for assertions.
#[derive(Clone)]
pub struct CaptureDrain {
    lines: Arc<Mutex<Vec<String>>>,
}

impl CaptureDrain {
    pub fn new() -> CaptureDrain {
        CaptureDrain {
            lines: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Root logger writing to this drain.
    pub fn logger(&self) -> Logger {
        Logger::root(self.clone().fuse(), slog::o!())
    }

    /// All captured lines, message and key/value pairs included.
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().expect("capture drain poisoned").clone()
    }

    /// Check if any captured line contains the given needle.
    pub fn contains(&self, needle: &str) -> bool {
        self.lines().iter().any(|line| line.contains(needle))
    }
}

impl Drain for CaptureDrain {
    type Ok = ();
    type Err = slog::Never;

    fn log(
        &self,
        record: &slog::Record<'_>,
        values: &slog::OwnedKVList,
    ) -> Result<Self::Ok, Self::Err> {
        let mut line = format!("{}", record.msg());
        let mut serializer = LineSerializer(&mut line);
        let _ = slog::KV::serialize(&record.kv(), record, &mut serializer);
        let _ = slog::KV::serialize(values, record, &mut serializer);
        self.lines
            .lock()
            .expect("capture drain poisoned")
            .push(line);
        Ok(())
    }
}

struct LineSerializer<'a>(&'a mut String);

impl slog::Serializer for LineSerializer<'_> {
    fn emit_arguments(&mut self, key: slog::Key, value: &std::fmt::Arguments<'_>) -> slog::Result {
        use std::fmt::Write;
        write!(self.0, " {}={}", key, value).map_err(slog::Error::Fmt)
    }
}
