//! Async client library to interact with Khulnasoft platform deployments.
//!
//! The client hides the differences between deployment classes behind one
//! interface: on-premises (CSP) installs are logged into directly at the
//! configured base URL, while hosted SaaS shards require a two-step handshake
//! against the shard's token-issuance host followed by a tenant service URL
//! lookup against its provisioning host.
//!
//! Every outbound call flows through a single rate-limited gateway which
//! attaches the bearer token, the user agent and the TLS trust configured at
//! construction time.
pub use khulnaclient_utils::ClientOptions;
pub use khulnaclient_utils::ClientOptionsBuilder;

mod client;
mod credentials;
mod limits;

pub mod endpoints;
pub mod errors;

pub use self::client::AllowedExecutables;
pub use self::client::Client;
pub use self::client::DriftPrevention;
pub use self::client::Label;
pub use self::client::Labels;
pub use self::client::RuntimePolicy;
pub use self::credentials::Credentials;
pub use self::credentials::REDACTED;
