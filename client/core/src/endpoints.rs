//! Static resolution of configured base URLs to Khulnasoft deployments.
//!
//! Known SaaS shards are kept as data rather than branching logic so new
//! shards are a table change, not a code change.

/// Deployment class designated by a configured base URL.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Deployment {
    /// On-premises (CSP) installation, reached directly at the base URL.
    Csp,

    /// Hosted SaaS shard.
    Saas,

    /// Hosted SaaS development shard.
    SaasDev,
}

/// Token-issuance and provisioning hosts paired with a SaaS shard.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SaasEndpoints {
    /// Host the login handshake is performed against.
    pub token_url: String,

    /// Host the tenant service URL is discovered from.
    pub provisioning_url: String,
}

/// Result of classifying a base URL against the shard table.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Resolution {
    /// The base URL is an on-premises install.
    Csp,

    /// The base URL is a hosted SaaS shard.
    Saas(SaasEndpoints),

    /// The base URL is a hosted SaaS development shard.
    SaasDev(SaasEndpoints),
}

impl Resolution {
    /// Deployment class of this resolution.
    pub fn deployment(&self) -> Deployment {
        match self {
            Resolution::Csp => Deployment::Csp,
            Resolution::Saas(_) => Deployment::Saas,
            Resolution::SaasDev(_) => Deployment::SaasDev,
        }
    }
}

/// A known SaaS shard and its paired hosts.
struct Shard {
    base: &'static str,
    deployment: Deployment,
    token_url: &'static str,
    provisioning_url: &'static str,
}

/// Table of known SaaS shards, keyed by exact base URL match.
const SHARDS: &[Shard] = &[
    Shard {
        base: "https://cloud.khulnasoft.com",
        deployment: Deployment::Saas,
        token_url: "https://api.cloudsploit.com",
        provisioning_url: "https://prov.cloud.khulnasoft.com",
    },
    Shard {
        base: "https://eu-1.cloud.khulnasoft.com",
        deployment: Deployment::Saas,
        token_url: "https://eu-1.api.cloudsploit.com",
        provisioning_url: "https://prov-eu-1.cloud.khulnasoft.com",
    },
    Shard {
        base: "https://asia-1.cloud.khulnasoft.com",
        deployment: Deployment::Saas,
        token_url: "https://asia-1.api.cloudsploit.com",
        provisioning_url: "https://prov-asia-1.cloud.khulnasoft.com",
    },
    Shard {
        base: "https://asia-2.cloud.khulnasoft.com",
        deployment: Deployment::Saas,
        token_url: "https://asia-2.api.cloudsploit.com",
        provisioning_url: "https://prov-asia-2.cloud.khulnasoft.com",
    },
    Shard {
        base: "https://cloud-dev.khulnasoft.com",
        deployment: Deployment::SaasDev,
        token_url: "https://stage.api.cloudsploit.com",
        provisioning_url: "https://prov-dev.cloud.khulnasoft.com",
    },
];

/// Classify a base URL against the table of known SaaS shards.
///
/// URLs not in the table are valid on-premises installs, never errors.
pub fn resolve(base_url: &str) -> Resolution {
    for shard in SHARDS {
        if shard.base != base_url {
            continue;
        }
        let endpoints = SaasEndpoints {
            token_url: shard.token_url.to_string(),
            provisioning_url: shard.provisioning_url.to_string(),
        };
        return match shard.deployment {
            Deployment::Saas => Resolution::Saas(endpoints),
            Deployment::SaasDev => Resolution::SaasDev(endpoints),
            Deployment::Csp => Resolution::Csp,
        };
    }
    Resolution::Csp
}
