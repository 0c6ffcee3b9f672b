//! Workload runtime protection policy operations.
use anyhow::Result;
use reqwest::Method;
use serde::Deserialize;
use serde::Serialize;

use khulnaclient_utils::inspect;
use khulnaclient_utils::EmptyResponse;

use super::Client;

/// Runtime protection policy applied to workloads in scope.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct RuntimePolicy {
    pub name: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub author: String,

    #[serde(default)]
    pub application_scopes: Vec<String>,

    #[serde(default)]
    pub runtime_type: String,

    #[serde(default)]
    pub enabled: bool,

    #[serde(default)]
    pub enforce: bool,

    #[serde(default)]
    pub enforce_after_days: i64,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub created: String,

    #[serde(default)]
    pub audit_brute_force_login: bool,

    #[serde(default)]
    pub block_fileless_exec: bool,

    #[serde(default)]
    pub block_non_compliant_workloads: bool,

    #[serde(default)]
    pub block_non_k8s_containers: bool,

    #[serde(default)]
    pub enable_fork_guard: bool,

    #[serde(default)]
    pub fork_guard_process_limit: i64,

    #[serde(default)]
    pub enable_ip_reputation: bool,

    #[serde(default)]
    pub enable_port_scan_protection: bool,

    #[serde(default)]
    pub allowed_executables: AllowedExecutables,

    #[serde(default)]
    pub drift_prevention: DriftPrevention,
}

/// Executables workloads are allowed to run while the policy is enforced.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct AllowedExecutables {
    #[serde(default)]
    pub enabled: bool,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub allow_executables: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub allow_root_executables: Vec<String>,

    #[serde(default)]
    pub separate_executables: bool,
}

/// Container drift prevention controls.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct DriftPrevention {
    #[serde(default)]
    pub enabled: bool,

    #[serde(default)]
    pub exec_lockdown: bool,

    #[serde(default)]
    pub image_lockdown: bool,

    #[serde(default)]
    pub exec_lockdown_white_list: Vec<String>,
}

impl Client {
    /// Fetch a runtime policy by name.
    pub async fn get_runtime_policy(&self, name: &str) -> Result<RuntimePolicy> {
        let path = format!("/api/v2/runtime_policies/{}", name);
        let response = self.request(Method::GET, &path, None).await?;
        match inspect(response).await? {
            None => anyhow::bail!(EmptyResponse),
            Some(policy) => Ok(policy),
        }
    }

    /// Create a runtime policy.
    pub async fn create_runtime_policy(&self, policy: &RuntimePolicy) -> Result<()> {
        let body = serde_json::to_value(policy)?;
        let response = self
            .request(Method::POST, "/api/v2/runtime_policies", Some(body))
            .await?;
        inspect::<serde_json::Value>(response).await?;
        Ok(())
    }

    /// Update an existing runtime policy.
    pub async fn update_runtime_policy(&self, policy: &RuntimePolicy) -> Result<()> {
        let path = format!("/api/v2/runtime_policies/{}", policy.name);
        let body = serde_json::to_value(policy)?;
        let response = self.request(Method::PUT, &path, Some(body)).await?;
        inspect::<serde_json::Value>(response).await?;
        Ok(())
    }

    /// Remove a runtime policy.
    pub async fn delete_runtime_policy(&self, name: &str) -> Result<()> {
        let path = format!("/api/v2/runtime_policies/{}", name);
        let response = self.request(Method::DELETE, &path, None).await?;
        inspect::<serde_json::Value>(response).await?;
        Ok(())
    }
}
