//! Label management operations.
use anyhow::Result;
use reqwest::Method;
use serde::Deserialize;
use serde::Serialize;

use khulnaclient_utils::inspect;
use khulnaclient_utils::EmptyResponse;
use khulnaclient_utils::ResourceNotFound;

use super::Client;

/// A label attached to workloads and policies.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct Label {
    // Defaulted so the empty object some endpoints return for missing
    // labels still decodes and can be classified as absent.
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub created: String,

    #[serde(default)]
    pub author: String,
}

/// Collection envelope returned by the labels listing endpoint.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct Labels {
    #[serde(rename = "result")]
    pub labels: Vec<Label>,
}

impl Client {
    /// Fetch a single label by name.
    pub async fn get_label(&self, name: &str) -> Result<Label> {
        let path = format!("/api/v1/settings/labels/{}", name);
        let response = self.request(Method::GET, &path, None).await?;
        let label: Label = match inspect(response).await? {
            None => anyhow::bail!(EmptyResponse),
            Some(label) => label,
        };
        // The endpoint reports missing labels as an empty 200 object.
        if label.name.is_empty() {
            anyhow::bail!(ResourceNotFound);
        }
        Ok(label)
    }

    /// List all labels defined on the deployment.
    pub async fn list_labels(&self) -> Result<Labels> {
        let response = self
            .request(Method::GET, "/api/v2/settings/labels", None)
            .await?;
        match inspect(response).await? {
            None => anyhow::bail!(EmptyResponse),
            Some(labels) => Ok(labels),
        }
    }

    /// Create a label.
    pub async fn create_label(&self, label: &Label) -> Result<()> {
        let body = serde_json::to_value(label)?;
        let response = self
            .request(Method::POST, "/api/v1/settings/labels", Some(body))
            .await?;
        inspect::<serde_json::Value>(response).await?;
        Ok(())
    }

    /// Update an existing label.
    pub async fn update_label(&self, label: &Label) -> Result<()> {
        let path = format!("/api/v1/settings/labels/{}", label.name);
        let body = serde_json::to_value(label)?;
        let response = self.request(Method::PUT, &path, Some(body)).await?;
        inspect::<serde_json::Value>(response).await?;
        Ok(())
    }

    /// Remove a label.
    pub async fn delete_label(&self, name: &str) -> Result<()> {
        let path = format!("/api/v1/settings/labels/{}", name);
        let response = self.request(Method::DELETE, &path, None).await?;
        inspect::<serde_json::Value>(response).await?;
        Ok(())
    }
}
