//! Metacello project installation.

use crate::client::PharoClient;
use crate::response::InteropResponse;
use serde::{Deserialize, Serialize};

/// Projects API.
pub struct ProjectsApi<'a> {
    client: &'a PharoClient,
}

impl<'a> ProjectsApi<'a> {
    pub(crate) fn new(client: &'a PharoClient) -> Self {
        Self { client }
    }

    /// Install a project with Metacello.
    pub async fn install(&self, request: InstallProjectRequest) -> InteropResponse {
        self.client.get("/install-project", &request).await
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstallProjectRequest {
    pub project_name: String,
    pub repository_url: String,
    /// Comma-separated Metacello groups; the baseline default when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub load_groups: Option<String>,
}

impl InstallProjectRequest {
    pub fn new(project_name: impl Into<String>, repository_url: impl Into<String>) -> Self {
        Self {
            project_name: project_name.into(),
            repository_url: repository_url.into(),
            load_groups: None,
        }
    }

    pub fn with_load_groups(mut self, load_groups: impl Into<String>) -> Self {
        self.load_groups = Some(load_groups.into());
        self
    }
}
