//! Server settings endpoints.

use crate::client::PharoClient;
use crate::response::InteropResponse;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Settings API for the image server's own configuration (e.g. `stackSize`).
pub struct SettingsApi<'a> {
    client: &'a PharoClient,
}

impl<'a> SettingsApi<'a> {
    pub(crate) fn new(client: &'a PharoClient) -> Self {
        Self { client }
    }

    /// Read the current server settings.
    pub async fn get(&self) -> InteropResponse {
        self.client.get_plain("/get-settings").await
    }

    /// Merge `settings` into the server configuration. Unknown keys are kept
    /// by the server as custom entries.
    pub async fn apply(&self, settings: Map<String, Value>) -> InteropResponse {
        let request = ApplySettingsRequest { settings };
        self.client.post("/apply-settings", &request).await
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplySettingsRequest {
    pub settings: Map<String, Value>,
}
