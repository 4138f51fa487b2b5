//! Code evaluation endpoint.

use crate::client::PharoClient;
use crate::response::InteropResponse;
use serde::{Deserialize, Serialize};

/// Code API for evaluating Smalltalk expressions.
pub struct CodeApi<'a> {
    client: &'a PharoClient,
}

impl<'a> CodeApi<'a> {
    pub(crate) fn new(client: &'a PharoClient) -> Self {
        Self { client }
    }

    /// Evaluate a Smalltalk expression and answer its printed result.
    pub async fn eval(&self, code: impl Into<String>) -> InteropResponse {
        let request = EvalRequest { code: code.into() };
        self.client.post("/eval", &request).await
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvalRequest {
    pub code: String,
}
