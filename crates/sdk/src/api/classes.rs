//! Class and method source endpoints.

use crate::client::PharoClient;
use crate::response::InteropResponse;
use serde::{Deserialize, Serialize};

/// Classes API for reading class definitions, comments and method sources.
pub struct ClassesApi<'a> {
    client: &'a PharoClient,
}

impl<'a> ClassesApi<'a> {
    pub(crate) fn new(client: &'a PharoClient) -> Self {
        Self { client }
    }

    /// Get the source code of a class.
    pub async fn source(&self, class_name: impl Into<String>) -> InteropResponse {
        let request = ClassRequest {
            class_name: class_name.into(),
        };
        self.client.get("/get-class-source", &request).await
    }

    /// Get the source code of one method.
    ///
    /// Class-side methods are addressed with a `"Foo class"` class name.
    pub async fn method_source(
        &self,
        class_name: impl Into<String>,
        method_name: impl Into<String>,
    ) -> InteropResponse {
        let request = MethodSourceRequest {
            class_name: class_name.into(),
            method_name: method_name.into(),
        };
        self.client.get("/get-method-source", &request).await
    }

    /// Get the comment of a class.
    pub async fn comment(&self, class_name: impl Into<String>) -> InteropResponse {
        let request = ClassRequest {
            class_name: class_name.into(),
        };
        self.client.get("/get-class-comment", &request).await
    }
}

/// Arguments naming a single class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassRequest {
    pub class_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodSourceRequest {
    pub class_name: String,
    pub method_name: String,
}
