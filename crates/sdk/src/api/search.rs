//! Search endpoints over classes, methods, traits and references.

use crate::client::PharoClient;
use crate::response::InteropResponse;
use serde::{Deserialize, Serialize};

/// Search API.
pub struct SearchApi<'a> {
    client: &'a PharoClient,
}

impl<'a> SearchApi<'a> {
    pub(crate) fn new(client: &'a PharoClient) -> Self {
        Self { client }
    }

    /// Find classes whose name matches a pattern.
    pub async fn classes_like(&self, class_name_query: impl Into<String>) -> InteropResponse {
        let request = ClassNameQuery {
            class_name_query: class_name_query.into(),
        };
        self.client.get("/search-classes-like", &request).await
    }

    /// Find selectors matching a pattern.
    pub async fn methods_like(&self, method_name_query: impl Into<String>) -> InteropResponse {
        let request = MethodNameQuery {
            method_name_query: method_name_query.into(),
        };
        self.client.get("/search-methods-like", &request).await
    }

    /// Find traits whose name matches a pattern.
    pub async fn traits_like(&self, trait_name_query: impl Into<String>) -> InteropResponse {
        let request = TraitNameQuery {
            trait_name_query: trait_name_query.into(),
        };
        self.client.get("/search-traits-like", &request).await
    }

    /// Find every class implementing a selector.
    pub async fn implementors(&self, method_name: impl Into<String>) -> InteropResponse {
        let request = ImplementorsQuery {
            method_name: method_name.into(),
        };
        self.client.get("/search-implementors", &request).await
    }

    /// Find references to a selector or symbol.
    pub async fn references(&self, program_symbol: impl Into<String>) -> InteropResponse {
        let request = ReferencesQuery {
            program_symbol: program_symbol.into(),
        };
        self.client.get("/search-references", &request).await
    }

    /// Find methods referencing a class.
    pub async fn references_to_class(&self, class_name: impl Into<String>) -> InteropResponse {
        let request = ClassReferencesQuery {
            class_name: class_name.into(),
        };
        self.client.get("/search-references-to-class", &request).await
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassNameQuery {
    pub class_name_query: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodNameQuery {
    pub method_name_query: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraitNameQuery {
    pub trait_name_query: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImplementorsQuery {
    pub method_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferencesQuery {
    pub program_symbol: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassReferencesQuery {
    pub class_name: String,
}
