//! SUnit test runner endpoints.

use crate::client::PharoClient;
use crate::response::InteropResponse;
use serde::{Deserialize, Serialize};

/// Tests API for running SUnit tests inside the image.
pub struct TestsApi<'a> {
    client: &'a PharoClient,
}

impl<'a> TestsApi<'a> {
    pub(crate) fn new(client: &'a PharoClient) -> Self {
        Self { client }
    }

    /// Run every test case in a package.
    pub async fn run_package(&self, package_name: impl Into<String>) -> InteropResponse {
        let request = PackageTestRequest {
            package_name: package_name.into(),
        };
        self.client.get("/run-package-test", &request).await
    }

    /// Run one test class.
    pub async fn run_class(&self, class_name: impl Into<String>) -> InteropResponse {
        let request = ClassTestRequest {
            class_name: class_name.into(),
        };
        self.client.get("/run-class-test", &request).await
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageTestRequest {
    pub package_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassTestRequest {
    pub class_name: String,
}
