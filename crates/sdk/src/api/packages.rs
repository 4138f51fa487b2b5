//! Package listing and Tonel import/export endpoints.

use crate::client::PharoClient;
use crate::response::InteropResponse;
use serde::{Deserialize, Serialize};

/// Directory used for Tonel import/export when none is given.
pub const DEFAULT_TONEL_PATH: &str = "/tmp";

/// Packages API for browsing and moving packages.
pub struct PackagesApi<'a> {
    client: &'a PharoClient,
}

impl<'a> PackagesApi<'a> {
    pub(crate) fn new(client: &'a PharoClient) -> Self {
        Self { client }
    }

    /// List all packages in the image.
    pub async fn list(&self) -> InteropResponse {
        self.client.get_plain("/list-packages").await
    }

    /// List the classes defined in a package.
    pub async fn classes(&self, package_name: impl Into<String>) -> InteropResponse {
        self.client
            .get("/list-classes", &PackageRequest::new(package_name))
            .await
    }

    /// List the classes a package extends.
    pub async fn extended_classes(&self, package_name: impl Into<String>) -> InteropResponse {
        self.client
            .get("/list-extended-classes", &PackageRequest::new(package_name))
            .await
    }

    /// List the methods of a package as `Class>>#selector` strings.
    pub async fn methods(&self, package_name: impl Into<String>) -> InteropResponse {
        self.client
            .get("/list-methods", &PackageRequest::new(package_name))
            .await
    }

    /// Export a package in Tonel format to `request.path`.
    pub async fn export(&self, request: TonelRequest) -> InteropResponse {
        self.client.get("/export-package", &request).await
    }

    /// Import a Tonel package from `request.path`.
    pub async fn import(&self, request: TonelRequest) -> InteropResponse {
        self.client.get("/import-package", &request).await
    }
}

/// Arguments naming a single package.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageRequest {
    pub package_name: String,
}

impl PackageRequest {
    pub fn new(package_name: impl Into<String>) -> Self {
        Self {
            package_name: package_name.into(),
        }
    }
}

/// Arguments for Tonel export and import.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TonelRequest {
    pub package_name: String,
    #[serde(default = "default_tonel_path")]
    pub path: String,
}

impl TonelRequest {
    /// Request for `package_name` using the default `/tmp` directory.
    pub fn new(package_name: impl Into<String>) -> Self {
        Self {
            package_name: package_name.into(),
            path: default_tonel_path(),
        }
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }
}

fn default_tonel_path() -> String {
    DEFAULT_TONEL_PATH.to_string()
}
