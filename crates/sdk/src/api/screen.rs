//! UI inspection endpoint.

use crate::client::PharoClient;
use crate::response::InteropResponse;
use serde::{Deserialize, Serialize};

/// Screen API.
pub struct ScreenApi<'a> {
    client: &'a PharoClient,
}

impl<'a> ScreenApi<'a> {
    pub(crate) fn new(client: &'a PharoClient) -> Self {
        Self { client }
    }

    /// Describe the UI tree of the image, optionally with a PNG screenshot.
    ///
    /// The screenshot is written by the image itself; the answer carries its path.
    pub async fn read(&self, request: ReadScreenRequest) -> InteropResponse {
        self.client.get("/read-screen", &request).await
    }
}

/// Default UI framework to inspect: morphs in the World.
pub const DEFAULT_SCREEN_TARGET: &str = "world";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadScreenRequest {
    /// `world`, `spec` or `roassal`; forwarded as given.
    #[serde(default = "default_screen_target")]
    pub target_type: String,
    #[serde(default = "default_capture_screenshot")]
    pub capture_screenshot: bool,
}

impl Default for ReadScreenRequest {
    fn default() -> Self {
        Self {
            target_type: default_screen_target(),
            capture_screenshot: default_capture_screenshot(),
        }
    }
}

fn default_screen_target() -> String {
    DEFAULT_SCREEN_TARGET.to_string()
}

fn default_capture_screenshot() -> bool {
    true
}
