//! SDK Configuration

use serde::{Deserialize, Serialize};

/// Default API base URL
pub const DEFAULT_BASE_URL: &str = "https://api.forms.expert/api/v1";

/// Configuration for the Forms Expert client.
///
/// The API key is passed as a `token` query parameter on every request,
/// scoped to the resource (tenant) identified by `resource_id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SdkConfig {
    /// API key for the resource
    pub api_key: String,
    /// Tenant/account identifier scoping all forms under the API key
    pub resource_id: String,
    /// API base URL (trailing slashes are stripped)
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl SdkConfig {
    /// Create a configuration with the default base URL
    pub fn new(api_key: impl Into<String>, resource_id: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            resource_id: resource_id.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Override the API base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Base URL with any trailing slash removed
    pub(crate) fn normalized_base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}
