//! Client configuration.

use crate::client::ApiClient;
use crate::transport::UreqTransport;

/// Base URL used when `SYSNE_API_URL` is not set.
pub const DEFAULT_API_URL: &str = "https://sysne-production.up.railway.app/";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
}

impl ApiConfig {
    /// Read configuration from the environment, loading `.env` first if one
    /// exists.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let base_url = lookup("SYSNE_API_URL")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        Self { base_url }
    }

    /// Build the shared client over a blocking HTTP transport.
    pub fn connect(&self) -> ApiClient<UreqTransport> {
        ApiClient::new(&self.base_url, UreqTransport::new())
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
        }
    }
}
