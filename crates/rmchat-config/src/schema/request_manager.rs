//! Request manager connection settings.

use serde::{Deserialize, Serialize};

/// Where the chat client sends its requests and how long it waits.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RequestManagerConfig {
    /// Base URL; `/api/v1/requests/generic` is appended.
    pub base_url: String,
    /// Maximum wait for a single chat request, in seconds.
    pub timeout_secs: u64,
    pub connect_timeout_secs: u64,
    /// Value sent as `metadata.client` in every request envelope.
    pub client_name: String,
}

impl Default for RequestManagerConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".into(),
            timeout_secs: 300,
            connect_timeout_secs: 10,
            client_name: "customer-webclient".into(),
        }
    }
}
