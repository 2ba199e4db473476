//! Settings for the `rmchat-proxy` web client server.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProxyConfig {
    /// Socket address to bind.
    pub listen: String,
    /// Request manager the `/api/*` routes are forwarded to.
    pub upstream_url: String,
    /// Upstream chains can take minutes; keep this generous.
    pub upstream_timeout_secs: u64,
    /// Directory holding `index.html`, `main.js` and `styles.css`.
    pub static_dir: Option<String>,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            listen: "0.0.0.0:8080".into(),
            upstream_url: "http://self-service-agent-request-manager".into(),
            upstream_timeout_secs: 300,
            static_dir: None,
        }
    }
}
