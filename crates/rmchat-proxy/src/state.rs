use std::path::PathBuf;
use std::time::Duration;

use rmchat_common::RmchatError;
use rmchat_config::ProxyConfig;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct ProxyState {
    pub http: reqwest::Client,
    /// Request manager base URL, without a trailing slash.
    pub upstream: String,
    pub static_dir: Option<PathBuf>,
}

impl ProxyState {
    pub fn new(
        upstream: &str,
        timeout: Duration,
        static_dir: Option<PathBuf>,
    ) -> Result<Self, RmchatError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RmchatError::Network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            upstream: upstream.trim_end_matches('/').to_string(),
            static_dir,
        })
    }

    pub fn from_config(config: &ProxyConfig) -> Result<Self, RmchatError> {
        Self::new(
            &config.upstream_url,
            Duration::from_secs(config.upstream_timeout_secs),
            config.static_dir.as_deref().map(PathBuf::from),
        )
    }

    /// Upstream URL for `/api/<path>`, keeping the query string.
    pub fn target_url(&self, path: &str, query: Option<&str>) -> String {
        match query {
            Some(q) if !q.is_empty() => format!("{}/api/{path}?{q}", self.upstream),
            _ => format!("{}/api/{path}", self.upstream),
        }
    }
}
