//! Request manager client configuration.

use std::time::Duration;

pub(crate) const GENERIC_REQUEST_PATH: &str = "/api/v1/requests/generic";

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    /// Overall bound on one request, including reading the body.
    pub timeout: Duration,
    pub connect_timeout: Duration,
    pub user_agent: String,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Duration::from_secs(300),
            connect_timeout: Duration::from_secs(10),
            user_agent: default_user_agent(),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Full URL of the generic request endpoint.
    pub fn endpoint(&self) -> String {
        format!(
            "{}{GENERIC_REQUEST_PATH}",
            self.base_url.trim_end_matches('/')
        )
    }
}

/// `rmchat/<version>`, also used as `metadata.user_agent`.
pub fn default_user_agent() -> String {
    format!("rmchat/{}", env!("CARGO_PKG_VERSION"))
}
