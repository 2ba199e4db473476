//! rmchat configuration system.
//!
//! TOML-based configuration for the chat client and the web client proxy.
//! All sections use sensible defaults so partial configs work out of the box.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use rmchat_config::{load_config, config_to_json};
//!
//! let config = load_config(None).expect("failed to load config");
//! println!("{}", config_to_json(&config));
//! ```

pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use schema::{
    ChatConfig, LoggingConfig, ProxyConfig, RequestManagerConfig, RmchatConfig, StorageConfig,
    CONFIG_SCHEMA_VERSION,
};

use rmchat_common::ConfigError;
use std::path::Path;

/// Environment variable that overrides `proxy.upstream_url`.
pub const REQUEST_MANAGER_URL_ENV: &str = "REQUEST_MANAGER_URL";

/// Load, override from the environment, and validate.
///
/// With `path = None` the platform default is used (and created if missing).
/// An explicit path must exist.
pub fn load_config(path: Option<&Path>) -> Result<RmchatConfig, ConfigError> {
    let mut config = match path {
        Some(path) => toml_loader::load_from_path(path)?,
        None => toml_loader::load_default()?,
    };

    apply_env_overrides(&mut config, |key| std::env::var(key).ok());
    validation::validate(&config)?;
    Ok(config)
}

/// Apply environment overrides using `lookup` to read variables.
pub fn apply_env_overrides<F>(config: &mut RmchatConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = lookup(REQUEST_MANAGER_URL_ENV).filter(|u| !u.trim().is_empty()) {
        tracing::debug!(upstream = %url, "upstream url overridden from environment");
        config.proxy.upstream_url = url.trim().to_string();
    }
}

/// Serialize a config to a pretty-printed JSON string.
pub fn config_to_json(config: &RmchatConfig) -> String {
    serde_json::to_string_pretty(config)
        .unwrap_or_else(|e| format!("{{\"error\": \"failed to serialize config: {e}\"}}"))
}
