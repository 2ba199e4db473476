//! Startup wiring: config, store, base URL, and the session itself.

use std::path::Path;
use std::time::Duration;

use rmchat_common::RmchatError;
use rmchat_config::RmchatConfig;
use rmchat_session::storage::keys;
use rmchat_session::{
    default_user_agent, ClientConfig, ConversationSession, FileStore, KeyValueStore,
    RequestManagerClient, SessionSettings,
};
use tracing::{info, warn};

use crate::cli::Args;

pub fn load_config(args: &Args) -> Result<RmchatConfig, RmchatError> {
    if let Some(ref path) = args.config {
        info!("Using config override: {path}");
    }
    Ok(rmchat_config::load_config(args.config.as_deref().map(Path::new))?)
}

/// Open the store from `--store`, then `storage.path`, then the platform default.
pub fn open_store(args: &Args, config: &RmchatConfig) -> Result<FileStore, RmchatError> {
    let store = match args.store.as_deref().or(config.storage.path.as_deref()) {
        Some(path) => FileStore::open(path)?,
        None => FileStore::open_default()?,
    };
    info!("Using store at {}", store.path().display());
    Ok(store)
}

/// Base URL precedence: CLI flag, then the stored value, then config.
pub fn resolve_base_url(
    cli: Option<&str>,
    store: &dyn KeyValueStore,
    config: &RmchatConfig,
) -> String {
    cli.map(str::trim)
        .filter(|u| !u.is_empty())
        .map(str::to_string)
        .or_else(|| {
            store
                .get(keys::BASE_URL)
                .map(|u| u.trim().to_string())
                .filter(|u| !u.is_empty())
        })
        .unwrap_or_else(|| config.request_manager.base_url.clone())
}

fn wait_bound(config: &RmchatConfig, timeout_override: Option<u64>) -> Duration {
    Duration::from_secs(
        timeout_override
            .filter(|t| *t > 0)
            .unwrap_or(config.request_manager.timeout_secs),
    )
}

pub fn client_config(
    base_url: &str,
    config: &RmchatConfig,
    timeout_override: Option<u64>,
) -> ClientConfig {
    ClientConfig::new(base_url)
        .with_timeout(wait_bound(config, timeout_override))
        .with_connect_timeout(Duration::from_secs(
            config.request_manager.connect_timeout_secs,
        ))
}

pub fn session_settings(config: &RmchatConfig, timeout_override: Option<u64>) -> SessionSettings {
    SessionSettings {
        greeting: config.chat.greeting.clone(),
        reset_command: config.chat.reset_command.clone(),
        client_name: config.request_manager.client_name.clone(),
        user_agent: default_user_agent(),
        wait_bound: Some(wait_bound(config, timeout_override)),
    }
}

/// Build a ready-to-use session from config and CLI arguments.
pub fn build_session(args: &Args, config: &RmchatConfig) -> Result<ConversationSession, RmchatError> {
    let mut store = open_store(args, config)?;

    let base_url = resolve_base_url(args.base_url.as_deref(), &store, config);
    if args.base_url.is_some() {
        if let Err(e) = store.set(keys::BASE_URL, &base_url) {
            warn!("Failed to remember base URL: {e}");
        }
    }
    info!("Request manager at {base_url}");

    let client = RequestManagerClient::new(client_config(&base_url, config, args.timeout))?;
    Ok(ConversationSession::new(Box::new(store), Box::new(client))
        .with_settings(session_settings(config, args.timeout)))
}
