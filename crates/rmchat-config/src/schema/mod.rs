//! Configuration schema types for rmchat.
//!
//! All structs use `serde(default)` so partial configs work correctly.

mod chat;
mod logging;
mod proxy;
mod request_manager;
mod storage;

pub use chat::*;
pub use logging::*;
pub use proxy::*;
pub use request_manager::*;
pub use storage::*;

use serde::{Deserialize, Serialize};

/// Current config schema version.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;

/// Root configuration for rmchat.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RmchatConfig {
    pub request_manager: RequestManagerConfig,
    pub chat: ChatConfig,
    pub storage: StorageConfig,
    pub proxy: ProxyConfig,
    pub logging: LoggingConfig,
}
