use serde::{Deserialize, Serialize};

/// Persistent key-value store location.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Store file path. `None` uses `<data_dir>/rmchat/store.json`.
    pub path: Option<String>,
}
