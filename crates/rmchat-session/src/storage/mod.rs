//! Persistent key-value storage for identity and session metadata.
//!
//! The session manager only ever touches three keys, read and written
//! synchronously from the owning task.

mod file;
mod memory;

pub use file::{default_store_path, FileStore};
pub use memory::MemoryStore;

use rmchat_common::StoreError;

/// Keys written by rmchat.
pub mod keys {
    /// The saved identity (email).
    pub const EMAIL: &str = "rmchat.email";
    /// The active request-manager session identifier.
    pub const SESSION_ID: &str = "rmchat.session_id";
    /// The request manager base URL last used.
    pub const BASE_URL: &str = "rmchat.base_url";
}

/// Synchronous string key-value store.
pub trait KeyValueStore: Send {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}
