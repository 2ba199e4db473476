//! Conversation session management.
//!
//! A `ConversationSession` owns the identity/session-id state (through an
//! injected store), the in-memory transcript and the current screen, and
//! runs one request at a time against a `ChatTransport`.

mod chat;
mod manager;
mod types;


pub use manager::{ConversationSession, SessionSettings};
pub use types::{BusyFlag, ChatMeta, Screen};
