//! Conversation session core for rmchat.
//!
//! Mediates between a UI and the remote request manager:
//! - Identity and session-id tracking over an injected key-value store
//! - Request envelope construction
//! - HTTP transport with a bounded wait
//! - A tagged error type the UI can branch on

pub mod envelope;
pub mod session;
pub mod storage;
pub mod transport;
pub mod validation;

use async_trait::async_trait;
use chrono::{DateTime, Local};

pub use envelope::{CommandContext, EnvelopeMetadata, RequestEnvelope};
pub use session::{BusyFlag, ChatMeta, ConversationSession, Screen, SessionSettings};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
pub use transport::{default_user_agent, ClientConfig, RequestManagerClient};
pub use validation::is_valid_email;

/// Anything that can deliver a request envelope and produce the agent's reply.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    async fn send(&self, envelope: &RequestEnvelope) -> Result<AgentReply, ChatError>;
}

/// What the request manager answered for one chat turn.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AgentReply {
    pub content: String,
    pub session_id: String,
    pub request_id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Agent,
}

impl Role {
    pub fn label(self) -> &'static str {
        match self {
            Role::User => "You",
            Role::Agent => "Agent",
        }
    }
}

/// One transcript entry. Lives only in memory.
#[derive(Debug, Clone)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
    pub timestamp: DateTime<Local>,
}

impl ChatMessage {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            timestamp: Local::now(),
        }
    }

    /// `HH:MM` in local time.
    pub fn display_time(&self) -> String {
        self.timestamp.format("%H:%M").to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The email failed validation; nothing was sent.
    Validation,
    /// No identity is saved; the UI should return to the identity screen.
    MissingIdentity,
    /// Network failure before a response arrived.
    Transport,
    /// The wait bound elapsed.
    Timeout,
    /// Non-2xx response.
    Protocol,
    /// Response body was not JSON.
    Parse,
    /// Another request is still in flight.
    Busy,
    /// The persistent store could not be written.
    Storage,
}

/// A displayable failure, tagged with its kind.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ChatError {
    pub kind: ErrorKind,
    pub message: String,
    /// HTTP status for `Protocol` and `Parse` errors.
    pub status: Option<u16>,
}

impl ChatError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            status: None,
        }
    }

    pub fn validation() -> Self {
        Self::new(ErrorKind::Validation, "Please enter a valid email address.")
    }

    pub fn missing_identity() -> Self {
        Self::new(
            ErrorKind::MissingIdentity,
            "Missing session info. Please start again.",
        )
    }

    pub fn transport() -> Self {
        Self::new(
            ErrorKind::Transport,
            "Could not reach the request manager. Please try again.",
        )
    }

    pub fn timeout() -> Self {
        Self::new(
            ErrorKind::Timeout,
            "Request timed out: the agent is taking too long. Please try again.",
        )
    }

    pub fn protocol(status: u16, detail: &str) -> Self {
        Self {
            kind: ErrorKind::Protocol,
            message: format!("Request failed ({status}): {detail}"),
            status: Some(status),
        }
    }

    pub fn parse(status: u16, raw: &str) -> Self {
        let preview: String = raw.chars().take(300).collect();
        Self {
            kind: ErrorKind::Parse,
            message: format!("Non-JSON response ({status}): {preview}"),
            status: Some(status),
        }
    }

    pub fn busy() -> Self {
        Self::new(ErrorKind::Busy, "A request is already in flight.")
    }

    pub fn storage(err: rmchat_common::StoreError) -> Self {
        Self::new(
            ErrorKind::Storage,
            format!("Could not save session data: {err}"),
        )
    }
}
