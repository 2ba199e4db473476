//! Session struct, settings, and synchronous state access.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::Duration;

use rmchat_common::SessionId;
use tracing::{debug, info};

use crate::storage::{keys, KeyValueStore};
use crate::{ChatError, ChatMessage, ChatTransport};

use super::types::{BusyFlag, ChatMeta, Screen};

/// Fixed strings and limits a session runs with.
#[derive(Debug, Clone)]
pub struct SessionSettings {
    /// Sent silently on `start_chat` so the agent speaks first.
    pub greeting: String,
    /// Reserved content sent on `reset_conversation`.
    pub reset_command: String,
    /// `metadata.client` in every envelope.
    pub client_name: String,
    /// `metadata.user_agent` in every envelope.
    pub user_agent: String,
    /// Maximum wait for one request. `None` waits as long as the transport does.
    pub wait_bound: Option<Duration>,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            greeting: "Tell me how you can help".into(),
            reset_command: "reset".into(),
            client_name: "customer-webclient".into(),
            user_agent: crate::default_user_agent(),
            wait_bound: Some(Duration::from_secs(300)),
        }
    }
}

/// A conversation with the request manager.
pub struct ConversationSession {
    pub(super) store: Box<dyn KeyValueStore>,
    pub(super) transport: Box<dyn ChatTransport>,
    pub(super) settings: SessionSettings,
    /// Visible messages, oldest first.
    pub(super) transcript: Vec<ChatMessage>,
    pub(super) screen: Screen,
    /// Session id last reported by the server, for display.
    pub(super) server_session: String,
    /// Bumped every time the transcript is cleared.
    pub(super) generation: u64,
    pub(super) busy: Arc<AtomicBool>,
}

impl ConversationSession {
    pub fn new(store: Box<dyn KeyValueStore>, transport: Box<dyn ChatTransport>) -> Self {
        Self {
            store,
            transport,
            settings: SessionSettings::default(),
            transcript: Vec::new(),
            screen: Screen::Identity,
            server_session: String::new(),
            generation: 0,
            busy: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn with_settings(mut self, settings: SessionSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    /// The persisted identity, trimmed. `None` if unset or blank.
    pub fn saved_identity(&self) -> Option<String> {
        self.store
            .get(keys::EMAIL)
            .map(|e| e.trim().to_string())
            .filter(|e| !e.is_empty())
    }

    /// The persisted session id, if any.
    pub fn session_id(&self) -> Option<SessionId> {
        self.store
            .get(keys::SESSION_ID)
            .filter(|s| !s.is_empty())
            .map(SessionId::from)
    }

    /// Return to the identity screen. The saved identity is kept so the UI
    /// can pre-fill it.
    pub fn change_identity(&mut self) -> Option<String> {
        debug!("returning to identity screen");
        self.screen = Screen::Identity;
        self.saved_identity()
    }

    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    /// Changes whenever the transcript starts over, so a renderer can tell
    /// a fresh conversation from an appended one.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn meta(&self) -> ChatMeta {
        ChatMeta {
            email: self.saved_identity().unwrap_or_default(),
            session_id: self.server_session.clone(),
        }
    }

    pub fn is_busy(&self) -> bool {
        self.busy_flag().is_busy()
    }

    /// A cloneable handle for observing the busy state from elsewhere.
    pub fn busy_flag(&self) -> BusyFlag {
        BusyFlag(Arc::clone(&self.busy))
    }

    pub fn store(&self) -> &dyn KeyValueStore {
        self.store.as_ref()
    }

    pub(super) fn clear_transcript(&mut self) {
        self.transcript.clear();
        self.generation += 1;
    }

    /// Replace the session id with a fresh one and persist it.
    pub(super) fn rotate_session_id(&mut self) -> Result<SessionId, ChatError> {
        let previous = self.session_id();
        let next = SessionId::rotate(previous.as_ref());
        self.store
            .set(keys::SESSION_ID, next.as_str())
            .map_err(ChatError::storage)?;
        info!(session_id = %next, "rotated session id");
        Ok(next)
    }

    /// The persisted session id, creating one if none exists.
    pub(super) fn current_or_new_session_id(&mut self) -> Result<SessionId, ChatError> {
        match self.session_id() {
            Some(id) => Ok(id),
            None => self.rotate_session_id(),
        }
    }
}
