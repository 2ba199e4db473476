//! Async conversation operations for ConversationSession.

use tracing::{info, warn};

use crate::storage::keys;
use crate::validation::is_valid_email;
use crate::{AgentReply, ChatError, ChatMessage, RequestEnvelope, Role};

use super::manager::ConversationSession;
use super::types::{BusyGuard, Screen};

impl ConversationSession {
    /// Save the identity, open a fresh session and let the agent greet.
    ///
    /// The greeting trigger is not added to the transcript; only the agent's
    /// reply is, so the conversation appears agent-initiated.
    pub async fn start_chat(&mut self, email: &str) -> Result<AgentReply, ChatError> {
        let _guard = BusyGuard::acquire(&self.busy)?;

        let email = email.trim();
        if !is_valid_email(email) {
            return Err(ChatError::validation());
        }

        self.store
            .set(keys::EMAIL, email)
            .map_err(ChatError::storage)?;
        self.rotate_session_id()?;

        self.screen = Screen::Chat;
        self.clear_transcript();
        self.server_session.clear();
        info!(email, "chat started");

        let greeting = self.settings.greeting.clone();
        let reply = self.dispatch(email, &greeting).await?;
        self.record_reply(&reply);
        Ok(reply)
    }

    /// Send one user message. Returns `Ok(None)` for blank input, which is
    /// ignored without touching the transcript or the network.
    ///
    /// The user's message is appended before the request is sent and stays
    /// there if the request fails.
    pub async fn send_message(&mut self, text: &str) -> Result<Option<AgentReply>, ChatError> {
        let _guard = BusyGuard::acquire(&self.busy)?;
        let email = self.require_identity()?;

        let text = text.trim();
        if text.is_empty() {
            return Ok(None);
        }

        self.transcript.push(ChatMessage::new(Role::User, text));

        let reply = self.dispatch(&email, text).await?;
        self.record_reply(&reply);
        Ok(Some(reply))
    }

    /// Start over: new session id, empty transcript, and the reserved reset
    /// content sent so the server drops its conversation state.
    pub async fn reset_conversation(&mut self) -> Result<AgentReply, ChatError> {
        let _guard = BusyGuard::acquire(&self.busy)?;
        let email = self.require_identity()?;

        self.rotate_session_id()?;
        self.clear_transcript();
        info!(email = %email, "conversation reset");

        let reset = self.settings.reset_command.clone();
        self.transcript.push(ChatMessage::new(Role::User, reset.as_str()));

        let reply = self.dispatch(&email, &reset).await?;
        self.record_reply(&reply);
        Ok(reply)
    }

    /// The saved identity, or a switch back to the identity screen.
    fn require_identity(&mut self) -> Result<String, ChatError> {
        match self.saved_identity() {
            Some(email) => Ok(email),
            None => {
                warn!("no saved identity, returning to identity screen");
                self.screen = Screen::Identity;
                Err(ChatError::missing_identity())
            }
        }
    }

    /// Build an envelope and send it within the wait bound.
    ///
    /// On timeout the transport future is dropped, so a late reply can never
    /// reach the transcript.
    async fn dispatch(&mut self, email: &str, content: &str) -> Result<AgentReply, ChatError> {
        let session_id = self.current_or_new_session_id()?;
        let envelope = RequestEnvelope::message(
            email,
            content,
            session_id.as_str(),
            &self.settings.client_name,
            &self.settings.user_agent,
        );

        let send = self.transport.send(&envelope);
        let result = match self.settings.wait_bound {
            Some(bound) => match tokio::time::timeout(bound, send).await {
                Ok(result) => result,
                Err(_) => {
                    warn!(bound_ms = bound.as_millis() as u64, "request exceeded wait bound");
                    Err(ChatError::timeout())
                }
            },
            None => send.await,
        };

        if let Err(ref e) = result {
            warn!(kind = ?e.kind, error = %e, "chat request failed");
        }
        result
    }

    fn record_reply(&mut self, reply: &AgentReply) {
        self.transcript
            .push(ChatMessage::new(Role::Agent, reply.content.as_str()));
        self.server_session = reply.session_id.clone();
    }
}
