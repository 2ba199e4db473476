//! Outbound request payload for the request manager's generic endpoint.

use serde::{Deserialize, Serialize};

/// Body of `POST /api/v1/requests/generic`. Built fresh per call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestEnvelope {
    pub integration_type: String,
    pub user_id: String,
    pub content: String,
    pub request_type: String,
    pub metadata: EnvelopeMetadata,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvelopeMetadata {
    pub command_context: CommandContext,
    pub request_manager_session_id: String,
    pub user_email: String,
    pub session_name: String,
    pub client: String,
    pub user_agent: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandContext {
    pub command: String,
    pub args: Vec<String>,
}

impl RequestEnvelope {
    pub fn message(
        email: &str,
        content: &str,
        session_id: &str,
        client: &str,
        user_agent: &str,
    ) -> Self {
        Self {
            integration_type: "WEB".into(),
            user_id: email.into(),
            content: content.into(),
            request_type: "message".into(),
            metadata: EnvelopeMetadata {
                command_context: CommandContext {
                    command: "chat".into(),
                    args: Vec::new(),
                },
                request_manager_session_id: session_id.into(),
                user_email: email.into(),
                session_name: String::new(),
                client: client.into(),
                user_agent: user_agent.into(),
            },
        }
    }

    /// Identity sent in the `x-user-id` header.
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn session_id(&self) -> &str {
        &self.metadata.request_manager_session_id
    }
}
