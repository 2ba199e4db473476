use serde::{Deserialize, Serialize};

/// Fixed conversation strings exchanged with the agent.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// Sent silently when a chat starts so the agent speaks first.
    pub greeting: String,
    /// Reserved content that tells the server to drop conversation state.
    pub reset_command: String,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            greeting: "Tell me how you can help".into(),
            reset_command: "reset".into(),
        }
    }
}
