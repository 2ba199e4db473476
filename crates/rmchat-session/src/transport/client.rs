//! Request manager HTTP client.

use std::time::Instant;

use async_trait::async_trait;
use rmchat_common::RmchatError;
use tracing::{debug, warn};

use crate::{AgentReply, ChatError, ChatTransport, RequestEnvelope};

use super::config::ClientConfig;
use super::response::parse_reply;

/// Sends chat turns to the request manager over HTTP.
pub struct RequestManagerClient {
    endpoint: String,
    http: reqwest::Client,
}

impl RequestManagerClient {
    pub fn new(config: ClientConfig) -> Result<Self, RmchatError> {
        let http = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| RmchatError::Network(format!("failed to build HTTP client: {e}")))?;
        let endpoint = config.endpoint();

        Ok(Self { endpoint, http })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn map_send_error(&self, err: reqwest::Error) -> ChatError {
        if err.is_timeout() {
            warn!(endpoint = %self.endpoint, "request manager timed out");
            ChatError::timeout()
        } else {
            warn!(endpoint = %self.endpoint, error = %err, "request manager unreachable");
            ChatError::transport()
        }
    }
}

#[async_trait]
impl ChatTransport for RequestManagerClient {
    async fn send(&self, envelope: &RequestEnvelope) -> Result<AgentReply, ChatError> {
        debug!(
            endpoint = %self.endpoint,
            session_id = %envelope.session_id(),
            content_len = envelope.content.len(),
            "request manager request"
        );
        let started = Instant::now();

        let response = self
            .http
            .post(&self.endpoint)
            .header("content-type", "application/json")
            .header("x-user-id", envelope.user_id())
            .json(envelope)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status().as_u16();

        // Read as text first: the body is needed verbatim when it is not JSON.
        let raw = response.text().await.map_err(|e| self.map_send_error(e))?;

        debug!(
            status,
            body_len = raw.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "request manager response"
        );

        let result = parse_reply(status, &raw);
        if let Err(ref e) = result {
            warn!(status, kind = ?e.kind, "request manager returned an error");
        }
        result
    }
}
