//! HTTP transport to the request manager.
//!
//! Posts request envelopes to `<base>/api/v1/requests/generic` with the
//! identity in `x-user-id`, and turns the response into an `AgentReply`
//! or a tagged `ChatError`.

mod client;
mod config;
mod response;

#[cfg(test)]
mod tests;

pub use client::RequestManagerClient;
pub use config::{default_user_agent, ClientConfig};
pub use response::parse_reply;
