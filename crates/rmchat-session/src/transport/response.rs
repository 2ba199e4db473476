//! Response body interpretation.

use serde_json::Value;

use crate::{AgentReply, ChatError};

/// Turn a status code and raw body into a reply or a tagged error.
///
/// The body must be JSON whatever the status. On success the reply text is
/// `response.content`, then the flat `content`, then empty. On failure the
/// message carries `detail`, then `error`, then the whole JSON document.
pub fn parse_reply(status: u16, raw: &str) -> Result<AgentReply, ChatError> {
    let data: Value = serde_json::from_str(raw).map_err(|_| ChatError::parse(status, raw))?;

    if !(200..300).contains(&status) {
        let detail = first_truthy(&data["detail"])
            .or_else(|| first_truthy(&data["error"]))
            .unwrap_or_else(|| data.to_string());
        return Err(ChatError::protocol(status, &detail));
    }

    let content = present_text(&data["response"]["content"])
        .or_else(|| present_text(&data["content"]))
        .unwrap_or_default();

    Ok(AgentReply {
        content,
        session_id: present_text(&data["session_id"]).unwrap_or_default(),
        request_id: present_text(&data["request_id"]).unwrap_or_default(),
    })
}

/// Text of a value that is present (not null). Strings are taken verbatim,
/// anything else as its JSON text.
fn present_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Like `present_text`, but empty strings and `false` are skipped too.
fn first_truthy(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        other => present_text(other),
    }
}
