//! Configuration validation.
//!
//! Each section has its own check; this orchestrator calls them all and
//! collects errors into a single `ConfigError`.

#[cfg(test)]
mod tests;

use crate::schema::RmchatConfig;
use rmchat_common::ConfigError;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &RmchatConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    validate_request_manager(&mut errors, config);
    validate_chat(&mut errors, config);
    validate_proxy(&mut errors, config);
    validate_logging(&mut errors, config);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}

/// Push an error unless `url` is an absolute http(s) URL.
pub(crate) fn validate_http_url(errors: &mut Vec<String>, name: &str, url: &str) {
    let rest = url
        .strip_prefix("http://")
        .or_else(|| url.strip_prefix("https://"));
    match rest {
        Some(host) if !host.is_empty() && !host.starts_with('/') => {}
        _ => errors.push(format!("{name} = \"{url}\" is not an http(s) URL")),
    }
}

fn validate_nonzero(errors: &mut Vec<String>, name: &str, value: u64) {
    if value == 0 {
        errors.push(format!("{name} must be greater than 0"));
    }
}

fn validate_nonblank(errors: &mut Vec<String>, name: &str, value: &str) {
    if value.trim().is_empty() {
        errors.push(format!("{name} must not be empty"));
    }
}

fn validate_request_manager(errors: &mut Vec<String>, config: &RmchatConfig) {
    let rm = &config.request_manager;
    validate_http_url(errors, "request_manager.base_url", &rm.base_url);
    validate_nonzero(errors, "request_manager.timeout_secs", rm.timeout_secs);
    validate_nonzero(
        errors,
        "request_manager.connect_timeout_secs",
        rm.connect_timeout_secs,
    );
    validate_nonblank(errors, "request_manager.client_name", &rm.client_name);
}

fn validate_chat(errors: &mut Vec<String>, config: &RmchatConfig) {
    validate_nonblank(errors, "chat.greeting", &config.chat.greeting);
    validate_nonblank(errors, "chat.reset_command", &config.chat.reset_command);
}

fn validate_proxy(errors: &mut Vec<String>, config: &RmchatConfig) {
    let proxy = &config.proxy;
    if proxy.listen.parse::<std::net::SocketAddr>().is_err() {
        errors.push(format!(
            "proxy.listen = \"{}\" is not a socket address",
            proxy.listen
        ));
    }
    validate_http_url(errors, "proxy.upstream_url", &proxy.upstream_url);
    validate_nonzero(
        errors,
        "proxy.upstream_timeout_secs",
        proxy.upstream_timeout_secs,
    );
}

fn validate_logging(errors: &mut Vec<String>, config: &RmchatConfig) {
    const LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
    let level = config.logging.level.to_ascii_lowercase();
    if !LEVELS.contains(&level.as_str()) {
        errors.push(format!(
            "logging.level = \"{}\" must be one of {}",
            config.logging.level,
            LEVELS.join(", ")
        ));
    }
}
