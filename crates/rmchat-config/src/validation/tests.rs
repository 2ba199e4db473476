use super::*;

#[test]
fn default_config_is_valid() {
    assert!(validate(&RmchatConfig::default()).is_ok());
}

#[test]
fn rejects_non_http_base_url() {
    let mut config = RmchatConfig::default();
    config.request_manager.base_url = "ftp://rm.example.com".into();
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("request_manager.base_url"));
}

#[test]
fn rejects_url_without_host() {
    let mut errors = Vec::new();
    validate_http_url(&mut errors, "x", "http://");
    validate_http_url(&mut errors, "y", "https:///path");
    assert_eq!(errors.len(), 2);
}

#[test]
fn accepts_https_with_path() {
    let mut errors = Vec::new();
    validate_http_url(&mut errors, "x", "https://rm.example.com/prefix");
    assert!(errors.is_empty());
}

#[test]
fn rejects_zero_timeouts() {
    let mut config = RmchatConfig::default();
    config.request_manager.timeout_secs = 0;
    config.proxy.upstream_timeout_secs = 0;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("request_manager.timeout_secs"));
    assert!(err.contains("proxy.upstream_timeout_secs"));
}

#[test]
fn rejects_blank_chat_strings() {
    let mut config = RmchatConfig::default();
    config.chat.greeting = "   ".into();
    config.chat.reset_command = String::new();
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("chat.greeting"));
    assert!(err.contains("chat.reset_command"));
}

#[test]
fn rejects_bad_listen_address() {
    let mut config = RmchatConfig::default();
    config.proxy.listen = "localhost".into();
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("proxy.listen"));
}

#[test]
fn rejects_unknown_log_level() {
    let mut config = RmchatConfig::default();
    config.logging.level = "loud".into();
    assert!(validate(&config).is_err());

    config.logging.level = "DEBUG".into();
    assert!(validate(&config).is_ok());
}

#[test]
fn collects_all_errors() {
    let mut config = RmchatConfig::default();
    config.request_manager.base_url = "nope".into();
    config.logging.level = "nope".into();
    let err = validate(&config).unwrap_err();
    match err {
        ConfigError::ValidationError(msg) => assert_eq!(msg.split("; ").count(), 2),
        other => panic!("unexpected error: {other}"),
    }
}
