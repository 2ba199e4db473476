//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> String {
    r##"# rmchat configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.

[request_manager]
# base_url = "http://localhost:8080"   # POSTs go to <base_url>/api/v1/requests/generic
# timeout_secs = 300                   # wait bound for one chat request
# connect_timeout_secs = 10
# client_name = "customer-webclient"   # metadata.client in every request

[chat]
# greeting = "Tell me how you can help"   # sent silently when a chat starts
# reset_command = "reset"                 # tells the server to drop its state

[storage]
# path = "/path/to/store.json"   # default: <data dir>/rmchat/store.json

[proxy]
# listen = "0.0.0.0:8080"
# upstream_url = "http://self-service-agent-request-manager"   # REQUEST_MANAGER_URL overrides
# upstream_timeout_secs = 300
# static_dir = "/srv/webclient"

[logging]
# level = "info"   # trace, debug, info, warn, error
"##
    .to_string()
}
