//! rmchat-proxy: web client server in front of the request manager.
//!
//! Serves a health probe and the browser assets, and forwards every
//! `/api/*` call to the request manager so the browser never talks to it
//! directly.

mod routes;
mod state;

use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use rmchat_config::RmchatConfig;
use tokio::net::TcpListener;

use crate::routes::build_router;
use crate::state::ProxyState;

#[derive(Parser, Debug, Default)]
#[command(name = "rmchat-proxy", about = "Web client proxy for the request manager")]
struct Args {
    /// Config file path override.
    #[arg(long)]
    config: Option<String>,

    /// Address to listen on, e.g. 0.0.0.0:8080.
    #[arg(long)]
    listen: Option<String>,

    /// Request manager base URL. Also read from REQUEST_MANAGER_URL.
    #[arg(long)]
    upstream_url: Option<String>,

    /// Upstream timeout in seconds.
    #[arg(long)]
    timeout: Option<u64>,

    /// Directory with index.html, main.js and styles.css.
    #[arg(long)]
    static_dir: Option<String>,
}

/// Command-line values win over the config file and environment.
fn apply_args(config: &mut RmchatConfig, args: &Args) {
    if let Some(ref listen) = args.listen {
        config.proxy.listen = listen.clone();
    }
    if let Some(ref url) = args.upstream_url {
        config.proxy.upstream_url = url.clone();
    }
    if let Some(timeout) = args.timeout.filter(|t| *t > 0) {
        config.proxy.upstream_timeout_secs = timeout;
    }
    if let Some(ref dir) = args.static_dir {
        config.proxy.static_dir = Some(dir.clone());
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown requested");
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let mut config = match rmchat_config::load_config(args.config.as_deref().map(Path::new)) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("rmchat-proxy: {e}");
            return ExitCode::FAILURE;
        }
    };
    apply_args(&mut config, &args);

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("rmchat_proxy={}", config.logging.level).into()),
        )
        .init();

    let state = match ProxyState::from_config(&config.proxy) {
        Ok(state) => state,
        Err(e) => {
            tracing::error!("Failed to build proxy: {e}");
            return ExitCode::FAILURE;
        }
    };

    let listener = match TcpListener::bind(&config.proxy.listen).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(addr = %config.proxy.listen, error = %e, "Failed to bind TCP listener");
            return ExitCode::FAILURE;
        }
    };

    tracing::info!(
        listen = %config.proxy.listen,
        upstream = %state.upstream,
        timeout_secs = config.proxy.upstream_timeout_secs,
        "rmchat-proxy listening"
    );

    if let Err(e) = axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!(error = %e, "Server error");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn args_override_config() {
        let args = Args::try_parse_from([
            "rmchat-proxy",
            "--listen",
            "127.0.0.1:9000",
            "--upstream-url",
            "http://rm:8080",
            "--timeout",
            "30",
            "--static-dir",
            "/srv/web",
        ])
        .unwrap();

        let mut config = RmchatConfig::default();
        apply_args(&mut config, &args);
        assert_eq!(config.proxy.listen, "127.0.0.1:9000");
        assert_eq!(config.proxy.upstream_url, "http://rm:8080");
        assert_eq!(config.proxy.upstream_timeout_secs, 30);
        assert_eq!(config.proxy.static_dir.as_deref(), Some("/srv/web"));
    }

    #[test]
    fn no_args_keep_config() {
        let mut config = RmchatConfig::default();
        apply_args(&mut config, &Args::default());
        assert_eq!(config.proxy.listen, "0.0.0.0:8080");
        assert_eq!(config.proxy.upstream_timeout_secs, 300);
        assert!(config.proxy.static_dir.is_none());
    }
}
