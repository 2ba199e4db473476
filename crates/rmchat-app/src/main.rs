mod boot;
mod cli;
mod ui;

use std::process::ExitCode;

use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{reload, EnvFilter, Registry};

type FilterHandle = reload::Handle<EnvFilter, Registry>;

/// Filter directives for our crates at `level`.
fn log_directives(level: &str) -> String {
    format!("rmchat={level},rmchat_session={level},rmchat_config={level}")
}

/// Directives to start with, and whether the config file may still replace
/// them. `--log-level` wins over `RUST_LOG`, which wins over the config file.
fn startup_directives(cli_level: Option<&str>, rust_log: Option<&str>) -> (String, bool) {
    match (cli_level, rust_log.filter(|v| !v.trim().is_empty())) {
        (Some(level), _) => (log_directives(level), false),
        (None, Some(env)) => (env.to_string(), false),
        (None, None) => (log_directives("info"), true),
    }
}

fn subscriber<W>(
    filter: reload::Layer<EnvFilter, Registry>,
    writer: W,
) -> impl tracing::Subscriber + Send + Sync + 'static
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(writer))
}

/// Install the stderr subscriber before anything logs. Returns a handle
/// when the config file's level should still be applied.
fn init_logging(cli_level: Option<&str>) -> Option<FilterHandle> {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let (directives, adjustable) = startup_directives(cli_level, rust_log.as_deref());
    let filter =
        EnvFilter::try_new(&directives).unwrap_or_else(|_| EnvFilter::new(log_directives("info")));

    let (filter, handle) = reload::Layer::new(filter);
    subscriber(filter, std::io::stderr).init();
    adjustable.then_some(handle)
}

fn apply_config_level(handle: &FilterHandle, level: &str) {
    let result = EnvFilter::try_new(log_directives(level))
        .map_err(|e| e.to_string())
        .and_then(|filter| handle.reload(filter).map_err(|e| e.to_string()));
    if let Err(e) = result {
        tracing::warn!("Failed to apply log level {level}: {e}");
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = cli::parse();

    let log_handle = init_logging(args.log_level.as_deref());
    tracing::info!("rmchat v{} starting...", env!("CARGO_PKG_VERSION"));

    let config = match boot::load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Config load failed: {e}");
            eprintln!("rmchat: {e}");
            return ExitCode::FAILURE;
        }
    };
    if let Some(ref handle) = log_handle {
        apply_config_level(handle, &config.logging.level);
    }

    if args.print_config {
        println!("{}", rmchat_config::config_to_json(&config));
        return ExitCode::SUCCESS;
    }

    let session = match boot::build_session(&args, &config) {
        Ok(session) => session,
        Err(e) => {
            tracing::error!("Startup failed: {e}");
            eprintln!("rmchat: {e}");
            return ExitCode::FAILURE;
        }
    };

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let mut chat = ui::ChatUi::new(session, std::io::stdout());
    if let Err(e) = chat.run(stdin, args.email.clone()).await {
        tracing::error!("Terminal I/O failed: {e}");
        return ExitCode::FAILURE;
    }

    tracing::info!(last = %chat.session().meta(), "Shutdown complete");
    ExitCode::SUCCESS
}
