use clap::Parser;

/// rmchat: chat with the request manager from a terminal.
#[derive(Parser, Debug, Default)]
#[command(name = "rmchat", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(long)]
    pub config: Option<String>,

    /// Request manager base URL. Remembered for later runs.
    #[arg(long)]
    pub base_url: Option<String>,

    /// Start chatting as this email instead of prompting.
    #[arg(short, long)]
    pub email: Option<String>,

    /// Wait bound for one request, in seconds.
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Store file path override.
    #[arg(long)]
    pub store: Option<String>,

    /// Log level override (trace, debug, info, warn, error).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Print the effective configuration as JSON and exit.
    #[arg(long)]
    pub print_config: bool,
}

pub fn parse() -> Args {
    Args::parse()
}
