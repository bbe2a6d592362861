//! Clanscout command line shell.
//!
//! Loads configuration, installs logging and hands off to the library
//! crates. Results go to stdout as JSON; logs go to stderr.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Command};
use tracing::info;

/// Initialize tracing subscriber for logging
fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,clanscout=debug"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    info!("Starting Clanscout v{}", env!("CARGO_PKG_VERSION"));

    let config = commands::load_config(cli.config.as_deref(), cli.token.as_deref())?;

    match cli.command {
        Command::Check => commands::check(&config).await,
        Command::Search(args) => commands::search(config, &args).await,
    }
}
