use std::path::PathBuf;

use clap::{Parser, Subcommand};
use quickshare::commands;
use quickshare::config::Config;
use quickshare::App;

/// Share text through short links.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Path to the config file.
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the web interface (default).
    Serve,
    /// Resolve credentials and check that the store answers a lookup.
    Check,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = Config::load(&cli.config)?;
    let app = App::from_config(config).await?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => commands::serve::run(app).await,
        Command::Check => commands::check::run(app).await,
    }
}
