use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;

use tasklist::{config, tui};

#[derive(Parser)]
#[command(
    name = "tasklist",
    version,
    about = "Manage a short list of tasks from the terminal"
)]
struct Cli {
    /// Path to an alternate config file (default: ~/.tasklist/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write debug logs to this file (overrides `log_file` from the config)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = config::load(cli.config.as_deref())?;

    // Log to a file or not at all: the TUI owns the terminal.
    if let Some(path) = cli.log_file.as_ref().or(config.log_file.as_ref()) {
        let file = File::create(path)
            .with_context(|| format!("failed to open log file {}", path.display()))?;
        tracing_subscriber::fmt()
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .with_max_level(tracing::Level::DEBUG)
            .init();
        tracing::debug!("tasklist starting");
    }

    let result = tui::run(&config);
    tracing::debug!("tasklist exiting");
    result
}
