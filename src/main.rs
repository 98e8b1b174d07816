// src/main.rs
use std::{fs::OpenOptions, process::ExitCode, sync::Mutex};

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use smartfm::config::Config;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:?}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let config = Config::load();

    init_logging(&config)?;
    info!(?config, "starting smartfm");

    smartfm::ui::run(&config)
}

/// The terminal belongs to the UI, so log lines go to a file.
fn init_logging(config: &Config) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_file)
        .with_context(|| format!("cannot open log file {}", config.log_file.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "smartfm=info".into()),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}
