// src/config/mod.rs
//! Runtime configuration from command-line arguments and environment.
//!
//! Every option can also come from the environment:
//!
//! | variable                      | flag                    | meaning                             |
//! |-------------------------------|-------------------------|-------------------------------------|
//! | `SMARTFM_START_DIR`           | `[DIRECTORY]`           | directory to open (default: home)   |
//! | `SMARTFM_RECENT_LIMIT`        | `--recent-limit`        | entries in the recent list (5)      |
//! | `SMARTFM_SPEECH_CMD`          | `--speech-cmd`          | transcription program + arguments   |
//! | `SMARTFM_SPEECH_TIMEOUT_SECS` | `--speech-timeout-secs` | recognizer timeout (10)             |
//! | `SMARTFM_LOG`                 | `--log-file`            | log file path                       |
//!
//! A flag or positional argument beats its variable.

use std::{env, path::PathBuf, time::Duration};

use clap::Parser;

use crate::{intel::DEFAULT_RECENT_LIMIT, speech::ExternalRecognizer};

const DEFAULT_SPEECH_TIMEOUT_SECS: u64 = 10;

/// Terminal file manager with recent files, categories and spoken commands.
#[derive(Debug, Parser)]
#[command(name = "smartfm", version)]
#[command(after_help = "RUST_LOG sets the log filter (default: smartfm=info).")]
pub struct Cli {
    /// Directory to browse (default: your home directory)
    #[arg(env = "SMARTFM_START_DIR")]
    pub directory: Option<PathBuf>,

    /// How many files the recent list shows
    #[arg(long, env = "SMARTFM_RECENT_LIMIT", default_value_t = DEFAULT_RECENT_LIMIT, value_parser = parse_limit)]
    pub recent_limit: usize,

    /// Program that prints one transcribed phrase, with its arguments
    #[arg(long, env = "SMARTFM_SPEECH_CMD")]
    pub speech_cmd: Option<String>,

    /// Give up on the recognizer after this many seconds
    #[arg(long, env = "SMARTFM_SPEECH_TIMEOUT_SECS", default_value_t = DEFAULT_SPEECH_TIMEOUT_SECS,
          value_parser = clap::value_parser!(u64).range(1..))]
    pub speech_timeout_secs: u64,

    /// Log file (default: smartfm.log in the temp dir)
    #[arg(long, env = "SMARTFM_LOG")]
    pub log_file: Option<PathBuf>,
}

fn parse_limit(raw: &str) -> Result<usize, String> {
    match raw.trim().parse::<usize>() {
        Ok(0) => Err("must be at least 1".into()),
        Ok(limit) => Ok(limit),
        Err(e) => Err(e.to_string()),
    }
}

/// User settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Where to start browsing; `None` means the home directory.
    pub start_dir: Option<PathBuf>,
    pub recent_limit: usize,
    pub speech_command: Option<String>,
    pub speech_timeout: Duration,
    pub log_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            start_dir: None,
            recent_limit: DEFAULT_RECENT_LIMIT,
            speech_command: None,
            speech_timeout: Duration::from_secs(DEFAULT_SPEECH_TIMEOUT_SECS),
            log_file: default_log_file(),
        }
    }
}

impl From<Cli> for Config {
    fn from(cli: Cli) -> Self {
        Self {
            start_dir: cli.directory,
            recent_limit: cli.recent_limit,
            speech_command: cli.speech_cmd.filter(|line| !line.trim().is_empty()),
            speech_timeout: Duration::from_secs(cli.speech_timeout_secs),
            log_file: cli.log_file.unwrap_or_else(default_log_file),
        }
    }
}

fn default_log_file() -> PathBuf {
    env::temp_dir().join("smartfm.log")
}

impl Config {
    /// Read the process arguments and environment. Help, version and
    /// usage errors are printed by clap, which then exits.
    pub fn load() -> Self {
        Cli::parse().into()
    }

    /// The configured speech recognizer, if any.
    pub fn recognizer(&self) -> Option<ExternalRecognizer> {
        self.speech_command
            .as_deref()
            .and_then(|line| ExternalRecognizer::from_command_line(line, self.speech_timeout))
    }
}
