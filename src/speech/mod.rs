// src/speech/mod.rs
//! Speech-to-text boundary.
//!
//! The engine never records audio itself. A [`SpeechRecognizer`] yields the
//! phrase the user spoke, and [`ExternalRecognizer`] adapts any program that
//! prints a transcript on stdout.

use std::{
    io::Read,
    process::{Command, Stdio},
    sync::mpsc::{self, RecvTimeoutError},
    thread,
    time::{Duration, Instant},
};

use thiserror::Error;
use tracing::{debug, warn};

use crate::error::FmError;

/// Why no transcript came back.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TranscriptionError {
    #[error("no speech detected")]
    NoSpeechDetected,
    #[error("speech service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl From<TranscriptionError> for FmError {
    fn from(err: TranscriptionError) -> Self {
        FmError::TranscriptionFailed {
            reason: err.to_string(),
        }
    }
}

/// Anything that can listen once and return lower-case text.
pub trait SpeechRecognizer {
    fn listen(&self) -> Result<String, TranscriptionError>;
}

const POLL_INTERVAL: Duration = Duration::from_millis(25);
/// How long to wait for the last bytes of stdout once the program exited.
const READ_GRACE: Duration = Duration::from_millis(250);

/// Runs an external transcription program and reads its stdout.
///
/// The program is killed once `timeout` elapses so a stuck recognizer can
/// never hang the caller.
#[derive(Debug, Clone)]
pub struct ExternalRecognizer {
    program: String,
    args: Vec<String>,
    timeout: Duration,
}

impl ExternalRecognizer {
    pub fn new(program: impl Into<String>, args: Vec<String>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            args,
            timeout,
        }
    }

    /// Build from a whitespace-separated command line such as
    /// `"whisper-listen --model base"`. Returns `None` for a blank line.
    pub fn from_command_line(line: &str, timeout: Duration) -> Option<Self> {
        let mut parts = line.split_whitespace().map(str::to_string);
        let program = parts.next()?;
        Some(Self::new(program, parts.collect(), timeout))
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn timed_out(&self) -> TranscriptionError {
        warn!(program = %self.program, timeout = ?self.timeout, "speech recognizer timed out");
        TranscriptionError::ServiceUnavailable(format!("timed out after {:?}", self.timeout))
    }
}

impl SpeechRecognizer for ExternalRecognizer {
    fn listen(&self) -> Result<String, TranscriptionError> {
        debug!(program = %self.program, "starting speech recognizer");
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| {
                TranscriptionError::ServiceUnavailable(format!("{}: {}", self.program, e))
            })?;

        // Drain stdout while waiting, or a chatty recognizer blocks on a
        // full pipe and never exits.
        let (tx, rx) = mpsc::channel();
        if let Some(mut out) = child.stdout.take() {
            thread::spawn(move || {
                let mut transcript = String::new();
                let _ = tx.send(out.read_to_string(&mut transcript).map(|_| transcript));
            });
        }

        let deadline = Instant::now() + self.timeout;
        let status = loop {
            match child.try_wait() {
                Ok(Some(status)) => break status,
                Ok(None) if Instant::now() >= deadline => {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(self.timed_out());
                }
                Ok(None) => thread::sleep(POLL_INTERVAL),
                Err(e) => return Err(TranscriptionError::ServiceUnavailable(e.to_string())),
            }
        };

        if !status.success() {
            return Err(TranscriptionError::ServiceUnavailable(format!(
                "{} exited with {}",
                self.program, status
            )));
        }

        let remaining = deadline.saturating_duration_since(Instant::now()).max(READ_GRACE);
        let transcript = match rx.recv_timeout(remaining) {
            Ok(read) => read.map_err(|e| TranscriptionError::ServiceUnavailable(e.to_string()))?,
            // A background child of the program may still hold the pipe open.
            Err(RecvTimeoutError::Timeout) => return Err(self.timed_out()),
            Err(RecvTimeoutError::Disconnected) => String::new(),
        };

        let transcript = transcript.trim().to_lowercase();
        if transcript.is_empty() {
            return Err(TranscriptionError::NoSpeechDetected);
        }
        debug!(%transcript, "speech recognized");
        Ok(transcript)
    }
}
