// src/command/interpreter.rs
//! Two-phase command interpretation.
//!
//! A "search file" phrase cannot be executed yet: the term has to come from a
//! second prompt. Instead of blocking inside a nested dialog, the interpreter
//! parks in [`InterpreterState::PendingSearchTerm`] until the host supplies
//! the term or cancels.

use tracing::debug;

use super::intent::{CommandIntent, parse};
use crate::{
    error::{FmError, Result},
    speech::SpeechRecognizer,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InterpreterState {
    #[default]
    Idle,
    PendingSearchTerm,
}

/// Result of feeding one phrase to the interpreter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// A complete intent, ready for dispatch.
    Ready(CommandIntent),
    /// A search was requested; call [`Interpreter::supply_search_term`].
    AwaitingSearchTerm,
}

#[derive(Debug, Default)]
pub struct Interpreter {
    state: InterpreterState,
}

impl Interpreter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> InterpreterState {
        self.state
    }

    /// Interpret a phrase. Any pending search is abandoned first.
    pub fn interpret(&mut self, text: &str) -> Step {
        self.state = InterpreterState::Idle;
        let intent = parse(text);
        debug!(text, ?intent, "parsed command");

        match intent {
            CommandIntent::SearchRequested => {
                self.state = InterpreterState::PendingSearchTerm;
                Step::AwaitingSearchTerm
            }
            intent => Step::Ready(intent),
        }
    }

    /// Listen once and interpret what was heard.
    ///
    /// A failed or empty transcription is reported as `TranscriptionFailed`
    /// and leaves the interpreter idle.
    pub fn interpret_speech(&mut self, recognizer: &dyn SpeechRecognizer) -> Result<Step> {
        self.state = InterpreterState::Idle;
        let text = recognizer.listen()?;
        Ok(self.interpret(&text))
    }

    /// Complete a pending search with `term`.
    pub fn supply_search_term(&mut self, term: &str) -> Result<CommandIntent> {
        let pending = self.state == InterpreterState::PendingSearchTerm;
        self.state = InterpreterState::Idle;

        let term = term.trim();
        if !pending || term.is_empty() {
            return Err(FmError::Unrecognized);
        }
        Ok(CommandIntent::Search(term.to_string()))
    }

    /// Drop a pending search.
    pub fn cancel(&mut self) {
        self.state = InterpreterState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::speech::TranscriptionError;

    struct Heard(Result<String, TranscriptionError>);

    impl SpeechRecognizer for Heard {
        fn listen(&self) -> std::result::Result<String, TranscriptionError> {
            self.0.clone()
        }
    }

    #[test]
    fn complete_commands_are_ready_at_once() {
        let mut interp = Interpreter::new();
        assert_eq!(
            interp.interpret("open file report dot pdf"),
            Step::Ready(CommandIntent::OpenByName("report.pdf".into()))
        );
        assert_eq!(interp.state(), InterpreterState::Idle);
    }

    #[test]
    fn bare_search_waits_for_a_term() {
        let mut interp = Interpreter::new();
        assert_eq!(interp.interpret("search file"), Step::AwaitingSearchTerm);
        assert_eq!(interp.state(), InterpreterState::PendingSearchTerm);

        let intent = interp.supply_search_term("  invoice ").unwrap();
        assert_eq!(intent, CommandIntent::Search("invoice".into()));
        assert_eq!(interp.state(), InterpreterState::Idle);
    }

    #[test]
    fn trailing_words_do_not_skip_the_prompt() {
        let mut interp = Interpreter::new();
        assert_eq!(interp.interpret("search file please"), Step::AwaitingSearchTerm);
        assert_eq!(interp.state(), InterpreterState::PendingSearchTerm);
        assert_eq!(
            interp.supply_search_term("notes"),
            Ok(CommandIntent::Search("notes".into()))
        );
    }

    #[test]
    fn empty_term_is_rejected_and_resets() {
        let mut interp = Interpreter::new();
        interp.interpret("search file");
        assert_eq!(interp.supply_search_term("   "), Err(FmError::Unrecognized));
        assert_eq!(interp.state(), InterpreterState::Idle);
    }

    #[test]
    fn term_without_pending_search_is_rejected() {
        let mut interp = Interpreter::new();
        assert_eq!(interp.supply_search_term("x"), Err(FmError::Unrecognized));
    }

    #[test]
    fn cancel_and_new_phrases_clear_pending_state() {
        let mut interp = Interpreter::new();
        interp.interpret("search file");
        interp.cancel();
        assert_eq!(interp.state(), InterpreterState::Idle);

        interp.interpret("search file");
        interp.interpret("open recent file");
        assert_eq!(interp.state(), InterpreterState::Idle);
    }

    #[test]
    fn speech_feeds_the_parser() {
        let mut interp = Interpreter::new();
        let step = interp
            .interpret_speech(&Heard(Ok("delete file".into())))
            .unwrap();
        assert_eq!(step, Step::Ready(CommandIntent::DeleteSelected));
    }

    #[test]
    fn failed_transcription_surfaces_as_error() {
        let mut interp = Interpreter::new();
        interp.interpret("search file");
        let err = interp
            .interpret_speech(&Heard(Err(TranscriptionError::NoSpeechDetected)))
            .unwrap_err();
        assert!(matches!(err, FmError::TranscriptionFailed { .. }));
        assert_eq!(interp.state(), InterpreterState::Idle);
    }
}
