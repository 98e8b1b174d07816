// src/app/state.rs
//! Application state management.
//!
//! `App` only keeps what the screen needs: the listing being shown, the
//! selection and whichever overlay is open. Every decision is delegated to
//! the session, the file operations and the command interpreter.

use anyhow::{Context, Result};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    widgets::{Block, Borders, ListState, Paragraph},
};
use tracing::warn;

use crate::{
    command::{CommandIntent, Dispatcher, Interpreter, Outcome, Step},
    config::Config,
    error::FmError,
    fs::{
        DirectorySession, Launcher, ListingEntry, SystemLauncher, create_file, create_folder,
        open_file, tail_path,
    },
    intel::categorize,
    speech::SpeechRecognizer,
    ui::{
        keybindings::{NavigationAction, key_to_action},
        layout::compute_layout,
        widgets::{render_confirm, render_file_list, render_popup, render_prompt, render_status},
    },
};

/// What a text prompt is collecting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    NewFile,
    NewFolder,
    ChangeDirectory,
    Search,
    Command,
    /// Second phase of a spoken or typed "search file".
    SearchTerm,
}

impl PromptKind {
    fn title(self) -> &'static str {
        match self {
            PromptKind::NewFile => "New file (with extension)",
            PromptKind::NewFolder => "New folder",
            PromptKind::ChangeDirectory => "Change directory",
            PromptKind::Search => "Search files",
            PromptKind::Command => "Command",
            PromptKind::SearchTerm => "Enter the search term",
        }
    }
}

/// The overlay currently on screen, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Browse,
    Prompt { kind: PromptKind, input: String },
    ConfirmDelete { name: String },
    Popup { title: String, lines: Vec<String> },
}

/// Last message for the status bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub text: String,
    pub is_error: bool,
}

/// Main application state.
pub struct App {
    /// Directory being browsed
    pub session: DirectorySession,
    /// Entries shown in the list, sorted for display
    pub entries: Vec<ListingEntry>,
    /// List widget state
    pub state: ListState,
    /// Currently selected index
    pub selected: usize,
    pub mode: Mode,
    pub status: Option<StatusLine>,
    /// Set when the voice key was pressed; the run loop draws a frame and
    /// then calls [`App::listen`].
    pub listen_requested: bool,

    interpreter: Interpreter,
    launcher: Box<dyn Launcher>,
    recognizer: Option<Box<dyn SpeechRecognizer>>,
    recent_limit: usize,
}

impl App {
    /// Create the application from user configuration.
    pub fn new(config: &Config) -> Result<Self> {
        let session = match &config.start_dir {
            Some(dir) => DirectorySession::new(dir)
                .with_context(|| format!("cannot browse {}", dir.display()))?,
            None => DirectorySession::at_home().context("cannot browse the home directory")?,
        };
        let recognizer = config
            .recognizer()
            .map(|r| Box::new(r) as Box<dyn SpeechRecognizer>);

        Ok(Self::with_parts(
            session,
            Box::new(SystemLauncher),
            recognizer,
            config.recent_limit,
        ))
    }

    /// Assemble an application from explicit collaborators.
    pub fn with_parts(
        session: DirectorySession,
        launcher: Box<dyn Launcher>,
        recognizer: Option<Box<dyn SpeechRecognizer>>,
        recent_limit: usize,
    ) -> Self {
        let mut state = ListState::default();
        state.select(Some(0));

        let mut app = Self {
            session,
            entries: Vec::new(),
            state,
            selected: 0,
            mode: Mode::Browse,
            status: None,
            listen_requested: false,
            interpreter: Interpreter::new(),
            launcher,
            recognizer,
            recent_limit,
        };
        app.refresh();
        app
    }

    /// Re-read the current directory. On failure the previous listing stays.
    pub fn refresh(&mut self) {
        match self.session.list_entries() {
            Ok(mut entries) => {
                // Sort alphabetically, case-insensitive
                entries.sort_by_key(|e| e.name.to_lowercase());
                self.entries = entries;
                if self.selected >= self.entries.len() {
                    self.selected = self.entries.len().saturating_sub(1);
                }
                self.state.select(Some(self.selected));
            }
            Err(err) => self.fail(err),
        }
    }

    /// Name of the highlighted entry.
    pub fn selected_name(&self) -> Option<&str> {
        self.entries.get(self.selected).map(|e| e.name.as_str())
    }

    /// Handle a key event and return true if the app should quit.
    pub fn on_key(&mut self, key: KeyEvent) -> bool {
        match std::mem::replace(&mut self.mode, Mode::Browse) {
            Mode::Browse => return self.on_browse_key(key),
            Mode::Prompt { kind, input } => self.on_prompt_key(key, kind, input),
            Mode::ConfirmDelete { name } => self.on_confirm_key(key, name),
            Mode::Popup { title, lines } => {
                if !matches!(key.code, KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q')) {
                    self.mode = Mode::Popup { title, lines };
                }
            }
        }
        false
    }

    fn on_browse_key(&mut self, key: KeyEvent) -> bool {
        match key_to_action(&key) {
            NavigationAction::Down => {
                if self.selected + 1 < self.entries.len() {
                    self.selected += 1;
                }
            }
            NavigationAction::Up => {
                if self.selected > 0 {
                    self.selected -= 1;
                }
            }
            NavigationAction::Enter => self.activate_selected(),
            NavigationAction::Back => match self.session.go_up() {
                Ok(true) => self.after_directory_change(),
                Ok(false) => {}
                Err(err) => self.fail(err),
            },
            NavigationAction::Open => self.open_selected(),
            NavigationAction::Delete => self.ask_delete(),
            NavigationAction::NewFile => self.prompt(PromptKind::NewFile),
            NavigationAction::NewFolder => self.prompt(PromptKind::NewFolder),
            NavigationAction::ChangeDirectory => self.prompt(PromptKind::ChangeDirectory),
            NavigationAction::Search => self.prompt(PromptKind::Search),
            NavigationAction::TypedCommand => self.prompt(PromptKind::Command),
            NavigationAction::Categorize => self.show_categories(),
            NavigationAction::Recent => self.run_intent(CommandIntent::OpenRecent),
            NavigationAction::Voice => self.start_voice(),
            NavigationAction::Refresh => self.refresh(),
            NavigationAction::Quit => return true,
            NavigationAction::None => {}
        }

        self.state.select(Some(self.selected));
        false
    }

    fn on_prompt_key(&mut self, key: KeyEvent, kind: PromptKind, mut input: String) {
        match key.code {
            KeyCode::Esc => {
                if kind == PromptKind::SearchTerm {
                    self.interpreter.cancel();
                }
            }
            KeyCode::Enter => self.submit_prompt(kind, input),
            KeyCode::Backspace => {
                input.pop();
                self.mode = Mode::Prompt { kind, input };
            }
            KeyCode::Char(c) => {
                input.push(c);
                self.mode = Mode::Prompt { kind, input };
            }
            _ => self.mode = Mode::Prompt { kind, input },
        }
    }

    fn on_confirm_key(&mut self, key: KeyEvent, name: String) {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => {
                self.run_intent_on(CommandIntent::DeleteSelected, Some(&name))
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {}
            _ => self.mode = Mode::ConfirmDelete { name },
        }
    }

    fn submit_prompt(&mut self, kind: PromptKind, input: String) {
        match kind {
            PromptKind::NewFile => match create_file(&self.session, &input) {
                Ok(_) => {
                    self.refresh();
                    self.info(format!("File '{input}' created successfully."));
                }
                Err(err) => self.fail(err),
            },
            PromptKind::NewFolder => match create_folder(&self.session, &input) {
                Ok(_) => {
                    self.refresh();
                    self.info(format!("Folder '{input}' created successfully."));
                }
                Err(err) => self.fail(err),
            },
            PromptKind::ChangeDirectory => {
                if input.trim().is_empty() {
                    return;
                }
                match self.session.set_directory(input.trim()) {
                    Ok(()) => self.after_directory_change(),
                    Err(err) => self.fail(err),
                }
            }
            PromptKind::Search => {
                // An empty search is simply dismissed.
                if !input.trim().is_empty() {
                    self.run_intent(CommandIntent::Search(input.trim().to_string()));
                }
            }
            PromptKind::Command => {
                let step = self.interpreter.interpret(&input);
                self.handle_step(step);
            }
            PromptKind::SearchTerm => match self.interpreter.supply_search_term(&input) {
                Ok(intent) => self.run_intent(intent),
                Err(err) => self.fail(err),
            },
        }
    }

    fn prompt(&mut self, kind: PromptKind) {
        self.mode = Mode::Prompt {
            kind,
            input: String::new(),
        };
    }

    fn activate_selected(&mut self) {
        let Some(entry) = self.entries.get(self.selected) else {
            return;
        };
        if entry.is_dir() {
            let name = entry.name.clone();
            match self.session.enter(&name) {
                Ok(()) => self.after_directory_change(),
                Err(err) => self.fail(err),
            }
        } else {
            self.open_selected();
        }
    }

    fn open_selected(&mut self) {
        let Some(name) = self.selected_name() else {
            return;
        };
        let path = self.session.resolve(name);
        match open_file(&path, self.launcher.as_ref()) {
            Ok(()) => self.info(format!("Opened {}", path.display())),
            Err(err) => self.fail(err),
        }
    }

    fn ask_delete(&mut self) {
        match self.entries.get(self.selected) {
            Some(entry) if entry.is_file => {
                self.mode = Mode::ConfirmDelete {
                    name: entry.name.clone(),
                }
            }
            Some(entry) => {
                let path = self.session.resolve(&entry.name);
                self.fail(FmError::NotAFile { path })
            }
            None => self.fail(FmError::NotAFile {
                path: self.session.current().to_path_buf(),
            }),
        }
    }

    fn show_categories(&mut self) {
        match self.session.list_entries() {
            Ok(entries) => {
                let lines = categorize(&entries)
                    .iter()
                    .map(|(category, names)| format!("{}: {}", category, names.join(", ")))
                    .collect();
                self.mode = Mode::Popup {
                    title: "Categorized Files".to_string(),
                    lines,
                };
            }
            Err(err) => self.fail(err),
        }
    }

    fn start_voice(&mut self) {
        if self.recognizer.is_some() {
            self.info("Listening...".to_string());
            self.listen_requested = true;
        } else {
            // No recognizer configured: take the phrase from the keyboard.
            self.prompt(PromptKind::Command);
        }
    }

    /// Capture one spoken command and act on it. Blocks until the
    /// recognizer answers or times out.
    pub fn listen(&mut self) {
        self.listen_requested = false;
        let Some(recognizer) = &self.recognizer else {
            return;
        };
        match self.interpreter.interpret_speech(recognizer.as_ref()) {
            Ok(step) => self.handle_step(step),
            Err(err) => self.fail(err),
        }
    }

    fn handle_step(&mut self, step: Step) {
        match step {
            Step::AwaitingSearchTerm => self.prompt(PromptKind::SearchTerm),
            // Deleting always goes through the confirmation dialog.
            Step::Ready(CommandIntent::DeleteSelected) => self.ask_delete(),
            Step::Ready(intent) => self.run_intent(intent),
        }
    }

    fn run_intent(&mut self, intent: CommandIntent) {
        let selected = self.selected_name().map(str::to_string);
        self.run_intent_on(intent, selected.as_deref());
    }

    fn run_intent_on(&mut self, intent: CommandIntent, selected: Option<&str>) {
        let result = Dispatcher::new(&self.session, self.launcher.as_ref())
            .with_recent_limit(self.recent_limit)
            .dispatch(intent, selected);

        match result {
            Ok(Outcome::Recent(names)) => self.show_list("Recent Files", names),
            Ok(Outcome::Matches { names, .. }) => self.show_list("Search Results", names),
            Ok(Outcome::Deleted(_)) => {
                self.refresh();
                self.info("File deleted successfully.".to_string());
            }
            Ok(Outcome::Opened(path)) => self.info(format!("Opened {}", path.display())),
            Err(err) => self.fail(err),
        }
    }

    fn show_list(&mut self, title: &str, names: Vec<String>) {
        let lines = if names.is_empty() {
            vec!["No files found.".to_string()]
        } else {
            names
        };
        self.mode = Mode::Popup {
            title: title.to_string(),
            lines,
        };
    }

    fn after_directory_change(&mut self) {
        self.selected = 0;
        self.refresh();
        self.status = None;
    }

    fn info(&mut self, text: String) {
        self.status = Some(StatusLine {
            text,
            is_error: false,
        });
    }

    fn fail(&mut self, err: FmError) {
        warn!(error = %err, "operation failed");
        self.status = Some(StatusLine {
            text: err.to_string(),
            is_error: true,
        });
    }

    /// Draw the application UI.
    pub fn draw(&mut self, f: &mut Frame<'_>) {
        let area = f.area();
        let layout = compute_layout(area);

        // Header: show current directory path
        let header = Paragraph::new(format!(
            "Current Directory: {}",
            self.session.current().display()
        ))
        .block(Block::default().borders(Borders::ALL).title("smartfm"));
        f.render_widget(header, layout.header);

        let title = format!(" {}", tail_path(self.session.current(), 3));
        render_file_list(f, layout.list, &title, &self.entries, &mut self.state);
        render_status(f, layout.status, self.status.as_ref());

        match &self.mode {
            Mode::Browse => {}
            Mode::Prompt { kind, input } => render_prompt(f, area, kind.title(), input),
            Mode::ConfirmDelete { name } => {
                render_confirm(f, area, &format!("Delete '{name}'?"))
            }
            Mode::Popup { title, lines } => render_popup(f, area, title, lines),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::speech::TranscriptionError;
    use std::{cell::RefCell, fs, io, path::Path, path::PathBuf, rc::Rc};
    use tempfile::{TempDir, tempdir};

    #[derive(Clone, Default)]
    struct RecordingLauncher {
        opened: Rc<RefCell<Vec<PathBuf>>>,
    }

    impl Launcher for RecordingLauncher {
        fn launch(&self, path: &Path) -> io::Result<()> {
            self.opened.borrow_mut().push(path.to_path_buf());
            Ok(())
        }
    }

    struct Scripted(String);

    impl SpeechRecognizer for Scripted {
        fn listen(&self) -> std::result::Result<String, TranscriptionError> {
            if self.0.is_empty() {
                Err(TranscriptionError::NoSpeechDetected)
            } else {
                Ok(self.0.clone())
            }
        }
    }

    fn app_in(tmp: &TempDir, heard: Option<&str>) -> (App, RecordingLauncher) {
        let launcher = RecordingLauncher::default();
        let recognizer = heard.map(|h| Box::new(Scripted(h.to_string())) as Box<dyn SpeechRecognizer>);
        let session = DirectorySession::new(tmp.path()).unwrap();
        let app = App::with_parts(session, Box::new(launcher.clone()), recognizer, 5);
        (app, launcher)
    }

    fn press(app: &mut App, code: KeyCode) -> bool {
        app.on_key(KeyEvent::from(code))
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn names(app: &App) -> Vec<&str> {
        app.entries.iter().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn new_file_prompt_creates_and_refreshes() {
        let tmp = tempdir().unwrap();
        let (mut app, _) = app_in(&tmp, None);

        press(&mut app, KeyCode::Char('n'));
        type_text(&mut app, "todo.txt");
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.mode, Mode::Browse);
        assert_eq!(names(&app), ["todo.txt"]);
        assert!(!app.status.as_ref().unwrap().is_error);
    }

    #[test]
    fn empty_folder_name_reports_invalid_name() {
        let tmp = tempdir().unwrap();
        let (mut app, _) = app_in(&tmp, None);

        press(&mut app, KeyCode::Char('f'));
        press(&mut app, KeyCode::Enter);

        assert!(app.status.as_ref().unwrap().is_error);
        assert!(app.entries.is_empty());
    }

    #[test]
    fn delete_requires_confirmation() {
        let tmp = tempdir().unwrap();
        fs::write(tmp.path().join("a.txt"), b"a").unwrap();
        let (mut app, _) = app_in(&tmp, None);

        press(&mut app, KeyCode::Char('d'));
        assert_eq!(app.mode, Mode::ConfirmDelete { name: "a.txt".into() });
        press(&mut app, KeyCode::Char('n'));
        assert_eq!(names(&app), ["a.txt"]);

        press(&mut app, KeyCode::Char('d'));
        press(&mut app, KeyCode::Char('y'));
        assert!(app.entries.is_empty());
    }

    #[test]
    fn enter_descends_and_left_returns() {
        let tmp = tempdir().unwrap();
        fs::create_dir(tmp.path().join("inner")).unwrap();
        fs::write(tmp.path().join("inner").join("x.png"), b"").unwrap();
        let (mut app, _) = app_in(&tmp, None);

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.session.current(), tmp.path().join("inner"));
        assert_eq!(names(&app), ["x.png"]);

        press(&mut app, KeyCode::Left);
        assert_eq!(app.session.current(), tmp.path());
    }

    #[test]
    fn enter_on_a_file_launches_it() {
        let tmp = tempdir().unwrap();
        fs::write(tmp.path().join("movie.mkv"), b"").unwrap();
        let (mut app, launcher) = app_in(&tmp, None);

        press(&mut app, KeyCode::Enter);
        assert_eq!(*launcher.opened.borrow(), vec![tmp.path().join("movie.mkv")]);
    }

    #[test]
    fn categorize_shows_every_category() {
        let tmp = tempdir().unwrap();
        fs::write(tmp.path().join("a.pdf"), b"").unwrap();
        let (mut app, _) = app_in(&tmp, None);

        press(&mut app, KeyCode::Char('c'));
        match &app.mode {
            Mode::Popup { lines, .. } => {
                assert_eq!(lines.len(), 5);
                assert_eq!(lines[0], "Documents: a.pdf");
                assert_eq!(lines[4], "Others: ");
            }
            other => panic!("unexpected mode {other:?}"),
        }
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.mode, Mode::Browse);
    }

    #[test]
    fn typed_search_command_asks_for_a_term() {
        let tmp = tempdir().unwrap();
        fs::write(tmp.path().join("Invoice.pdf"), b"").unwrap();
        fs::write(tmp.path().join("cat.jpg"), b"").unwrap();
        let (mut app, _) = app_in(&tmp, None);

        press(&mut app, KeyCode::Char(':'));
        type_text(&mut app, "search file");
        press(&mut app, KeyCode::Enter);
        assert!(matches!(
            app.mode,
            Mode::Prompt { kind: PromptKind::SearchTerm, .. }
        ));

        type_text(&mut app, "INVOICE");
        press(&mut app, KeyCode::Enter);
        assert_eq!(
            app.mode,
            Mode::Popup {
                title: "Search Results".into(),
                lines: vec!["Invoice.pdf".into()]
            }
        );
    }

    #[test]
    fn voice_command_opens_by_name() {
        let tmp = tempdir().unwrap();
        fs::write(tmp.path().join("report.pdf"), b"").unwrap();
        let (mut app, launcher) = app_in(&tmp, Some("open file report dot pdf"));

        press(&mut app, KeyCode::Char('v'));
        assert!(app.listen_requested);
        app.listen();

        assert!(!app.listen_requested);
        assert_eq!(*launcher.opened.borrow(), vec![tmp.path().join("report.pdf")]);
    }

    #[test]
    fn failed_transcription_is_reported() {
        let tmp = tempdir().unwrap();
        let (mut app, _) = app_in(&tmp, Some(""));

        press(&mut app, KeyCode::Char('v'));
        app.listen();
        let status = app.status.as_ref().unwrap();
        assert!(status.is_error);
        assert!(status.text.contains("no speech detected"));
    }

    #[test]
    fn voice_without_recognizer_falls_back_to_typing() {
        let tmp = tempdir().unwrap();
        let (mut app, _) = app_in(&tmp, None);

        press(&mut app, KeyCode::Char('v'));
        assert!(!app.listen_requested);
        assert!(matches!(app.mode, Mode::Prompt { kind: PromptKind::Command, .. }));
    }

    #[test]
    fn unknown_command_sets_an_error() {
        let tmp = tempdir().unwrap();
        let (mut app, _) = app_in(&tmp, None);

        press(&mut app, KeyCode::Char(':'));
        type_text(&mut app, "dance");
        press(&mut app, KeyCode::Enter);
        assert_eq!(
            app.status,
            Some(StatusLine {
                text: "command not recognized".into(),
                is_error: true
            })
        );
    }

    #[test]
    fn quit_key() {
        let tmp = tempdir().unwrap();
        let (mut app, _) = app_in(&tmp, None);
        assert!(press(&mut app, KeyCode::Char('q')));
    }
}
