// src/command/dispatch.rs
//! Executing an intent against the session.

use std::path::PathBuf;

use tracing::info;

use super::intent::CommandIntent;
use crate::{
    error::{FmError, Result},
    fs::{DirectorySession, Launcher, delete_file, open_file},
    intel::{DEFAULT_RECENT_LIMIT, search, search::matches, top_recent},
};

/// What running an intent produced, for the presentation layer to show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Recent(Vec<String>),
    Deleted(PathBuf),
    Matches { term: String, names: Vec<String> },
    Opened(PathBuf),
}

/// Routes intents to the session, the executor and the listing heuristics.
pub struct Dispatcher<'a> {
    session: &'a DirectorySession,
    launcher: &'a dyn Launcher,
    recent_limit: usize,
}

impl<'a> Dispatcher<'a> {
    pub fn new(session: &'a DirectorySession, launcher: &'a dyn Launcher) -> Self {
        Self {
            session,
            launcher,
            recent_limit: DEFAULT_RECENT_LIMIT,
        }
    }

    pub fn with_recent_limit(mut self, limit: usize) -> Self {
        self.recent_limit = limit;
        self
    }

    /// Run `intent`. `selected` is the entry the user has highlighted, used
    /// by `DeleteSelected`.
    pub fn dispatch(&self, intent: CommandIntent, selected: Option<&str>) -> Result<Outcome> {
        info!(?intent, "dispatching command");
        match intent {
            CommandIntent::OpenRecent => {
                let entries = self.session.list_entries()?;
                Ok(Outcome::Recent(top_recent(&entries, self.recent_limit)))
            }
            CommandIntent::DeleteSelected => {
                // Nothing highlighted resolves to the directory itself, which
                // is rejected as not being a file.
                let path = self.session.resolve(selected.unwrap_or_default());
                delete_file(&path)?;
                Ok(Outcome::Deleted(path))
            }
            CommandIntent::Search(term) => {
                let term = term.trim();
                if term.is_empty() {
                    return Err(FmError::Unrecognized);
                }
                let entries = self.session.list_entries()?;
                let names = search(&entries, term);
                Ok(Outcome::Matches {
                    term: term.to_string(),
                    names,
                })
            }
            // The term has not been asked for yet, so there is nothing to run.
            CommandIntent::SearchRequested | CommandIntent::Unrecognized => {
                Err(FmError::Unrecognized)
            }
            CommandIntent::OpenByName(name) => self.open_by_name(&name).map(Outcome::Opened),
        }
    }

    /// Open the first entry whose name contains `name`, ignoring case.
    ///
    /// With several candidates the first in listing order is taken, which
    /// depends on the order the OS enumerates the directory in.
    pub fn open_by_name(&self, name: &str) -> Result<PathBuf> {
        if name.trim().is_empty() {
            return Err(FmError::InvalidName {
                name: name.to_string(),
            });
        }
        let entries = self.session.list_entries()?;
        let hit = entries
            .iter()
            .find(|e| matches(&e.name, name))
            .ok_or_else(|| FmError::NotFound {
                name: name.to_string(),
            })?;

        let path = self.session.resolve(&hit.name);
        open_file(&path, self.launcher)?;
        Ok(path)
    }
}
