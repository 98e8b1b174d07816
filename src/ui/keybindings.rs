// src/ui/keybindings.rs
//! Keyboard input handling and key mappings.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Actions available while browsing the listing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NavigationAction {
    Up,
    Down,
    Enter,
    Back,
    Open,
    Delete,
    NewFile,
    NewFolder,
    ChangeDirectory,
    Categorize,
    Recent,
    Search,
    Voice,
    TypedCommand,
    Refresh,
    Quit,
    None,
}

/// Convert a key event to a navigation action.
pub fn key_to_action(key: &KeyEvent) -> NavigationAction {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => NavigationAction::Quit,
            KeyCode::Char('r') => NavigationAction::Refresh,
            _ => NavigationAction::None,
        };
    }

    match key.code {
        KeyCode::Down | KeyCode::Char('j') => NavigationAction::Down,
        KeyCode::Up | KeyCode::Char('k') => NavigationAction::Up,
        KeyCode::Enter | KeyCode::Right => NavigationAction::Enter,
        KeyCode::Left | KeyCode::Backspace => NavigationAction::Back,
        KeyCode::Char('o') => NavigationAction::Open,
        KeyCode::Char('d') | KeyCode::Delete => NavigationAction::Delete,
        KeyCode::Char('n') => NavigationAction::NewFile,
        KeyCode::Char('f') => NavigationAction::NewFolder,
        KeyCode::Char('g') => NavigationAction::ChangeDirectory,
        KeyCode::Char('c') => NavigationAction::Categorize,
        KeyCode::Char('r') => NavigationAction::Recent,
        KeyCode::Char('/') => NavigationAction::Search,
        KeyCode::Char('v') => NavigationAction::Voice,
        KeyCode::Char(':') => NavigationAction::TypedCommand,
        KeyCode::Char('q') => NavigationAction::Quit,
        _ => NavigationAction::None,
    }
}

/// One-line reminder shown in the status bar.
pub const KEY_HINTS: &str = "↑↓ move  ⏎ open  ← up  n file  f folder  d delete  g cd  c categorize  r recent  / search  v voice  : command  q quit";
