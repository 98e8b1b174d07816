// src/ui/widgets/status_bar.rs
//! Bottom status line.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Line,
    widgets::Paragraph,
};

use crate::app::state::StatusLine;
use crate::ui::keybindings::KEY_HINTS;

/// Render the latest message above the key hints.
pub fn render_status(f: &mut Frame<'_>, area: Rect, status: Option<&StatusLine>) {
    let message = match status {
        Some(s) if s.is_error => Line::styled(s.text.clone(), Style::default().fg(Color::Red)),
        Some(s) => Line::styled(s.text.clone(), Style::default().fg(Color::Green)),
        None => Line::from(""),
    };
    let hints = Line::styled(KEY_HINTS, Style::default().add_modifier(Modifier::DIM));
    f.render_widget(Paragraph::new(vec![message, hints]), area);
}
