// src/ui/layout.rs
//! Layout computation for the UI panels.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Computed layout areas for rendering.
pub struct ComputedLayout {
    /// Current directory banner
    pub header: Rect,
    /// Directory listing
    pub list: Rect,
    /// Status message and key hints
    pub status: Rect,
}

/// Split the terminal into header, listing and status bar.
pub fn compute_layout(area: Rect) -> ComputedLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(2),
        ])
        .split(area);

    ComputedLayout {
        header: chunks[0],
        list: chunks[1],
        status: chunks[2],
    }
}

/// A rectangle `percent_x` wide and `height` rows tall, centered in `area`.
pub fn centered_rect(percent_x: u16, height: u16, area: Rect) -> Rect {
    let height = height.min(area.height);
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(height),
            Constraint::Fill(1),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
