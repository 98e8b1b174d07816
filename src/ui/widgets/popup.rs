// src/ui/widgets/popup.rs
//! Modal overlays: result lists, text prompts and confirmations.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::ui::layout::centered_rect;

/// Render a titled box of result lines over the listing.
pub fn render_popup(f: &mut Frame<'_>, area: Rect, title: &str, lines: &[String]) {
    // borders + footer
    let height = (lines.len() as u16).saturating_add(4);
    let rect = centered_rect(70, height, area);

    let mut text: Vec<Line> = lines.iter().map(|l| Line::from(l.as_str())).collect();
    text.push(Line::from(""));
    text.push(Line::styled("Esc to close", Style::default().add_modifier(Modifier::DIM)));

    f.render_widget(Clear, rect);
    f.render_widget(
        Paragraph::new(text)
            .wrap(Wrap { trim: false })
            .block(Block::default().borders(Borders::ALL).title(title.to_string())),
        rect,
    );
}

/// Render a one-line text prompt with a visible cursor.
pub fn render_prompt(f: &mut Frame<'_>, area: Rect, title: &str, input: &str) {
    let rect = centered_rect(60, 3, area);
    f.render_widget(Clear, rect);
    f.render_widget(
        Paragraph::new(format!("{input}█"))
            .block(Block::default().borders(Borders::ALL).title(title.to_string())),
        rect,
    );
}

/// Render a yes/no question.
pub fn render_confirm(f: &mut Frame<'_>, area: Rect, question: &str) {
    let rect = centered_rect(60, 4, area);
    f.render_widget(Clear, rect);
    f.render_widget(
        Paragraph::new(vec![Line::from(question), Line::from("[y] yes   [n] no")])
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL).title("Confirm")),
        rect,
    );
}
