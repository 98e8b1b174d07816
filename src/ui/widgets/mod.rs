// src/ui/widgets/mod.rs
//! Custom widgets for the file manager UI.

pub mod file_list;
pub mod popup;
pub mod status_bar;

// Re-export widget rendering functions
pub use file_list::render_file_list;
pub use popup::{render_confirm, render_popup, render_prompt};
pub use status_bar::render_status;
