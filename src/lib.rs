// src/lib.rs
//! smartfm - a terminal file manager with a little file intelligence.
//!
//! The core is a [`fs::DirectorySession`] plus pure heuristics over its
//! listings ([`intel`]) and a command interpreter ([`command`]) that maps
//! free-text or spoken phrases to those operations. The [`ui`] and [`app`]
//! modules are a ratatui front end on top of it.

pub mod app;
pub mod command;
pub mod config;
pub mod error;
pub mod fs;
pub mod intel;
pub mod speech;
pub mod ui;

pub use error::{FmError, Result};
