// src/command/mod.rs
//! Command interpreter - free text in, typed intents and outcomes out.

pub mod dispatch;
pub mod intent;
pub mod interpreter;

pub use dispatch::{Dispatcher, Outcome};
pub use intent::{CommandIntent, parse};
pub use interpreter::{Interpreter, InterpreterState, Step};
