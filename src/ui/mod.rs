//! Terminal front end.
//!
//! # Structure
//!
//! - [`command`]: slash-command parsing for the input line
//! - [`terminal`]: [`TerminalView`], a [`crate::view::ChatView`] that prints to a writer
//! - [`html`]: transcript export as an HTML fragment
//! - [`tasks`]: [`InFlight`], the set of requests still running

pub mod command;
pub mod html;
pub mod tasks;
pub mod terminal;

pub use command::{Command, help_text, parse_command};
pub use html::render_transcript;
pub use tasks::InFlight;
pub use terminal::{PromptWriter, TerminalView};
