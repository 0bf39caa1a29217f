//! Line-oriented terminal view.

use std::io::{self, Write};
use std::sync::{Mutex, RwLock};

use rustyline::ExternalPrinter;

use crate::message::{ChatMessage, MessageList, Sender};
use crate::view::{ChatView, SelectedFile};

/// A [`ChatView`] that prints each message and status update as one line.
///
/// The message list is also kept in memory for `/export`. Printing and
/// storing happen under the `state` lock, so the screen and the stored list
/// agree on order. Lock order is always `state` then `out`.
pub struct TerminalView {
    state: RwLock<TerminalState>,
    out: Mutex<Box<dyn Write + Send>>,
}

#[derive(Debug, Default)]
struct TerminalState {
    input: String,
    messages: MessageList,
    selected: Option<SelectedFile>,
    status: String,
}

impl std::fmt::Debug for TerminalView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TerminalView")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl TerminalView {
    /// Print to stdout.
    #[must_use]
    pub fn stdout() -> Self {
        Self::with_writer(std::io::stdout())
    }

    pub fn with_writer(out: impl Write + Send + 'static) -> Self {
        Self {
            state: RwLock::new(TerminalState::default()),
            out: Mutex::new(Box::new(out)),
        }
    }

    /// Put a line into the input field before sending it.
    pub fn set_input(&self, text: impl Into<String>) {
        self.state.write().unwrap().input = text.into();
    }

    /// Replace the file picker selection.
    pub fn select_file(&self, file: Option<SelectedFile>) {
        self.state.write().unwrap().selected = file;
    }

    pub fn messages(&self) -> MessageList {
        self.state.read().unwrap().messages.clone()
    }

    pub fn clear_messages(&self) {
        self.state.write().unwrap().messages.clear();
    }

    pub fn status(&self) -> String {
        self.state.read().unwrap().status.clone()
    }

    /// Print an informational line that is not part of the transcript.
    pub fn info(&self, text: &str) {
        self.print(&format!("* {text}"));
    }

    fn print(&self, line: &str) {
        let mut out = self.out.lock().unwrap();
        // A closed stdout has nowhere to report to.
        let _ = writeln!(out, "{line}");
        let _ = out.flush();
    }
}

/// Writer that hands each flushed chunk to a line editor's external printer,
/// so output lands above the prompt instead of over it.
pub struct PromptWriter<P> {
    printer: P,
    pending: Vec<u8>,
}

impl<P> std::fmt::Debug for PromptWriter<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PromptWriter")
            .field("pending", &self.pending.len())
            .finish_non_exhaustive()
    }
}

impl<P: ExternalPrinter> PromptWriter<P> {
    pub fn new(printer: P) -> Self {
        Self {
            printer,
            pending: Vec::new(),
        }
    }
}

impl<P: ExternalPrinter> Write for PromptWriter<P> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.pending.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        if self.pending.is_empty() {
            return Ok(());
        }
        // The printer ends the line itself.
        let text = String::from_utf8_lossy(&self.pending)
            .trim_end_matches('\n')
            .to_string();
        self.pending.clear();
        self.printer
            .print(text)
            .map_err(|e| io::Error::other(e.to_string()))
    }
}

impl ChatView for TerminalView {
    fn input_text(&self) -> String {
        self.state.read().unwrap().input.clone()
    }

    fn clear_input(&self) {
        self.state.write().unwrap().input.clear();
    }

    fn append_message(&self, message: ChatMessage) {
        let label = match message.sender {
            Sender::User => "You",
            Sender::Bot => "Bot",
        };
        let mut state = self.state.write().unwrap();
        self.print(&format!("{label}: {}", message.text));
        state.messages.push(message);
    }

    fn selected_file(&self) -> Option<SelectedFile> {
        self.state.read().unwrap().selected.clone()
    }

    fn set_status(&self, text: &str) {
        let mut state = self.state.write().unwrap();
        text.clone_into(&mut state.status);
        self.print(&format!("[upload] {text}"));
    }
}
