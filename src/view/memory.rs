//! Headless in-process view.

use std::sync::{Arc, RwLock};

use super::{ChatView, SelectedFile};
use crate::message::{ChatMessage, MessageList};

/// A [`ChatView`] that keeps everything in memory.
///
/// Clones share state, so a test can hold one handle while the controller
/// drives another.
#[derive(Debug, Clone, Default)]
pub struct MemoryView {
    inner: Arc<RwLock<MemoryViewState>>,
}

#[derive(Debug, Default)]
struct MemoryViewState {
    input: String,
    messages: MessageList,
    selected: Option<SelectedFile>,
    status: String,
    scrolls: usize,
}

impl MemoryView {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Type into the text input, replacing what was there.
    pub fn set_input(&self, text: impl Into<String>) {
        self.inner.write().unwrap().input = text.into();
    }

    /// Choose a file in the picker.
    pub fn select_file(&self, file: SelectedFile) {
        self.inner.write().unwrap().selected = Some(file);
    }

    /// Snapshot of the rendered messages.
    #[must_use]
    pub fn messages(&self) -> MessageList {
        self.inner.read().unwrap().messages.clone()
    }

    #[must_use]
    pub fn message_count(&self) -> usize {
        self.inner.read().unwrap().messages.len()
    }

    pub fn clear_messages(&self) {
        self.inner.write().unwrap().messages.clear();
    }

    #[must_use]
    pub fn status(&self) -> String {
        self.inner.read().unwrap().status.clone()
    }

    /// How many times the history was scrolled to its end.
    #[must_use]
    pub fn scroll_count(&self) -> usize {
        self.inner.read().unwrap().scrolls
    }
}

impl ChatView for MemoryView {
    fn input_text(&self) -> String {
        self.inner.read().unwrap().input.clone()
    }

    fn clear_input(&self) {
        self.inner.write().unwrap().input.clear();
    }

    fn append_message(&self, message: ChatMessage) {
        self.inner.write().unwrap().messages.push(message);
    }

    fn scroll_to_end(&self) {
        self.inner.write().unwrap().scrolls += 1;
    }

    fn selected_file(&self) -> Option<SelectedFile> {
        self.inner.read().unwrap().selected.clone()
    }

    fn set_status(&self, text: &str) {
        text.clone_into(&mut self.inner.write().unwrap().status);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_state() {
        let view = MemoryView::new();
        let other = view.clone();

        other.set_input("typed");
        assert_eq!(view.input_text(), "typed");

        view.append_message(ChatMessage::user("a"));
        assert_eq!(other.message_count(), 1);
    }

    #[test]
    fn test_status_is_overwritten() {
        let view = MemoryView::new();
        view.set_status("first");
        view.set_status("second");
        assert_eq!(view.status(), "second");
    }
}
