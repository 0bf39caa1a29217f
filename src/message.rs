//! Chat messages and the rendered message list.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Who produced a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

impl Sender {
    /// CSS class used when the transcript is rendered as HTML.
    pub fn css_class(self) -> &'static str {
        match self {
            Self::User => "user-message",
            Self::Bot => "bot-message",
        }
    }
}

impl fmt::Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User => f.write_str("user"),
            Self::Bot => f.write_str("bot"),
        }
    }
}

/// A single rendered chat entry. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub text: String,
    pub sender: Sender,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            sender: Sender::User,
        }
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            sender: Sender::Bot,
        }
    }
}

/// Append-only list of messages in render order.
#[derive(Debug, Clone, Default)]
pub struct MessageList {
    messages: Vec<ChatMessage>,
}

impl MessageList {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    #[must_use]
    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChatMessage> {
        self.messages.iter()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Empty the visible list.
    pub fn clear(&mut self) {
        self.messages.clear();
    }
}

impl<'a> IntoIterator for &'a MessageList {
    type Item = &'a ChatMessage;
    type IntoIter = std::slice::Iter<'a, ChatMessage>;

    fn into_iter(self) -> Self::IntoIter {
        self.messages.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_keeps_append_order() {
        let mut list = MessageList::new();
        assert!(list.is_empty());

        list.push(ChatMessage::user("hello"));
        list.push(ChatMessage::bot("hi"));

        assert_eq!(list.len(), 2);
        assert_eq!(list.as_slice()[0].sender, Sender::User);
        assert_eq!(list.last().unwrap().text, "hi");
    }

    #[test]
    fn test_sender_serializes_lowercase() {
        let json = serde_json::to_string(&ChatMessage::bot("x")).unwrap();
        assert_eq!(json, r#"{"text":"x","sender":"bot"}"#);
    }
}
