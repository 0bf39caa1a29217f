//! Chat UI controller.
//!
//! Wires a [`ChatView`] to a [`ChatBackend`]. Each operation is a single
//! request/response cycle: no retries, no cancellation, no queuing. Errors
//! stop here and become log lines or static status text.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::api::ChatBackend;
use crate::message::ChatMessage;
use crate::view::{ChatView, SelectedFile};

/// Status shown when upload is pressed with nothing picked.
pub const NO_FILE_SELECTED: &str = "No file selected.";
/// Status shown when the server accepted a file without saying anything.
pub const FILE_UPLOADED: &str = "File uploaded!";
/// Status shown when the upload request or its response failed.
pub const UPLOAD_FAILED: &str = "Error uploading file.";

/// What [`ChatUiController::send_message`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    /// Input was empty after trimming. Nothing was rendered or sent.
    Empty,
    /// The reply was rendered as a bot message.
    Replied(String),
    /// The request failed. Only the user message was rendered.
    Failed,
}

/// What [`ChatUiController::upload_file`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadOutcome {
    /// No file was selected. No request was made.
    NoFile,
    /// The server answered; carries the status text that was shown.
    Uploaded(String),
    /// The request failed.
    Failed,
}

/// Drives the chat page.
///
/// Clones share the view and the backend, so a clone can be moved into a
/// spawned task while the caller keeps handling input.
#[derive(Debug, Clone)]
pub struct ChatUiController {
    view: Arc<dyn ChatView>,
    backend: Arc<dyn ChatBackend>,
}

impl ChatUiController {
    pub fn new(view: Arc<dyn ChatView>, backend: Arc<dyn ChatBackend>) -> Self {
        Self { view, backend }
    }

    fn render(&self, message: ChatMessage) {
        self.view.append_message(message);
        self.view.scroll_to_end();
    }

    /// Send the text in the input field.
    ///
    /// The user message is rendered before the request goes out and is
    /// never rolled back. A reply without a `reply` field renders as empty
    /// text.
    pub async fn send_message(&self) -> SendOutcome {
        match self.take_input() {
            Some(text) => self.deliver(text).await,
            None => SendOutcome::Empty,
        }
    }

    /// Read, render and clear the input. `None` when there is nothing to send.
    fn take_input(&self) -> Option<String> {
        let text = self.view.input_text().trim().to_string();
        if text.is_empty() {
            return None;
        }
        self.render(ChatMessage::user(text.clone()));
        self.view.clear_input();
        Some(text)
    }

    async fn deliver(&self, text: String) -> SendOutcome {
        match self.backend.send_chat(&text).await {
            Ok(reply) => {
                let reply = reply.reply.unwrap_or_default();
                self.render(ChatMessage::bot(reply.clone()));
                SendOutcome::Replied(reply)
            }
            Err(e) => {
                error!(name: "chat.send.failed", error = %e, "Error sending chat message");
                SendOutcome::Failed
            }
        }
    }

    /// Upload the file chosen in the picker and report on the status line.
    pub async fn upload_file(&self) -> UploadOutcome {
        match self.take_selection() {
            Some(file) => self.transfer(file).await,
            None => UploadOutcome::NoFile,
        }
    }

    fn take_selection(&self) -> Option<SelectedFile> {
        let file = self.view.selected_file();
        if file.is_none() {
            self.view.set_status(NO_FILE_SELECTED);
        }
        file
    }

    async fn transfer(&self, file: SelectedFile) -> UploadOutcome {
        match self.backend.upload(&file).await {
            Ok(result) => {
                let status = result
                    .message
                    .filter(|m| !m.is_empty())
                    .unwrap_or_else(|| FILE_UPLOADED.to_string());
                info!(name: "upload.completed", file = %file.file_name, status = %status, "Upload finished");
                self.view.set_status(&status);
                UploadOutcome::Uploaded(status)
            }
            Err(e) => {
                self.view.set_status(UPLOAD_FAILED);
                error!(name: "upload.failed", file = %file.file_name, error = %e, "Upload Error");
                UploadOutcome::Failed
            }
        }
    }

    /// Render stored exchanges, oldest first.
    ///
    /// Returns the number of exchanges rendered; zero on failure.
    pub async fn load_history(&self) -> usize {
        let history = match self.backend.history().await {
            Ok(h) => h.history,
            Err(e) => {
                error!(name: "history.load.failed", error = %e, "Error loading chat history");
                return 0;
            }
        };

        // Server order is newest first.
        for entry in history.iter().rev() {
            self.view.append_message(ChatMessage::user(entry.user.clone()));
            self.view.append_message(ChatMessage::bot(entry.bot.clone()));
        }
        if !history.is_empty() {
            self.view.scroll_to_end();
        }
        info!(name: "history.loaded", exchanges = history.len(), "Chat history loaded");
        history.len()
    }

    /// Read, render and clear the input now; return the request as a
    /// future that owns everything it needs.
    ///
    /// Lets a caller put the request on a task it tracks itself.
    pub fn prepare_send(&self) -> impl Future<Output = SendOutcome> + Send + 'static {
        let text = self.take_input();
        let this = self.clone();
        async move {
            match text {
                Some(text) => this.deliver(text).await,
                None => SendOutcome::Empty,
            }
        }
    }

    /// Read the selection now; return the upload as an owned future.
    pub fn prepare_upload(&self) -> impl Future<Output = UploadOutcome> + Send + 'static {
        let file = self.take_selection();
        let this = self.clone();
        async move {
            match file {
                Some(file) => this.transfer(file).await,
                None => UploadOutcome::NoFile,
            }
        }
    }

    /// Fire-and-forget [`Self::send_message`].
    ///
    /// The input is read, rendered and cleared before this returns; only
    /// the request runs on the spawned task.
    pub fn spawn_send_message(&self) -> JoinHandle<SendOutcome> {
        tokio::spawn(self.prepare_send())
    }

    /// Fire-and-forget [`Self::upload_file`]. The selection is read before
    /// this returns.
    pub fn spawn_upload_file(&self) -> JoinHandle<UploadOutcome> {
        tokio::spawn(self.prepare_upload())
    }
}
