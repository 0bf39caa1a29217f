//! Chat server API: wire types and the backend seam.
//!
//! - [`types`]: request/response DTOs for `/chat`, `/upload` and `/history`
//! - [`client`]: [`HttpBackend`], the reqwest implementation of [`ChatBackend`]

mod client;
mod types;

use async_trait::async_trait;

use crate::error::Result;
use crate::view::SelectedFile;

pub use client::{HttpBackend, Routes};
pub use types::{ChatReply, ChatRequest, HistoryEntry, HistoryResponse, UploadResult};

/// The remote side of the chat UI.
///
/// One call is one request/response cycle. Implementations must not retry.
#[async_trait]
pub trait ChatBackend: Send + Sync + std::fmt::Debug {
    /// Send a user message and return the decoded reply body.
    async fn send_chat(&self, message: &str) -> Result<ChatReply>;

    /// Upload a file as multipart field `file`.
    async fn upload(&self, file: &SelectedFile) -> Result<UploadResult>;

    /// Fetch past exchanges, newest first.
    async fn history(&self) -> Result<HistoryResponse>;
}
