//! Wire types for the chat server.
//!
//! Every response field is optional on the wire: the server answers
//! validation failures with the same shapes, and a missing field is
//! handled by the controller rather than rejected here.

use serde::{Deserialize, Serialize};

// =============================================================================
// Chat
// =============================================================================

/// Body of `POST /chat`.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    /// The user's message, already trimmed.
    pub message: String,
}

/// Response from `POST /chat`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatReply {
    /// The bot's reply. Rendered verbatim.
    #[serde(default)]
    pub reply: Option<String>,
}

// =============================================================================
// Upload
// =============================================================================

/// Response from `POST /upload`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UploadResult {
    /// Status text supplied by the server.
    #[serde(default)]
    pub message: Option<String>,
}

// =============================================================================
// History
// =============================================================================

/// One stored exchange.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub user: String,
    pub bot: String,
}

/// Response from `GET /history`. Entries are newest first.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HistoryResponse {
    #[serde(default)]
    pub history: Vec<HistoryEntry>,
}
