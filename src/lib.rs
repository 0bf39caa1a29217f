//! Chat + file upload client
//!
//! A small chat front end: it reads user text and a picked file from a UI
//! surface, posts them to a chat server, and renders the replies into a
//! scrolling message list and a status line.
//!
//! # Architecture
//!
//! - **View**: [`view::ChatView`] is the UI handle (message list, text input,
//!   file picker, status line). [`view::MemoryView`] is headless;
//!   [`ui::TerminalView`] drives a terminal.
//! - **Backend**: [`api::ChatBackend`] is the server seam, implemented over
//!   reqwest by [`api::HttpBackend`] (`POST /chat`, `POST /upload`,
//!   `GET /history`).
//! - **Controller**: [`controller::ChatUiController`] wires the two together.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use chat_upload_ui::api::HttpBackend;
//! use chat_upload_ui::controller::ChatUiController;
//! use chat_upload_ui::view::MemoryView;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let view = MemoryView::new();
//! let backend = HttpBackend::new("http://127.0.0.1:5000")?;
//! let controller = ChatUiController::new(Arc::new(view.clone()), Arc::new(backend));
//!
//! view.set_input("Hello!");
//! controller.send_message().await;
//! assert_eq!(view.message_count(), 2);
//! # Ok(())
//! # }
//! ```

// Allow pedantic clippy warnings that don't add value for this codebase
#![allow(clippy::missing_fields_in_debug)]
#![allow(clippy::cargo_common_metadata)]
#![allow(clippy::multiple_crate_versions)]

pub mod api;
pub mod config;
pub mod controller;
pub mod error;
pub mod message;
pub mod telemetry;
pub mod ui;
pub mod view;

pub use controller::{ChatUiController, SendOutcome, UploadOutcome};
pub use error::{Error, Result};
