//! Terminal chat client.
//!
//! Plain lines are sent as chat messages; slash commands upload files,
//! reload history and export the transcript. See `/help`.

use mimalloc::MiMalloc;

/// Global allocator for improved performance (M-MIMALLOC-APPS).
#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use dotenvy::dotenv;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tokio::sync::{mpsc, oneshot};
use tracing::{error, info, warn};

use chat_upload_ui::api::HttpBackend;
use chat_upload_ui::config::AppConfig;
use chat_upload_ui::controller::ChatUiController;
use chat_upload_ui::telemetry;
use chat_upload_ui::ui::{
    Command, InFlight, PromptWriter, TerminalView, help_text, parse_command, render_transcript,
};
use chat_upload_ui::view::{ChatView, SelectedFile};

/// Lines buffered between the editor thread and the event loop.
const INPUT_BUFFER: usize = 16;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env (if present)
    let _ = dotenv();

    let config = AppConfig::load()?;
    telemetry::init(&config.logging);

    info!(
        name: "client.config.loaded",
        base_url = %config.client.base_url,
        load_history = config.client.load_history,
        "Client configuration loaded"
    );

    let backend = Arc::new(HttpBackend::from_config(&config.client)?);

    let (mut lines, printer) = spawn_line_reader();
    // Without an external printer (no tty, editor failed) print straight to stdout.
    let view = Arc::new(match printer.await {
        Ok(Some(out)) => TerminalView::with_writer(out),
        _ => TerminalView::stdout(),
    });
    let controller = ChatUiController::new(Arc::clone(&view) as Arc<dyn ChatView>, backend);

    view.info(&format!("Connected to {}", config.client.base_url));
    view.info("Type /help for commands, /quit to exit");

    if config.client.load_history {
        controller.load_history().await;
    }

    let mut inflight = InFlight::new();

    while let Some(line) = lines.recv().await {
        inflight.reap();

        let Some(command) = parse_command(&line) else {
            view.set_input(line);
            inflight.track(controller.prepare_send());
            continue;
        };

        match command {
            Command::Say(text) => {
                view.set_input(text);
                inflight.track(controller.prepare_send());
            }
            Command::Upload(path) => {
                if let Some(path) = path {
                    select_file(&view, &path).await;
                }
                inflight.track(controller.prepare_upload());
            }
            Command::History => {
                controller.load_history().await;
            }
            Command::Export(path) => {
                let html = render_transcript(&view.messages());
                match tokio::fs::write(&path, html).await {
                    Ok(()) => view.info(&format!("Transcript saved to {}", path.display())),
                    Err(e) => {
                        error!(name: "transcript.export.failed", path = %path.display(), error = %e, "Export failed");
                        view.info(&format!("Could not save transcript: {e}"));
                    }
                }
            }
            Command::Clear => {
                view.clear_messages();
                view.info("Messages cleared.");
            }
            Command::Help => {
                for line in help_text().lines() {
                    view.info(line);
                }
            }
            Command::Quit => break,
            Command::Invalid(message) => view.info(&message),
        }
    }

    // Replies still on the wire render before exit.
    inflight.drain().await;

    info!(name: "client.stopped", "Goodbye");
    Ok(())
}

/// Read `path` into the file picker. An unreadable path clears the selection.
async fn select_file(view: &TerminalView, path: &Path) {
    match SelectedFile::from_path(path).await {
        Ok(file) => {
            info!(name: "upload.file.selected", file = %file.file_name, size = file.data.len(), "File selected");
            view.select_file(Some(file));
        }
        Err(e) => {
            warn!(name: "upload.file.unreadable", path = %path.display(), error = %e, "Cannot read file");
            view.info(&format!("Cannot read {}: {e}", path.display()));
            view.select_file(None);
        }
    }
}

/// Run the line editor on its own thread and forward lines to the event loop.
///
/// The second receiver yields a writer that prints above the prompt, or
/// `None` when the terminal does not support one. The line channel closes on
/// Ctrl-C, Ctrl-D or an editor failure.
fn spawn_line_reader() -> (
    mpsc::Receiver<String>,
    oneshot::Receiver<Option<Box<dyn Write + Send>>>,
) {
    let (tx, rx) = mpsc::channel(INPUT_BUFFER);
    let (printer_tx, printer_rx) = oneshot::channel();

    std::thread::spawn(move || {
        let mut editor = match DefaultEditor::new() {
            Ok(editor) => editor,
            Err(e) => {
                error!(name: "editor.init.failed", error = %e, "Cannot start line editor");
                return;
            }
        };

        let printer = match editor.create_external_printer() {
            Ok(printer) => Some(Box::new(PromptWriter::new(printer)) as Box<dyn Write + Send>),
            Err(e) => {
                warn!(name: "editor.printer.unavailable", error = %e, "Printing to stdout");
                None
            }
        };
        let _ = printer_tx.send(printer);

        loop {
            match editor.readline("> ") {
                Ok(line) => {
                    if line.trim().is_empty() {
                        continue;
                    }
                    let _ = editor.add_history_entry(line.as_str());
                    if tx.blocking_send(line).is_err() {
                        break;
                    }
                }
                Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
                Err(e) => {
                    error!(name: "editor.read.failed", error = %e, "Error reading input");
                    break;
                }
            }
        }
    });

    (rx, printer_rx)
}
