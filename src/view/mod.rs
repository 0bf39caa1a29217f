//! The UI surface the controller drives.
//!
//! A [`ChatView`] stands in for the four page elements of a chat page: the
//! message history, the text input, the file picker, and the status line.
//! Views use interior mutability so one handle can be shared by every
//! in-flight operation; each append is atomic relative to the others.

mod memory;

use std::path::Path;

use crate::error::Result;
use crate::message::ChatMessage;

pub use memory::MemoryView;

/// A file picked by the user, read into memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub file_name: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

impl SelectedFile {
    pub fn new(file_name: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        let file_name = file_name.into();
        let content_type = mime_guess::from_path(&file_name)
            .first_or_octet_stream()
            .to_string();
        Self {
            file_name,
            content_type,
            data: data.into(),
        }
    }

    /// Read a file from disk. The content type is guessed from the extension.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());
        Ok(Self::new(file_name, data))
    }
}

/// UI handle passed to the controller.
pub trait ChatView: Send + Sync + std::fmt::Debug {
    /// Current contents of the text input.
    fn input_text(&self) -> String;

    /// Empty the text input.
    fn clear_input(&self);

    /// Append one entry to the message history.
    fn append_message(&self, message: ChatMessage);

    /// Bring the newest entry into view.
    fn scroll_to_end(&self) {}

    /// The file currently chosen in the file picker, if any.
    fn selected_file(&self) -> Option<SelectedFile>;

    /// Overwrite the status line.
    fn set_status(&self, text: &str);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_type_from_extension() {
        let pdf = SelectedFile::new("notes.pdf", b"%PDF".to_vec());
        assert_eq!(pdf.content_type, "application/pdf");

        let unknown = SelectedFile::new("blob", Vec::new());
        assert_eq!(unknown.content_type, "application/octet-stream");
    }

    #[tokio::test]
    async fn test_from_path_reads_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hello.txt");
        tokio::fs::write(&path, b"hi there").await.unwrap();

        let file = SelectedFile::from_path(&path).await.unwrap();
        assert_eq!(file.file_name, "hello.txt");
        assert_eq!(file.content_type, "text/plain");
        assert_eq!(file.data, b"hi there");
    }

    #[tokio::test]
    async fn test_from_path_missing_file() {
        assert!(SelectedFile::from_path("/definitely/not/here.pdf").await.is_err());
    }
}
