//! HTTP backend for the chat server.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use super::ChatBackend;
use super::types::{ChatReply, ChatRequest, HistoryResponse, UploadResult};
use crate::config::ClientConfig;
use crate::error::Result;
use crate::view::SelectedFile;

/// Multipart field name the upload endpoint reads.
const UPLOAD_FIELD: &str = "file";

/// Endpoint paths, joined onto the base URL.
#[derive(Debug, Clone)]
pub struct Routes {
    pub chat: String,
    pub upload: String,
    pub history: String,
}

impl Default for Routes {
    fn default() -> Self {
        Self {
            chat: "/chat".to_string(),
            upload: "/upload".to_string(),
            history: "/history".to_string(),
        }
    }
}

/// reqwest-backed [`ChatBackend`].
///
/// ```rust,no_run
/// use chat_upload_ui::api::{ChatBackend, HttpBackend};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let backend = HttpBackend::new("http://127.0.0.1:5000")?;
/// let reply = backend.send_chat("Hello!").await?;
/// println!("{}", reply.reply.unwrap_or_default());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HttpBackend {
    base_url: Url,
    routes: Routes,
    http: reqwest::Client,
}

impl HttpBackend {
    /// Create a backend with default routes and a default reqwest client.
    pub fn new(base_url: impl AsRef<str>) -> Result<Self> {
        Self::with_client(base_url, reqwest::Client::new())
    }

    /// Create a backend with a custom reqwest client.
    pub fn with_client(base_url: impl AsRef<str>, http: reqwest::Client) -> Result<Self> {
        Ok(Self {
            base_url: Url::parse(base_url.as_ref())?,
            routes: Routes::default(),
            http,
        })
    }

    /// Build from the `client` config section.
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let backend = Self::with_client(&config.base_url, builder.build()?)?;
        Ok(backend.with_routes(Routes {
            chat: config.chat_path.clone(),
            upload: config.upload_path.clone(),
            history: config.history_path.clone(),
        }))
    }

    #[must_use]
    pub fn with_routes(mut self, routes: Routes) -> Self {
        self.routes = routes;
        self
    }

    fn url(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path)?)
    }

    /// Decode a JSON body whatever the status.
    ///
    /// The server reports validation failures as JSON bodies with a 4xx/5xx
    /// status, and those bodies are shown to the user like any other.
    async fn decode<T: DeserializeOwned>(
        response: reqwest::Response,
        endpoint: &'static str,
    ) -> Result<T> {
        let status = response.status();
        if !status.is_success() {
            warn!(
                name: "http.response.status",
                endpoint,
                status = status.as_u16(),
                "Non-success status, decoding body anyway"
            );
        }
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl ChatBackend for HttpBackend {
    async fn send_chat(&self, message: &str) -> Result<ChatReply> {
        let req = ChatRequest {
            message: message.to_string(),
        };
        debug!(name: "http.chat.request", len = message.len(), "POST chat");
        let response = self
            .http
            .post(self.url(&self.routes.chat)?)
            .json(&req)
            .send()
            .await?;
        Self::decode(response, "chat").await
    }

    async fn upload(&self, file: &SelectedFile) -> Result<UploadResult> {
        let part = Part::bytes(file.data.clone())
            .file_name(file.file_name.clone())
            .mime_str(&file.content_type)?;
        let form = Form::new().part(UPLOAD_FIELD, part);

        debug!(
            name: "http.upload.request",
            file = %file.file_name,
            size = file.data.len(),
            "POST upload"
        );
        let response = self
            .http
            .post(self.url(&self.routes.upload)?)
            .multipart(form)
            .send()
            .await?;
        Self::decode(response, "upload").await
    }

    async fn history(&self) -> Result<HistoryResponse> {
        let response = self
            .http
            .get(self.url(&self.routes.history)?)
            .send()
            .await?;
        Self::decode(response, "history").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_routes_join_onto_base() {
        let backend = HttpBackend::new("http://127.0.0.1:5000").unwrap();
        assert_eq!(
            backend.url(&backend.routes.chat).unwrap().as_str(),
            "http://127.0.0.1:5000/chat"
        );
        assert_eq!(
            backend.url(&backend.routes.upload).unwrap().as_str(),
            "http://127.0.0.1:5000/upload"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(HttpBackend::new("not a url").is_err());
    }

    #[test]
    fn test_custom_routes() {
        let backend = HttpBackend::new("http://localhost:8080/")
            .unwrap()
            .with_routes(Routes {
                chat: "/api/chat".into(),
                ..Routes::default()
            });
        assert_eq!(
            backend.url(&backend.routes.chat).unwrap().as_str(),
            "http://localhost:8080/api/chat"
        );
    }
}
