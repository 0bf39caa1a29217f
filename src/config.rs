//! Layered configuration.
//!
//! Priority: CLI flag > CLI env var > `CHATUI_` env > config file > defaults.

use std::path::Path;
use std::time::Duration;

use clap::Parser;
use config::{Config, Environment, File};
use serde::Deserialize;

use crate::error::Result;

/// Config file picked up from the working directory when none is given.
const CWD_CONFIG_FILE: &str = "config.yaml";

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file path
    #[arg(short, long, env = "CONFIG_FILE")]
    pub config: Option<String>,

    /// Base URL of the chat server
    #[arg(long, env = "CHAT_BASE_URL")]
    pub base_url: Option<String>,

    /// Load the conversation history on start-up
    #[arg(long, env = "CHAT_LOAD_HISTORY")]
    pub load_history: Option<bool>,

    /// Emit logs as JSON
    #[arg(long, env = "LOG_JSON")]
    pub log_json: Option<bool>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub client: ClientConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub chat_path: String,
    pub upload_path: String,
    pub history_path: String,
    pub load_history: bool,
    /// Per-request timeout. Unset means requests may wait indefinitely.
    pub timeout_secs: Option<u64>,
}

impl ClientConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub json: bool,
    pub level: String,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        Self::load_from_args(std::env::args())
    }

    pub fn load_from_args<I, T>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let cli =
            Cli::try_parse_from(args).map_err(|e| config::ConfigError::Message(e.to_string()))?;

        let mut builder = Config::builder()
            .set_default("client.base_url", "http://127.0.0.1:5000")?
            .set_default("client.chat_path", "/chat")?
            .set_default("client.upload_path", "/upload")?
            .set_default("client.history_path", "/history")?
            .set_default("client.load_history", true)?
            .set_default("logging.json", false)?
            .set_default("logging.level", "info")?;

        // An explicit file must exist; the cwd fallback is optional.
        match &cli.config {
            Some(path) => builder = builder.add_source(File::with_name(path).required(true)),
            None if Path::new(CWD_CONFIG_FILE).exists() => {
                builder = builder.add_source(File::with_name(CWD_CONFIG_FILE).required(false));
            }
            None => {}
        }

        // E.g. CHATUI_CLIENT__BASE_URL=http://chat.internal:8080
        builder = builder.add_source(
            Environment::with_prefix("CHATUI")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        // clap has already folded its own env vars into `cli`.
        if let Some(url) = cli.base_url {
            builder = builder.set_override("client.base_url", url)?;
        }
        if let Some(load) = cli.load_history {
            builder = builder.set_override("client.load_history", load)?;
        }
        if let Some(json) = cli.log_json {
            builder = builder.set_override("logging.json", json)?;
        }

        Ok(builder.build()?.try_deserialize()?)
    }
}
