use chat_upload_ui::Error;
use chat_upload_ui::config::AppConfig;
use serial_test::serial;
use std::env;
use std::fs;
use std::time::Duration;

const BIN: &str = "chat-upload-ui";

// Helper to clear environment variables that might interfere with tests
fn clear_env_vars() {
    unsafe {
        env::remove_var("CHATUI_CLIENT__BASE_URL");
        env::remove_var("CHATUI_CLIENT__TIMEOUT_SECS");
        env::remove_var("CHAT_BASE_URL");
        env::remove_var("CHAT_LOAD_HISTORY");
        env::remove_var("LOG_JSON");
        env::remove_var("CONFIG_FILE");
    }
}

#[test]
#[serial]
fn test_default_config() {
    clear_env_vars();

    let config = AppConfig::load_from_args([BIN]).expect("defaults should load");
    assert_eq!(config.client.base_url, "http://127.0.0.1:5000");
    assert_eq!(config.client.chat_path, "/chat");
    assert_eq!(config.client.upload_path, "/upload");
    assert_eq!(config.client.history_path, "/history");
    assert!(config.client.load_history);
    assert!(config.client.timeout().is_none());
    assert!(!config.logging.json);
    assert_eq!(config.logging.level, "info");
}

#[test]
#[serial]
fn test_env_override() {
    clear_env_vars();
    unsafe {
        env::set_var("CHATUI_CLIENT__BASE_URL", "http://chat.test:9090");
        env::set_var("CHATUI_CLIENT__TIMEOUT_SECS", "15");
    }

    let config = AppConfig::load_from_args([BIN]).expect("Failed to load config");
    assert_eq!(config.client.base_url, "http://chat.test:9090");
    assert_eq!(config.client.timeout(), Some(Duration::from_secs(15)));

    clear_env_vars();
}

#[test]
#[serial]
fn test_cli_beats_env() {
    clear_env_vars();
    unsafe {
        env::set_var("CHATUI_CLIENT__BASE_URL", "http://from-env:1");
    }

    let config = AppConfig::load_from_args([
        BIN,
        "--base-url",
        "http://from-cli:2",
        "--load-history",
        "false",
    ])
    .expect("Failed to load config");
    assert_eq!(config.client.base_url, "http://from-cli:2");
    assert!(!config.client.load_history);

    clear_env_vars();
}

#[test]
#[serial]
fn test_file_load() {
    clear_env_vars();

    let dir = tempfile::tempdir().expect("tempdir");
    let file_path = dir.path().join("client.yaml");
    fs::write(
        &file_path,
        r#"
client:
  base_url: "http://files.test:7070"
  upload_path: "/api/upload"
logging:
  json: true
"#,
    )
    .expect("Failed to write temp config");

    let path = file_path.to_string_lossy().into_owned();
    let config =
        AppConfig::load_from_args([BIN, "--config", path.as_str()]).expect("config from file");
    assert_eq!(config.client.base_url, "http://files.test:7070");
    assert_eq!(config.client.upload_path, "/api/upload");
    // Untouched keys keep their defaults.
    assert_eq!(config.client.chat_path, "/chat");
    assert!(config.logging.json);
}

#[test]
#[serial]
fn test_missing_explicit_file_is_an_error() {
    clear_env_vars();

    let result = AppConfig::load_from_args([BIN, "--config", "/no/such/config.yaml"]);
    assert!(matches!(result, Err(Error::Config(_))));
}

#[test]
#[serial]
fn test_unknown_flag_is_an_error() {
    clear_env_vars();

    assert!(matches!(
        AppConfig::load_from_args([BIN, "--no-such-flag"]),
        Err(Error::Config(_))
    ));
}
