//! Error scenario and edge case tests
//!
//! Run with: cargo test --test error_scenarios_tests
//! Covers:
//! - Configuration errors
//! - Corrupted client storage
//! - Invalid tokens

use medlearn::auth::{validate_tab_token, AuthSettings, Authenticator, DemoDirectory};
use medlearn::config::{loader, AuthConfig, Config};
use medlearn::error::Error;
use medlearn::storage::{FileStorage, Storage, SESSION_KEY};
use std::fs;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

// ============================================================================
// Configuration Error Tests
// ============================================================================

#[test]
fn test_error_config_not_found() {
    let err = Error::ConfigNotFound;
    let msg = err.to_string();
    assert!(msg.contains("Config file not found"));
    assert!(msg.contains("medlearn init"));
}

#[test]
fn test_error_config_invalid_toml() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("medlearn.toml");
    fs::write(&path, "this is [ not valid toml").unwrap();

    let result = loader::load_config_from_path(&path);
    assert!(matches!(result, Err(Error::TomlParse(_))));
}

#[test]
fn test_error_config_unknown_role() {
    let toml_str = r#"
[[auth.accounts]]
email = "x@medlearn.edu"
name = "X"
role = "superuser"
"#;
    let result: Result<Config, _> = toml::from_str(toml_str);
    assert!(result.is_err(), "Unknown roles must be rejected at load time");
}

#[test]
fn test_error_invalid_bcrypt_cost() {
    let config = AuthConfig {
        bcrypt_cost: 1,
        ..AuthConfig::default()
    };
    assert!(matches!(
        AuthSettings::from_config(&config),
        Err(Error::Password(_))
    ));
}

// ============================================================================
// Storage Error Tests
// ============================================================================

#[tokio::test]
async fn test_corrupt_storage_file_allows_reauthentication() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("storage.json");
    fs::write(&path, "{ truncated").unwrap();

    let settings = AuthSettings::from_config(&AuthConfig::default())
        .unwrap()
        .with_delays(Duration::ZERO, Duration::ZERO);
    let auth = Authenticator::new(
        Arc::new(FileStorage::new(&path)),
        Arc::new(DemoDirectory::default()),
        settings,
    );

    assert!(auth.current_session().is_none());

    auth.logout().await;
    assert!(auth.login("student@medlearn.edu", "password").await);
    assert_eq!(
        auth.current_session().map(|s| s.email).as_deref(),
        Some("student@medlearn.edu")
    );

    let reopened = FileStorage::new(&path);
    assert!(reopened.get_item(SESSION_KEY).unwrap().is_some());
}

#[test]
fn test_session_value_with_wrong_shape() {
    let dir = TempDir::new().unwrap();
    let storage = FileStorage::new(dir.path().join("storage.json"));
    storage.set_item(SESSION_KEY, "{\"role\":\"student\"}").unwrap();

    let settings = AuthSettings::from_config(&AuthConfig::default()).unwrap();
    let auth = Authenticator::new(
        Arc::new(storage),
        Arc::new(DemoDirectory::default()),
        settings,
    );
    assert!(auth.current_session().is_none());
}

// ============================================================================
// Token Error Tests
// ============================================================================

#[test]
fn test_error_invalid_token() {
    let result = validate_tab_token("not-a-jwt-token", "secret");
    assert!(matches!(result, Err(Error::Token(_))));
}
