//! Test utilities for integration tests
use std::env;
use std::fs;
use std::sync::{Arc, RwLock};
use std::time::SystemTime;

use axum::{Router, body::Body};

use davinci::api::AppState;
use davinci::api::app;
use davinci::core::AppConfig;
use davinci::core::db::async_db;

/// Creates a test application router backed by a temporary database.
///
/// The server holds one transcript per process, so tests that mutate
/// it need a `#[serial]` to avoid stepping on each other.
pub async fn test_app() -> Router {
    test_app_with_hostname("https://generativelanguage.googleapis.com").await
}

/// Same as `test_app` but pointed at a mock API server.
pub async fn test_app_with_hostname(api_hostname: &str) -> Router {
    // Create a unique directory for the test with a timestamp-based
    // name to avoid collisions between test binaries
    let temp_dir = env::temp_dir();
    let ts = SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .unwrap()
        .as_nanos()
        .to_string();
    let dir = temp_dir.join(ts);
    let db_path = dir.join("db");
    fs::create_dir_all(&db_path).expect("Failed to create db directory");

    let db_path_str = db_path.to_str().unwrap();
    let db = async_db(db_path_str)
        .await
        .expect("Failed to connect to async db");

    let app_config = AppConfig {
        storage_path: dir.display().to_string(),
        db_path: db_path_str.to_string(),
        api_hostname: api_hostname.to_string(),
        ..AppConfig::default()
    };
    let app_state = AppState::new(db, app_config);
    app(Arc::new(RwLock::new(app_state)))
}

/// Collect a response body into a string. SSE bodies end once the
/// exchange task drops its sender, so this also drains streams.
pub async fn body_to_string(body: Body) -> String {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Failed to read response body");
    String::from_utf8(bytes.to_vec()).expect("Response body was not utf-8")
}
