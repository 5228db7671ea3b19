// Integration tests for logging
// Logger initialization sets global state, so this binary holds a single test.

use serde_json::json;
use spec_client::domain::models::{LogFormat, LoggingConfig, RotationPolicy};
use spec_client::infrastructure::LoggerImpl;
use spec_client::{make_client, CsrfToken, OperationParams};
use std::fs;
use tempfile::TempDir;

#[tokio::test]
async fn test_file_logging_records_client_activity_without_token() {
    let temp_dir = TempDir::new().unwrap();
    let config = LoggingConfig {
        level: "debug".to_string(),
        format: LogFormat::Json,
        log_dir: Some(temp_dir.path().to_path_buf()),
        enable_console: false,
        rotation: RotationPolicy::Never,
    };
    let logger = LoggerImpl::init(&config).unwrap();

    let mut server = mockito::Server::new_async().await;
    let spec = json!({
        "openapi": "3.0.0",
        "servers": [{"url": server.url()}],
        "paths": {"/items": {"post": {"operationId": "createItem", "responses": {}}}}
    });
    let mock = server
        .mock("POST", "/items")
        .with_status(201)
        .with_body("{}")
        .create_async()
        .await;

    let client = make_client(&spec.to_string(), CsrfToken::new("very-secret-token")).unwrap();
    client
        .execute("createItem", &OperationParams::new().with_body(json!({})))
        .await
        .unwrap();
    mock.assert_async().await;

    // Flush the non-blocking writer
    drop(logger);

    let contents: String = fs::read_dir(temp_dir.path())
        .unwrap()
        .filter_map(Result::ok)
        .filter(|e| e.file_name().to_string_lossy().contains("spec-client.log"))
        .map(|e| fs::read_to_string(e.path()).unwrap())
        .collect();

    assert!(!contents.is_empty(), "log file should be written");

    // Records from other crates (the mock server echoes request headers) are out of scope
    let own_records: Vec<serde_json::Value> = contents
        .lines()
        .map(|line| serde_json::from_str(line).expect("each line is JSON"))
        .filter(|record: &serde_json::Value| {
            record["target"]
                .as_str()
                .is_some_and(|target| target.starts_with("spec_client"))
        })
        .collect();

    assert!(!own_records.is_empty(), "crate records should be logged");
    assert!(
        own_records.iter().any(|r| r.to_string().contains("createItem")),
        "log should name the operation"
    );
    for record in &own_records {
        assert!(
            !record.to_string().contains("very-secret-token"),
            "token leaked in {record}"
        );
    }
}
