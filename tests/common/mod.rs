//! Common test utilities for integration tests
//!
//! Provides shared spec fixtures and helpers used across multiple
//! integration test files.

#![allow(dead_code)]

use serde_json::{json, Value};

/// OpenAPI 3 document whose server is relative to the spec location
pub fn items_spec() -> Value {
    json!({
        "openapi": "3.0.3",
        "info": {"title": "Items API", "version": "1.0.0"},
        "servers": [{"url": "/api"}],
        "paths": {
            "/items": {
                "get": {
                    "operationId": "listItems",
                    "tags": ["items"],
                    "parameters": [{"name": "page", "in": "query"}]
                },
                "post": {
                    "operationId": "createItem",
                    "tags": ["items"],
                    "requestBody": {"required": true, "content": {"application/json": {}}}
                }
            },
            "/items/{itemId}": {
                "parameters": [{"name": "itemId", "in": "path", "required": true}],
                "delete": {"operationId": "deleteItem", "tags": ["items"]},
                "head": {"operationId": "itemExists", "tags": ["items"]}
            }
        }
    })
}

pub fn items_spec_text() -> String {
    items_spec().to_string()
}

/// Setup test logging
///
/// Initializes tracing subscriber for test output.
/// Call this at the beginning of tests that need logging.
pub fn setup_test_logging() {
    use tracing_subscriber::fmt;

    let _ = fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}
