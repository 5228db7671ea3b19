//! Request and response values exchanged between an `ApiClient` and its transport.

use reqwest::{Method, Url};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// A fully-built request about to leave the process
///
/// Header names keep the casing they were inserted with; lookups and
/// replacements are case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingRequest {
    pub method: Method,
    pub url: Url,
    pub headers: BTreeMap<String, String>,
    pub body: Option<Value>,
}

impl OutgoingRequest {
    pub fn new(method: Method, url: Url) -> Self {
        Self {
            method,
            url,
            headers: BTreeMap::new(),
            body: None,
        }
    }

    /// Builder form of [`set_header`](Self::set_header)
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_header(name, value);
        self
    }

    #[must_use]
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Sets a header, replacing any existing header with the same name in any casing
    pub fn set_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        self.headers.retain(|existing, _| !existing.eq_ignore_ascii_case(&name));
        self.headers.insert(name, value.into());
    }

    /// Case-insensitive header lookup
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Named arguments for an operation call
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OperationParams {
    /// Path, query, header and cookie parameters keyed by parameter name
    #[serde(default)]
    pub values: BTreeMap<String, Value>,

    /// JSON request body
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<Value>,
}

impl OperationParams {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.insert(name.into(), value.into());
        self
    }

    #[must_use]
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }
}

/// Response returned by an operation call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: u16,

    /// Response headers, names lowercased
    pub headers: BTreeMap<String, String>,

    /// Parsed JSON body, or the raw text as a JSON string when it is not JSON
    pub body: Value,
}

impl ApiResponse {
    /// True for client and server error statuses (400 and above)
    pub const fn is_error(&self) -> bool {
        self.status >= 400
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> OutgoingRequest {
        OutgoingRequest::new(
            Method::POST,
            Url::parse("https://example.com/pets").unwrap(),
        )
    }

    #[test]
    fn test_set_header_replaces_any_casing() {
        let mut req = request().with_header("x-csrftoken", "old");
        req.set_header("X-CSRFToken", "new");

        assert_eq!(req.headers.len(), 1);
        assert_eq!(req.header("x-csrftoken"), Some("new"));
        assert!(req.headers.contains_key("X-CSRFToken"));
    }

    #[test]
    fn test_header_lookup_is_case_insensitive() {
        let req = request().with_header("Content-Type", "application/json");
        assert_eq!(req.header("content-type"), Some("application/json"));
        assert_eq!(req.header("accept"), None);
    }

    #[test]
    fn test_operation_params_builder() {
        let params = OperationParams::new()
            .with("petId", 7)
            .with("name", "rex")
            .with_body(serde_json::json!({"a": 1}));

        assert_eq!(params.get("petId"), Some(&Value::from(7)));
        assert_eq!(params.get("name"), Some(&Value::from("rex")));
        assert!(params.body.is_some());
    }

    #[test]
    fn test_response_error_threshold() {
        let mut response = ApiResponse {
            status: 204,
            headers: BTreeMap::new(),
            body: Value::Null,
        };
        assert!(!response.is_error());
        response.status = 399;
        assert!(!response.is_error());
        response.status = 400;
        assert!(response.is_error());
    }
}
