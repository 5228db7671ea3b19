//! Spec-driven API client and its factory.
//!
//! An [`ApiClient`] exposes the operations of a parsed spec through
//! [`ApiClient::execute`]. Every request it builds goes through its
//! [`RequestInterceptor`] before reaching the [`HttpTransport`]; clients made
//! by [`ClientFactory`] always use a [`CsrfInterceptor`].

use reqwest::Url;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use crate::domain::errors::ClientError;
use crate::domain::models::{
    ApiResponse, ApiSpec, CsrfToken, Operation, OperationParams, OutgoingRequest,
    ParameterLocation,
};
use crate::domain::models::config::HttpConfig;
use crate::domain::ports::{HttpTransport, RequestInterceptor};
use crate::infrastructure::http::ReqwestTransport;
use crate::services::csrf::CsrfInterceptor;

/// Client whose operation set comes from a spec document at runtime
pub struct ApiClient {
    spec: ApiSpec,
    base_url: Option<Url>,
    interceptor: Arc<dyn RequestInterceptor>,
    transport: Arc<dyn HttpTransport>,
}

impl ApiClient {
    pub fn new(
        spec: ApiSpec,
        base_url: Option<Url>,
        interceptor: Arc<dyn RequestInterceptor>,
        transport: Arc<dyn HttpTransport>,
    ) -> Self {
        Self {
            spec,
            base_url,
            interceptor,
            transport,
        }
    }

    pub const fn spec(&self) -> &ApiSpec {
        &self.spec
    }

    pub const fn base_url(&self) -> Option<&Url> {
        self.base_url.as_ref()
    }

    pub fn operations(&self) -> &[Operation] {
        self.spec.operations()
    }

    /// Builds the request for an operation without running the interceptor
    pub fn build_request(
        &self,
        operation_id: &str,
        params: &OperationParams,
    ) -> Result<OutgoingRequest, ClientError> {
        let op = self
            .spec
            .operation(operation_id)
            .ok_or_else(|| ClientError::UnknownOperation(operation_id.to_string()))?;
        let base = self.base_url.as_ref().ok_or(ClientError::UnresolvedBaseUrl)?;

        let mut query = Vec::new();
        let mut headers = Vec::new();
        let mut cookies = Vec::new();

        for param in &op.parameters {
            if param.location == ParameterLocation::Body {
                continue;
            }

            let Some(value) = params.get(&param.name) else {
                if param.required {
                    return Err(missing(op, &param.name));
                }
                continue;
            };

            match param.location {
                ParameterLocation::Path | ParameterLocation::Body => {}
                ParameterLocation::Query => match value {
                    Value::Array(items) => {
                        query.extend(items.iter().map(|v| (param.name.clone(), value_to_string(v))));
                    }
                    _ => query.push((param.name.clone(), value_to_string(value))),
                },
                ParameterLocation::Header => {
                    headers.push((param.name.clone(), value_to_string(value)));
                }
                ParameterLocation::Cookie => {
                    cookies.push(format!("{}={}", param.name, value_to_string(value)));
                }
                ParameterLocation::FormData => {
                    return Err(ClientError::UnsupportedParameter {
                        parameter: param.name.clone(),
                        location: param.location.as_str().to_string(),
                    });
                }
            }
        }

        let body_parameter = op.body_parameter();
        let body = if op.accepts_body() {
            body_parameter
                .and_then(|p| params.get(&p.name))
                .or(params.body.as_ref())
                .cloned()
        } else {
            None
        };
        if body.is_none() && op.requires_body() {
            return Err(missing(op, body_parameter.map_or("body", |p| p.name.as_str())));
        }

        let mut url = base.clone();
        url.set_query(None);
        url.set_fragment(None);
        {
            let segments = op
                .path
                .split('/')
                .filter(|s| !s.is_empty())
                .map(|segment| expand_segment(op, segment, params))
                .collect::<Vec<_>>();
            let mut path = url
                .path_segments_mut()
                .map_err(|()| ClientError::invalid_url(base.as_str(), "cannot be a base URL"))?;
            path.pop_if_empty();
            path.extend(segments);
        }
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query.iter());
        }

        let mut request =
            OutgoingRequest::new(op.method.clone(), url).with_header("Accept", "application/json");
        if let Some(body) = body {
            request = request
                .with_header("Content-Type", "application/json")
                .with_body(body);
        }
        for (name, value) in headers {
            request.set_header(name, value);
        }
        if !cookies.is_empty() {
            request.set_header("Cookie", cookies.join("; "));
        }

        Ok(request)
    }

    /// Builds the request and runs it through the interceptor
    pub fn prepare(
        &self,
        operation_id: &str,
        params: &OperationParams,
    ) -> Result<OutgoingRequest, ClientError> {
        let request = self.build_request(operation_id, params)?;
        Ok(self.interceptor.intercept(request))
    }

    /// Invokes an operation by id
    ///
    /// Responses with a status of 400 or above are returned as
    /// [`ClientError::HttpStatus`].
    #[instrument(skip(self, operation_id, params), fields(operation = %operation_id))]
    pub async fn execute(
        &self,
        operation_id: &str,
        params: &OperationParams,
    ) -> Result<ApiResponse, ClientError> {
        let request = self.prepare(operation_id, params)?;
        debug!(method = %request.method, url = %request.url, "sending request");

        let response = self.transport.send(request).await?;
        if response.is_error() {
            warn!(status = response.status, "operation failed");
            return Err(ClientError::HttpStatus {
                status: response.status,
                body: value_to_string(&response.body),
            });
        }
        Ok(response)
    }
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("title", &self.spec.title)
            .field("base_url", &self.base_url.as_ref().map(Url::as_str))
            .field("operations", &self.spec.operations().len())
            .finish_non_exhaustive()
    }
}

/// Builds [`ApiClient`]s that attach a CSRF token to unsafe requests
#[derive(Clone)]
pub struct ClientFactory {
    transport: Arc<dyn HttpTransport>,
}

impl ClientFactory {
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self { transport }
    }

    /// Builds a client from inline spec text
    pub fn make_client(&self, spec_text: &str, token: CsrfToken) -> Result<ApiClient, ClientError> {
        self.make_client_at(spec_text, token, None)
    }

    /// Like [`make_client`](Self::make_client), resolving relative servers against `spec_location`
    #[instrument(skip(self, spec_text, token), fields(location = ?spec_location.map(Url::as_str)))]
    pub fn make_client_at(
        &self,
        spec_text: &str,
        token: CsrfToken,
        spec_location: Option<&Url>,
    ) -> Result<ApiClient, ClientError> {
        let spec = ApiSpec::parse(spec_text)?;
        let base_url = spec.base_url(spec_location);
        if base_url.is_none() {
            warn!("spec declares no absolute server URL; operation calls will fail");
        }
        if token.is_empty() {
            warn!("CSRF token is empty; unsafe requests will carry an empty header");
        }

        info!(
            title = spec.title.as_deref().unwrap_or("<untitled>"),
            operations = spec.operations().len(),
            "API client constructed"
        );

        Ok(ApiClient::new(
            spec,
            base_url,
            Arc::new(CsrfInterceptor::new(token)),
            Arc::clone(&self.transport),
        ))
    }
}

/// Builds a client from inline spec text using the default reqwest transport
pub fn make_client(spec_text: &str, token: CsrfToken) -> Result<ApiClient, ClientError> {
    let transport = ReqwestTransport::new(&HttpConfig::default())?;
    ClientFactory::new(Arc::new(transport)).make_client(spec_text, token)
}

fn missing(op: &Operation, parameter: &str) -> ClientError {
    ClientError::MissingParameter {
        operation: op.operation_id.clone(),
        parameter: parameter.to_string(),
    }
}

fn expand_segment(op: &Operation, segment: &str, params: &OperationParams) -> String {
    let mut expanded = segment.to_string();
    for param in op
        .parameters
        .iter()
        .filter(|p| p.location == ParameterLocation::Path)
    {
        if let Some(value) = params.get(&param.name) {
            expanded = expanded.replace(&format!("{{{}}}", param.name), &value_to_string(value));
        }
    }
    expanded
}

fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::csrf::CSRF_HEADER;
    use async_trait::async_trait;
    use reqwest::Method;
    use serde_json::json;
    use std::collections::BTreeMap;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingTransport {
        sent: Mutex<Vec<OutgoingRequest>>,
        status: u16,
    }

    #[async_trait]
    impl HttpTransport for RecordingTransport {
        async fn send(&self, request: OutgoingRequest) -> Result<ApiResponse, ClientError> {
            self.sent.lock().unwrap().push(request);
            Ok(ApiResponse {
                status: if self.status == 0 { 200 } else { self.status },
                headers: BTreeMap::new(),
                body: json!({"ok": true}),
            })
        }
    }

    fn spec_text() -> String {
        json!({
            "swagger": "2.0",
            "host": "api.example.com",
            "basePath": "/v1",
            "schemes": ["https"],
            "paths": {
                "/pets": {
                    "get": {
                        "operationId": "listPets",
                        "parameters": [
                            {"name": "tag", "in": "query"},
                            {"name": "X-Trace", "in": "header"}
                        ]
                    },
                    "post": {
                        "operationId": "createPet",
                        "parameters": [{"name": "pet", "in": "body", "required": true}]
                    }
                },
                "/pets/{petId}": {
                    "delete": {
                        "operationId": "deletePet",
                        "parameters": [{"name": "petId", "in": "path"}]
                    }
                },
                "/upload": {
                    "post": {
                        "operationId": "upload",
                        "parameters": [{"name": "file", "in": "formData"}]
                    }
                }
            }
        })
        .to_string()
    }

    fn client(transport: Arc<RecordingTransport>) -> ApiClient {
        ClientFactory::new(transport)
            .make_client(&spec_text(), CsrfToken::new("tok123"))
            .unwrap()
    }

    #[test]
    fn test_build_request_query_and_headers() {
        let client = client(Arc::new(RecordingTransport::default()));
        let params = OperationParams::new()
            .with("tag", json!(["dog", "cat"]))
            .with("X-Trace", "abc");

        let request = client.build_request("listPets", &params).unwrap();
        assert_eq!(request.method, Method::GET);
        assert_eq!(
            request.url.as_str(),
            "https://api.example.com/v1/pets?tag=dog&tag=cat"
        );
        assert_eq!(request.header("X-Trace"), Some("abc"));
        assert!(request.body.is_none());
    }

    #[test]
    fn test_build_request_path_is_encoded() {
        let client = client(Arc::new(RecordingTransport::default()));
        let params = OperationParams::new().with("petId", "a b/c");

        let request = client.build_request("deletePet", &params).unwrap();
        assert_eq!(
            request.url.as_str(),
            "https://api.example.com/v1/pets/a%20b%2Fc"
        );
    }

    #[test]
    fn test_missing_required_parameters() {
        let client = client(Arc::new(RecordingTransport::default()));

        assert!(matches!(
            client.build_request("deletePet", &OperationParams::new()),
            Err(ClientError::MissingParameter { parameter, .. }) if parameter == "petId"
        ));
        assert!(matches!(
            client.build_request("createPet", &OperationParams::new()),
            Err(ClientError::MissingParameter { parameter, .. }) if parameter == "pet"
        ));
    }

    #[test]
    fn test_body_selection_follows_declared_body() {
        let client = client(Arc::new(RecordingTransport::default()));

        let named = OperationParams::new()
            .with("pet", json!({"name": "named"}))
            .with_body(json!({"name": "generic"}));
        let request = client.build_request("createPet", &named).unwrap();
        assert_eq!(request.body, Some(json!({"name": "named"})));

        // No body declared, so a supplied one is dropped
        let stray = OperationParams::new().with_body(json!({"x": 1}));
        let request = client.build_request("listPets", &stray).unwrap();
        assert!(request.body.is_none());
        assert_eq!(request.header("Content-Type"), None);
    }

    #[test]
    fn test_unknown_operation_and_form_data() {
        let client = client(Arc::new(RecordingTransport::default()));

        assert!(matches!(
            client.build_request("nope", &OperationParams::new()),
            Err(ClientError::UnknownOperation(_))
        ));
        assert!(matches!(
            client.build_request("upload", &OperationParams::new().with("file", "x")),
            Err(ClientError::UnsupportedParameter { .. })
        ));
    }

    #[tokio::test]
    async fn test_execute_attaches_token_to_unsafe_requests_only() {
        let transport = Arc::new(RecordingTransport::default());
        let client = client(Arc::clone(&transport));

        client
            .execute("listPets", &OperationParams::new())
            .await
            .unwrap();
        client
            .execute(
                "createPet",
                &OperationParams::new().with_body(json!({"name": "rex"})),
            )
            .await
            .unwrap();

        let sent = transport.sent.lock().unwrap();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].header(CSRF_HEADER), None);
        assert_eq!(sent[1].header(CSRF_HEADER), Some("tok123"));
        assert_eq!(sent[1].header("Content-Type"), Some("application/json"));
        assert_eq!(sent[1].body, Some(json!({"name": "rex"})));
    }

    #[tokio::test]
    async fn test_execute_maps_error_status() {
        let transport = Arc::new(RecordingTransport {
            status: 403,
            ..Default::default()
        });
        let client = client(transport);

        let err = client
            .execute("deletePet", &OperationParams::new().with("petId", 1))
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::HttpStatus { status: 403, .. }));
    }

    #[test]
    fn test_invalid_spec_fails_construction() {
        let factory = ClientFactory::new(Arc::new(RecordingTransport::default()));
        let err = factory
            .make_client(r#"{"info": {}}"#, CsrfToken::default())
            .unwrap_err();
        assert!(err.is_spec_error());
    }

    #[test]
    fn test_relative_spec_without_location_cannot_build_requests() {
        let factory = ClientFactory::new(Arc::new(RecordingTransport::default()));
        let client = factory
            .make_client(
                r#"{"openapi": "3.0.0", "paths": {"/x": {"get": {"operationId": "x"}}}}"#,
                CsrfToken::default(),
            )
            .unwrap();

        assert!(client.base_url().is_none());
        assert!(matches!(
            client.build_request("x", &OperationParams::new()),
            Err(ClientError::UnresolvedBaseUrl)
        ));
    }
}
