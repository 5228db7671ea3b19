//! Parsed API description (Swagger 2.0 / OpenAPI 3.x)
//!
//! Only the parts needed to build requests are kept: operations, their
//! parameters and the server/base-path information. Schemas are ignored.

use reqwest::{Method, Url};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashSet};

use crate::domain::errors::SpecError;

/// Tag used for operations that declare none
pub const DEFAULT_TAG: &str = "default";

const PATH_METHODS: [(&str, Method); 8] = [
    ("get", Method::GET),
    ("put", Method::PUT),
    ("post", Method::POST),
    ("delete", Method::DELETE),
    ("options", Method::OPTIONS),
    ("head", Method::HEAD),
    ("patch", Method::PATCH),
    ("trace", Method::TRACE),
];

const MAX_REF_DEPTH: usize = 16;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecVersion {
    Swagger2,
    OpenApi3(String),
}

/// Where a parameter is placed on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ParameterLocation {
    Path,
    Query,
    Header,
    Cookie,
    Body,
    FormData,
}

impl ParameterLocation {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Path => "path",
            Self::Query => "query",
            Self::Header => "header",
            Self::Cookie => "cookie",
            Self::Body => "body",
            Self::FormData => "formData",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "in")]
    pub location: ParameterLocation,
    #[serde(default)]
    pub required: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operation {
    pub operation_id: String,
    pub method: Method,
    /// Path template, e.g. `/pets/{petId}`
    pub path: String,
    pub tags: Vec<String>,
    pub summary: Option<String>,
    pub parameters: Vec<Parameter>,
    /// `Some(required)` when an OpenAPI 3 `requestBody` is declared
    pub request_body: Option<bool>,
}

impl Operation {
    /// The Swagger 2.0 `in: body` parameter, if declared
    pub fn body_parameter(&self) -> Option<&Parameter> {
        self.parameters
            .iter()
            .find(|p| p.location == ParameterLocation::Body)
    }

    pub fn accepts_body(&self) -> bool {
        self.request_body.is_some() || self.body_parameter().is_some()
    }

    pub fn requires_body(&self) -> bool {
        self.request_body.unwrap_or(false) || self.body_parameter().is_some_and(|p| p.required)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum ServerInfo {
    Swagger {
        host: Option<String>,
        base_path: String,
        schemes: Vec<String>,
    },
    OpenApi {
        url: String,
    },
}

/// A validated API description
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiSpec {
    pub version: SpecVersion,
    pub title: Option<String>,
    pub api_version: Option<String>,
    server: ServerInfo,
    operations: Vec<Operation>,
}

impl ApiSpec {
    /// Parse spec text. Fails on invalid JSON or an invalid document structure.
    pub fn parse(text: &str) -> Result<Self, SpecError> {
        let document: Value = serde_json::from_str(text)?;
        Self::from_value(&document)
    }

    pub fn from_value(document: &Value) -> Result<Self, SpecError> {
        let root = document.as_object().ok_or(SpecError::NotAnObject)?;
        let version = parse_version(root)?;

        let info = root.get("info");
        let title = info
            .and_then(|i| i.get("title"))
            .and_then(Value::as_str)
            .map(str::to_string);
        let api_version = info
            .and_then(|i| i.get("version"))
            .and_then(Value::as_str)
            .map(str::to_string);

        let server = match version {
            SpecVersion::Swagger2 => ServerInfo::Swagger {
                host: root.get("host").and_then(Value::as_str).map(str::to_string),
                base_path: root
                    .get("basePath")
                    .and_then(Value::as_str)
                    .unwrap_or("/")
                    .to_string(),
                schemes: root
                    .get("schemes")
                    .and_then(Value::as_array)
                    .map(|s| s.iter().filter_map(Value::as_str).map(str::to_string).collect())
                    .unwrap_or_default(),
            },
            SpecVersion::OpenApi3(_) => ServerInfo::OpenApi {
                url: first_server_url(root),
            },
        };

        let operations = parse_operations(document, root)?;

        Ok(Self {
            version,
            title,
            api_version,
            server,
            operations,
        })
    }

    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    pub fn operation(&self, operation_id: &str) -> Option<&Operation> {
        self.operations
            .iter()
            .find(|op| op.operation_id == operation_id)
    }

    /// Operations grouped by tag; untagged operations land under [`DEFAULT_TAG`]
    pub fn tags(&self) -> BTreeMap<&str, Vec<&Operation>> {
        let mut grouped: BTreeMap<&str, Vec<&Operation>> = BTreeMap::new();
        for op in &self.operations {
            if op.tags.is_empty() {
                grouped.entry(DEFAULT_TAG).or_default().push(op);
            }
            for tag in &op.tags {
                grouped.entry(tag.as_str()).or_default().push(op);
            }
        }
        grouped
    }

    /// Absolute base URL for operation paths
    ///
    /// Relative OpenAPI servers and host-less Swagger documents are resolved
    /// against `spec_location`. Returns `None` when neither the document nor
    /// the location provide an origin.
    pub fn base_url(&self, spec_location: Option<&Url>) -> Option<Url> {
        match &self.server {
            ServerInfo::Swagger {
                host,
                base_path,
                schemes,
            } => {
                let base_path = if base_path.starts_with('/') {
                    base_path.clone()
                } else {
                    format!("/{base_path}")
                };
                match host {
                    Some(host) => {
                        let scheme = spec_location
                            .map(Url::scheme)
                            .filter(|s| schemes.is_empty() || schemes.iter().any(|x| x == s))
                            .or_else(|| schemes.first().map(String::as_str))
                            .unwrap_or("http");
                        Url::parse(&format!("{scheme}://{host}{base_path}")).ok()
                    }
                    None => spec_location.and_then(|loc| loc.join(&base_path).ok()),
                }
            }
            ServerInfo::OpenApi { url } => match Url::parse(url) {
                Ok(absolute) if !absolute.cannot_be_a_base() => Some(absolute),
                _ => spec_location.and_then(|loc| loc.join(url).ok()),
            },
        }
    }
}

fn parse_version(root: &Map<String, Value>) -> Result<SpecVersion, SpecError> {
    if let Some(swagger) = root.get("swagger") {
        return match swagger.as_str() {
            Some("2.0") => Ok(SpecVersion::Swagger2),
            Some(other) => Err(SpecError::UnsupportedVersion(other.to_string())),
            None => Err(SpecError::UnsupportedVersion(swagger.to_string())),
        };
    }
    if let Some(openapi) = root.get("openapi") {
        return match openapi.as_str() {
            Some(v) if v.starts_with("3.") => Ok(SpecVersion::OpenApi3(v.to_string())),
            Some(other) => Err(SpecError::UnsupportedVersion(other.to_string())),
            None => Err(SpecError::UnsupportedVersion(openapi.to_string())),
        };
    }
    Err(SpecError::MissingVersion)
}

/// First entry of `servers`, with `{variable}` placeholders replaced by their defaults
fn first_server_url(root: &Map<String, Value>) -> String {
    let Some(server) = root
        .get("servers")
        .and_then(Value::as_array)
        .and_then(|servers| servers.first())
    else {
        return "/".to_string();
    };

    let mut url = server
        .get("url")
        .and_then(Value::as_str)
        .unwrap_or("/")
        .to_string();

    if let Some(variables) = server.get("variables").and_then(Value::as_object) {
        for (name, variable) in variables {
            if let Some(default) = variable.get("default").and_then(Value::as_str) {
                url = url.replace(&format!("{{{name}}}"), default);
            }
        }
    }
    url
}

fn parse_operations(
    document: &Value,
    root: &Map<String, Value>,
) -> Result<Vec<Operation>, SpecError> {
    let paths = match root.get("paths") {
        None => return Ok(Vec::new()),
        Some(Value::Object(paths)) => paths,
        Some(_) => return Err(SpecError::InvalidPaths("expected an object".to_string())),
    };

    let mut operations = Vec::new();
    let mut seen = HashSet::new();

    for (path, item) in paths {
        let item = resolve_ref(document, item)?;
        let item = item.as_object().ok_or_else(|| {
            SpecError::InvalidPaths(format!("path item `{path}` is not an object"))
        })?;

        let shared = parse_parameters(document, item.get("parameters"))
            .map_err(|reason| invalid_operation("*", path, reason))?;

        for (key, method) in &PATH_METHODS {
            let Some(raw) = item.get(*key) else {
                continue;
            };
            let op = parse_operation(document, path, method, raw, &shared)?;
            if !seen.insert(op.operation_id.clone()) {
                return Err(SpecError::DuplicateOperationId(op.operation_id));
            }
            operations.push(op);
        }
    }

    Ok(operations)
}

fn parse_operation(
    document: &Value,
    path: &str,
    method: &Method,
    raw: &Value,
    shared: &[Parameter],
) -> Result<Operation, SpecError> {
    let raw = raw
        .as_object()
        .ok_or_else(|| invalid_operation(method.as_str(), path, "expected an object".to_string()))?;

    let operation_id = match raw.get("operationId") {
        None => generated_operation_id(method, path),
        Some(Value::String(id)) if !id.is_empty() => id.clone(),
        Some(_) => {
            return Err(invalid_operation(
                method.as_str(),
                path,
                "operationId must be a non-empty string".to_string(),
            ))
        }
    };

    let tags = raw
        .get("tags")
        .and_then(Value::as_array)
        .map(|t| t.iter().filter_map(Value::as_str).map(str::to_string).collect())
        .unwrap_or_default();

    let summary = raw
        .get("summary")
        .and_then(Value::as_str)
        .map(str::to_string);

    let own = parse_parameters(document, raw.get("parameters"))
        .map_err(|reason| invalid_operation(method.as_str(), path, reason))?;

    // Operation-level parameters override path-level ones with the same name and location
    let mut parameters: Vec<Parameter> = shared
        .iter()
        .filter(|p| {
            !own.iter()
                .any(|o| o.name == p.name && o.location == p.location)
        })
        .cloned()
        .collect();
    parameters.extend(own);

    let request_body = match raw.get("requestBody") {
        None => None,
        Some(body) => {
            let body = resolve_ref(document, body)?;
            Some(body.get("required").and_then(Value::as_bool).unwrap_or(false))
        }
    };

    Ok(Operation {
        operation_id,
        method: method.clone(),
        path: path.to_string(),
        tags,
        summary,
        parameters,
        request_body,
    })
}

fn parse_parameters(document: &Value, raw: Option<&Value>) -> Result<Vec<Parameter>, String> {
    let Some(raw) = raw else {
        return Ok(Vec::new());
    };
    let entries = raw
        .as_array()
        .ok_or_else(|| "parameters must be an array".to_string())?;

    entries
        .iter()
        .map(|entry| {
            let entry = resolve_ref(document, entry).map_err(|e| e.to_string())?;
            let mut param: Parameter = serde_json::from_value(entry.clone())
                .map_err(|e| format!("invalid parameter: {e}"))?;
            if param.location == ParameterLocation::Path {
                param.required = true;
            }
            Ok(param)
        })
        .collect()
}

/// Follows local `$ref` pointers (`#/...`)
fn resolve_ref<'a>(document: &'a Value, value: &'a Value) -> Result<&'a Value, SpecError> {
    let mut current = value;
    for _ in 0..MAX_REF_DEPTH {
        let Some(reference) = current.get("$ref").and_then(Value::as_str) else {
            return Ok(current);
        };
        let pointer = reference
            .strip_prefix('#')
            .ok_or_else(|| SpecError::UnresolvedReference(reference.to_string()))?;
        current = document
            .pointer(pointer)
            .ok_or_else(|| SpecError::UnresolvedReference(reference.to_string()))?;
    }
    Err(SpecError::UnresolvedReference(
        "reference chain too deep".to_string(),
    ))
}

fn generated_operation_id(method: &Method, path: &str) -> String {
    format!("{}{path}", method.as_str().to_ascii_lowercase())
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

fn invalid_operation(method: &str, path: &str, reason: String) -> SpecError {
    SpecError::InvalidOperation {
        method: method.to_string(),
        path: path.to_string(),
        reason,
    }
}
