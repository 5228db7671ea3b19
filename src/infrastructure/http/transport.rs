use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Client as ReqwestClient;
use serde_json::Value;
use std::time::Duration;

use crate::domain::errors::ClientError;
use crate::domain::models::{ApiResponse, HttpConfig, OutgoingRequest};
use crate::domain::ports::HttpTransport;

/// Builds the shared reqwest client
///
/// No timeout is set unless `timeout_secs` is configured.
pub fn build_http_client(config: &HttpConfig) -> Result<ReqwestClient, ClientError> {
    let mut builder = ReqwestClient::builder()
        .pool_max_idle_per_host(config.pool_max_idle_per_host)
        .tcp_nodelay(true);
    if let Some(secs) = config.timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    Ok(builder.build()?)
}

/// [`HttpTransport`] over a pooled reqwest client
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    http_client: ReqwestClient,
}

impl ReqwestTransport {
    pub fn new(config: &HttpConfig) -> Result<Self, ClientError> {
        Ok(Self::from_client(build_http_client(config)?))
    }

    pub const fn from_client(http_client: ReqwestClient) -> Self {
        Self { http_client }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: OutgoingRequest) -> Result<ApiResponse, ClientError> {
        let headers = to_header_map(&request)?;

        let mut builder = self
            .http_client
            .request(request.method, request.url)
            .headers(headers);
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();

        let text = response.text().await?;
        let body = if text.is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text).unwrap_or_else(|_| Value::String(text))
        };

        Ok(ApiResponse {
            status,
            headers,
            body,
        })
    }
}

fn to_header_map(request: &OutgoingRequest) -> Result<HeaderMap, ClientError> {
    let mut headers = HeaderMap::with_capacity(request.headers.len());
    for (name, value) in &request.headers {
        let header_name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|_| ClientError::InvalidHeader(name.clone()))?;
        let header_value =
            HeaderValue::from_str(value).map_err(|_| ClientError::InvalidHeader(name.clone()))?;
        headers.insert(header_name, header_value);
    }
    Ok(headers)
}
