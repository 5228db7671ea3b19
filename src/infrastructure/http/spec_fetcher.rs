use async_trait::async_trait;
use reqwest::{Client as ReqwestClient, Url};
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use crate::domain::errors::ClientError;
use crate::domain::ports::SpecSource;

/// Fetches spec documents with a plain GET
///
/// No credentials or CSRF headers are sent. A non-success status is only
/// logged; the body must still parse as JSON.
#[derive(Debug, Clone)]
pub struct HttpSpecFetcher {
    http_client: ReqwestClient,
}

impl HttpSpecFetcher {
    pub const fn new(http_client: ReqwestClient) -> Self {
        Self { http_client }
    }
}

#[async_trait]
impl SpecSource for HttpSpecFetcher {
    #[instrument(skip(self), fields(url = %spec_url))]
    async fn fetch_spec(&self, spec_url: &Url) -> Result<String, ClientError> {
        debug!("fetching spec document");
        let response = self.http_client.get(spec_url.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            warn!(%status, "spec endpoint returned non-success status");
        }

        let body = response.text().await?;
        let document: Value = serde_json::from_str(&body).map_err(ClientError::SpecParse)?;
        let normalized = serde_json::to_string(&document).map_err(ClientError::SpecParse)?;

        info!(bytes = normalized.len(), "spec document fetched");
        Ok(normalized)
    }
}
