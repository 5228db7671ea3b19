use async_trait::async_trait;
use reqwest::Url;

use crate::domain::errors::ClientError;

/// Retrieves the spec document served at a URL
#[async_trait]
pub trait SpecSource: Send + Sync {
    /// Returns the document as normalized JSON text
    async fn fetch_spec(&self, spec_url: &Url) -> Result<String, ClientError>;
}
