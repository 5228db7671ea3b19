use async_trait::async_trait;

use crate::domain::errors::ClientError;
use crate::domain::models::{ApiResponse, OutgoingRequest};

/// Sends fully-built requests
///
/// Implementations must not alter the request; any status code is returned
/// as a response, not an error.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn send(&self, request: OutgoingRequest) -> Result<ApiResponse, ClientError>;
}
