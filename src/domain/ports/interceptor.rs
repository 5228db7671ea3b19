use crate::domain::models::OutgoingRequest;

/// Hook run on every request an `ApiClient` sends
///
/// Interceptors take the request by value and return the request to send.
pub trait RequestInterceptor: Send + Sync {
    fn intercept(&self, request: OutgoingRequest) -> OutgoingRequest;
}

impl<F> RequestInterceptor for F
where
    F: Fn(OutgoingRequest) -> OutgoingRequest + Send + Sync,
{
    fn intercept(&self, request: OutgoingRequest) -> OutgoingRequest {
        self(request)
    }
}
