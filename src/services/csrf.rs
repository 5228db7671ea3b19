//! CSRF token attachment for unsafe HTTP methods.

use reqwest::Method;

use crate::domain::models::{CsrfToken, OutgoingRequest};
use crate::domain::ports::RequestInterceptor;

/// Header the backend reads the CSRF token from
pub const CSRF_HEADER: &str = "X-CSRFToken";

/// Methods that never carry a CSRF token. Matched case-sensitively.
pub const SAFE_METHODS: [&str; 4] = ["GET", "HEAD", "OPTIONS", "TRACE"];

pub fn is_safe_method(method: &Method) -> bool {
    SAFE_METHODS.contains(&method.as_str())
}

/// Returns true if a request with `method` must carry a CSRF token
pub fn should_send_csrf(method: &Method) -> bool {
    !is_safe_method(method)
}

/// Sets `X-CSRFToken` on requests with an unsafe method
///
/// Safe requests are returned unchanged. An existing token header is
/// overwritten. The token is written as-is, even when empty.
pub fn attach_csrf(mut request: OutgoingRequest, token: &CsrfToken) -> OutgoingRequest {
    if should_send_csrf(&request.method) {
        request.set_header(CSRF_HEADER, token.as_str());
    }
    request
}

/// [`RequestInterceptor`] binding a token into [`attach_csrf`]
#[derive(Debug, Clone)]
pub struct CsrfInterceptor {
    token: CsrfToken,
}

impl CsrfInterceptor {
    pub const fn new(token: CsrfToken) -> Self {
        Self { token }
    }
}

impl RequestInterceptor for CsrfInterceptor {
    fn intercept(&self, request: OutgoingRequest) -> OutgoingRequest {
        attach_csrf(request, &self.token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use reqwest::Url;

    fn request(method: Method) -> OutgoingRequest {
        OutgoingRequest::new(method, Url::parse("https://example.com/api/items").unwrap())
            .with_header("Accept", "application/json")
    }

    #[test]
    fn test_safe_methods_leave_headers_untouched() {
        let token = CsrfToken::new("tok");
        for method in [Method::GET, Method::HEAD, Method::OPTIONS, Method::TRACE] {
            let original = request(method);
            let attached = attach_csrf(original.clone(), &token);
            assert_eq!(attached, original);
        }
    }

    #[test]
    fn test_unsafe_methods_get_token() {
        let token = CsrfToken::new("tok");
        for method in [Method::POST, Method::PUT, Method::PATCH, Method::DELETE] {
            let attached = attach_csrf(request(method), &token);
            assert_eq!(attached.header(CSRF_HEADER), Some("tok"));
            assert_eq!(attached.header("Accept"), Some("application/json"));
            assert_eq!(attached.headers.len(), 2);
        }
    }

    #[test]
    fn test_lowercase_method_is_unsafe() {
        let method = Method::from_bytes(b"get").unwrap();
        assert!(should_send_csrf(&method));

        let attached = attach_csrf(request(method), &CsrfToken::new("tok"));
        assert_eq!(attached.header(CSRF_HEADER), Some("tok"));
    }

    #[test]
    fn test_existing_token_is_overwritten() {
        let stale = request(Method::POST).with_header("x-csrftoken", "stale");
        let attached = attach_csrf(stale, &CsrfToken::new("fresh"));

        assert_eq!(attached.header(CSRF_HEADER), Some("fresh"));
        assert_eq!(attached.headers.len(), 2);
    }

    #[test]
    fn test_empty_token_is_written_verbatim() {
        let attached = attach_csrf(request(Method::DELETE), &CsrfToken::default());
        assert_eq!(attached.header(CSRF_HEADER), Some(""));
    }

    #[test]
    fn test_interceptor_uses_bound_token() {
        let interceptor = CsrfInterceptor::new(CsrfToken::new("bound"));
        let sent = interceptor.intercept(request(Method::PUT));
        assert_eq!(sent.header(CSRF_HEADER), Some("bound"));
    }

    proptest! {
        #[test]
        fn prop_only_listed_methods_are_safe(name in "[A-Za-z]{1,10}") {
            let method = Method::from_bytes(name.as_bytes()).unwrap();
            let expected_safe = SAFE_METHODS.contains(&name.as_str());
            prop_assert_eq!(is_safe_method(&method), expected_safe);
        }

        #[test]
        fn prop_attach_is_idempotent(token in "[A-Za-z0-9]{0,32}", name in "[A-Z]{1,8}") {
            let method = Method::from_bytes(name.as_bytes()).unwrap();
            let token = CsrfToken::new(token);
            let once = attach_csrf(request(method), &token);
            let twice = attach_csrf(once.clone(), &token);
            prop_assert_eq!(once, twice);
        }
    }
}
