use std::fmt;

/// CSRF token read from the `csrftoken` cookie
///
/// The value is opaque and written verbatim into the `X-CSRFToken` header.
/// `Debug` never prints the value.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct CsrfToken(String);

impl CsrfToken {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for CsrfToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CsrfToken").field(&"[REDACTED]").finish()
    }
}

impl From<String> for CsrfToken {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for CsrfToken {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_is_redacted() {
        let token = CsrfToken::new("s3cr3t-value");
        let debug = format!("{token:?}");
        assert!(!debug.contains("s3cr3t-value"));
        assert!(debug.contains("REDACTED"));
    }

    #[test]
    fn test_default_is_empty() {
        assert!(CsrfToken::default().is_empty());
        assert_eq!(CsrfToken::from("abc").as_str(), "abc");
    }
}
