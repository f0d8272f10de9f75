use std::fmt;

/// n8n API key, sent as the `X-N8N-API-KEY` header
///
/// The key is never printed by `Debug` or `Display`.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// The raw key, for building the request header
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ApiKey(***)")
    }
}

impl fmt::Display for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "***")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_is_redacted() {
        let key = ApiKey::new("n8n_api_abc123");
        assert_eq!(key.expose(), "n8n_api_abc123");
        assert_eq!(format!("{}", key), "***");
        assert!(!format!("{:?}", key).contains("abc123"));
    }
}
