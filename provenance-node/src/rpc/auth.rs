/// API key configuration for RPC authentication.
#[derive(Debug, Clone)]
pub struct RpcAuthConfig {
    /// If set, mutation methods require this key as their `api_key` parameter.
    pub api_key: Option<String>,
}

impl RpcAuthConfig {
    /// Create a new auth config with no authentication required.
    pub fn open() -> Self {
        Self { api_key: None }
    }

    /// Create a new auth config requiring the given API key.
    pub fn with_key(key: String) -> Self {
        Self { api_key: Some(key) }
    }

    /// Check if a provided key matches the configured API key.
    /// Returns true if no API key is configured (open access) or if the key matches.
    pub fn check(&self, provided: Option<&str>) -> bool {
        match &self.api_key {
            None => true,
            Some(key) => provided == Some(key.as_str()),
        }
    }
}
