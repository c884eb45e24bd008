//! Where the REST API lives and how to authenticate against it.

pub const DEFAULT_NETBOX_URL: &str = "http://127.0.0.1:8000";

#[derive(Debug, Clone, PartialEq)]
pub struct ApiClientConfig {
    pub base_url: String,
    pub api_token: Option<String>,
}

impl ApiClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim().trim_end_matches('/').to_string(),
            api_token: None,
        }
    }

    /// `NETBOX_URL` and `NETBOX_API_TOKEN`, falling back to a local development server.
    pub fn from_env() -> Self {
        let base_url = std::env::var("NETBOX_URL").unwrap_or(DEFAULT_NETBOX_URL.to_string());
        let api_token = std::env::var("NETBOX_API_TOKEN").ok().filter(|t| !t.trim().is_empty());
        Self::new(base_url).with_api_token(api_token)
    }

    pub fn with_api_token(mut self, api_token: Option<String>) -> Self {
        self.api_token = api_token;
        self
    }

    /// Resolve a select's `data-url` against the base URL.
    pub fn endpoint(&self, path: &str) -> Option<String> {
        let trimmed = path.trim();
        if trimmed.is_empty() {
            return None;
        }
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            return Some(trimmed.to_string());
        }
        if trimmed.starts_with('/') {
            Some(format!("{}{}", self.base_url, trimmed))
        } else {
            Some(format!("{}/{}", self.base_url, trimmed))
        }
    }
}
