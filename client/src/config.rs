use serde::Deserialize;
use std::time::Duration;

const DEFAULT_API_BASE: &str = "http://127.0.0.1:8000/api";

/// Runtime knobs for the client. Every field has a default so a partial
/// JSON document (or none at all) is enough.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub api_base_url: String,
    pub request_timeout_ms: u64,
    pub search_debounce_ms: u64,
    pub login_path: String,
    pub default_page_size: u32,
    pub admin_page_size: u32,
    pub new_releases_limit: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE.to_string(),
            request_timeout_ms: 10_000,
            search_debounce_ms: 300,
            login_path: "/login".to_string(),
            default_page_size: 20,
            admin_page_size: 100,
            new_releases_limit: 12,
        }
    }
}

impl ClientConfig {
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        let url = url.into();
        if !url.is_empty() {
            self.api_base_url = url.trim_end_matches('/').to_string();
        }
        self
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_document_keeps_defaults() {
        let cfg: ClientConfig =
            serde_json::from_str(r#"{ "request_timeout_ms": 2500 }"#).unwrap();
        assert_eq!(cfg.request_timeout(), Duration::from_millis(2500));
        assert_eq!(cfg.search_debounce(), Duration::from_millis(300));
        assert_eq!(cfg.api_base_url, DEFAULT_API_BASE);
    }

    #[test]
    fn base_url_override_drops_trailing_slash() {
        let cfg = ClientConfig::default().with_base_url("https://films.example/api/");
        assert_eq!(cfg.api_base_url, "https://films.example/api");
        let cfg = ClientConfig::default().with_base_url("");
        assert_eq!(cfg.api_base_url, DEFAULT_API_BASE);
    }
}
