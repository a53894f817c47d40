//! Application Configuration
//!
//! Values fixed at build time, shared through context.

/// Base URL used when `ADMIN_API_URL` is not set at build time
pub const DEFAULT_API_URL: &str = "/api/v1";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// REST API root, without trailing slash
    pub api_base_url: String,
    /// `limit` sent with list requests
    pub fetch_limit: u32,
    /// Rows per page in client-side paged tables
    pub page_size: usize,
    /// Delay before a search box triggers filtering
    pub search_debounce_ms: u32,
    /// Records kept by the in-memory logger
    pub log_capacity: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            fetch_limit: 100,
            page_size: 20,
            search_debounce_ms: 500,
            log_capacity: rolling_logger::DEFAULT_CAPACITY,
        }
    }
}

impl AppConfig {
    /// Read build-time overrides
    pub fn from_env() -> Self {
        Self::with_api_url(option_env!("ADMIN_API_URL"))
    }

    /// API root usable by the HTTP client; a path-only base is resolved against the page origin
    pub fn absolute_api_url(&self, origin: Option<&str>) -> String {
        match origin {
            Some(origin) if self.api_base_url.starts_with('/') => {
                format!("{}{}", origin.trim_end_matches('/'), self.api_base_url)
            }
            _ => self.api_base_url.clone(),
        }
    }

    fn with_api_url(url: Option<&str>) -> Self {
        let mut config = Self::default();
        if let Some(url) = url.map(str::trim).filter(|u| !u.is_empty()) {
            config.api_base_url = url.trim_end_matches('/').to_string();
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_api_url() {
        assert_eq!(AppConfig::with_api_url(None).api_base_url, "/api/v1");
        assert_eq!(AppConfig::with_api_url(Some("  ")).api_base_url, "/api/v1");
    }

    #[test]
    fn test_override_strips_trailing_slash() {
        let config = AppConfig::with_api_url(Some("https://api.example.com/api/v1/"));
        assert_eq!(config.api_base_url, "https://api.example.com/api/v1");
        assert_eq!(config.fetch_limit, 100);
        assert_eq!(config.absolute_api_url(Some("http://localhost:8080")), "https://api.example.com/api/v1");
    }

    #[test]
    fn test_relative_base_uses_origin() {
        let config = AppConfig::default();
        assert_eq!(config.absolute_api_url(Some("https://admin.example.com/")), "https://admin.example.com/api/v1");
        assert_eq!(config.absolute_api_url(None), "/api/v1");
    }
}
