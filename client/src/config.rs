use std::time::Duration;

use crate::transport::{ApiError, ApiResult};

/// Fixed prefix every resource route lives under.
pub const API_PREFIX: &str = "/api";

/// Base URL variable shared with the web frontend's build.
pub const PUBLIC_BASE_URL_ENV: &str = "NEXT_PUBLIC_BASE_URL";
/// Harness-specific base URL; wins over [`PUBLIC_BASE_URL_ENV`] when both are set.
pub const BASE_URL_ENV: &str = "API_BASE_URL";
pub const TIMEOUT_ENV: &str = "API_TIMEOUT_SECS";

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

impl ApiConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults overridden by the environment, see [`ApiConfig::with_env_overrides`].
    pub fn from_env() -> ApiResult<Self> {
        Self::default().with_env_overrides()
    }

    /// Base URL from `API_BASE_URL`, else `NEXT_PUBLIC_BASE_URL`; timeout
    /// from `API_TIMEOUT_SECS`. Unset or blank variables are ignored.
    pub fn with_env_overrides(mut self) -> ApiResult<Self> {
        if let Some(base_url) = [BASE_URL_ENV, PUBLIC_BASE_URL_ENV]
            .into_iter()
            .find_map(non_blank_env)
        {
            self.base_url = base_url;
        }

        if let Some(raw) = non_blank_env(TIMEOUT_ENV) {
            let secs = raw
                .parse::<u64>()
                .map_err(|e| ApiError::InvalidConfig {
                    message: format!("{} must be a whole number of seconds: {}", TIMEOUT_ENV, e),
                })?;
            self.timeout = Duration::from_secs(secs);
        }

        Ok(self)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Full URL of the API prefix, e.g. `http://localhost:3000/api`.
    pub fn api_base(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), API_PREFIX)
    }

    pub fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.api_base(), path)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.base_url.is_empty() {
            return Err("Base URL cannot be empty".to_string());
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err("Base URL must start with http:// or https://".to_string());
        }

        if self.timeout.is_zero() {
            return Err("Timeout must be greater than 0".to_string());
        }

        Ok(())
    }
}

fn non_blank_env(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        std::env::remove_var(BASE_URL_ENV);
        std::env::remove_var(PUBLIC_BASE_URL_ENV);
        std::env::remove_var(TIMEOUT_ENV);
    }

    #[test]
    fn test_default_config() {
        let config = ApiConfig::default();
        assert_eq!(config.base_url, "http://localhost:3000");
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = ApiConfig::new()
            .with_base_url("https://school.example.com")
            .with_timeout(Duration::from_secs(3));

        assert_eq!(config.base_url, "https://school.example.com");
        assert_eq!(config.timeout, Duration::from_secs(3));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_api_url_joins_prefix() {
        let config = ApiConfig::new().with_base_url("http://localhost:3000/");
        assert_eq!(config.api_base(), "http://localhost:3000/api");
        assert_eq!(config.api_url("/teachers/42"), "http://localhost:3000/api/teachers/42");
    }

    #[test]
    fn test_config_validation() {
        let mut config = ApiConfig::default();

        config.base_url = "".to_string();
        assert!(config.validate().is_err());

        config.base_url = "localhost:3000".to_string();
        assert!(config.validate().is_err());

        config.base_url = "http://localhost:3000".to_string();
        config.timeout = Duration::from_secs(0);
        assert!(config.validate().is_err());
    }

    #[test]
    #[serial]
    fn test_from_env_overrides() {
        clear_env();
        std::env::set_var(BASE_URL_ENV, "https://staging.example.edu");
        std::env::set_var(TIMEOUT_ENV, "25");

        let config = ApiConfig::from_env().unwrap();
        assert_eq!(config.base_url, "https://staging.example.edu");
        assert_eq!(config.timeout, Duration::from_secs(25));

        clear_env();
    }

    #[test]
    #[serial]
    fn test_from_env_reads_next_public_base_url() {
        clear_env();
        std::env::set_var(PUBLIC_BASE_URL_ENV, "https://teacherhub.example.com");

        let config = ApiConfig::from_env().unwrap();
        assert_eq!(config.base_url, "https://teacherhub.example.com");
        assert_eq!(config.api_url("/teachers"), "https://teacherhub.example.com/api/teachers");

        clear_env();
    }

    #[test]
    #[serial]
    fn test_api_base_url_wins_over_next_public_base_url() {
        clear_env();
        std::env::set_var(PUBLIC_BASE_URL_ENV, "https://teacherhub.example.com");
        std::env::set_var(BASE_URL_ENV, "http://127.0.0.1:4000");

        let config = ApiConfig::from_env().unwrap();
        assert_eq!(config.base_url, "http://127.0.0.1:4000");

        std::env::set_var(BASE_URL_ENV, "   ");
        let config = ApiConfig::from_env().unwrap();
        assert_eq!(config.base_url, "https://teacherhub.example.com");

        clear_env();
    }

    #[test]
    #[serial]
    fn test_from_env_ignores_blank_timeout() {
        clear_env();
        std::env::set_var(TIMEOUT_ENV, "");

        let config = ApiConfig::from_env().unwrap();
        assert_eq!(config.timeout, Duration::from_secs(10));

        std::env::set_var(TIMEOUT_ENV, "  ");
        let config = ApiConfig::from_env().unwrap();
        assert_eq!(config.timeout, Duration::from_secs(10));

        clear_env();
    }

    #[test]
    #[serial]
    fn test_from_env_without_variables_uses_defaults() {
        clear_env();
        let config = ApiConfig::from_env().unwrap();
        assert_eq!(config.base_url, "http://localhost:3000");
        assert_eq!(config.timeout, Duration::from_secs(10));
    }

    #[test]
    #[serial]
    fn test_from_env_rejects_bad_timeout() {
        clear_env();
        std::env::set_var(TIMEOUT_ENV, "ten");

        let result = ApiConfig::from_env();
        assert!(matches!(result, Err(ApiError::InvalidConfig { .. })));

        clear_env();
    }
}
