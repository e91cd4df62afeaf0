//! Catalog client configuration.

use std::time::Duration;

use crate::error::ClientError;

pub const DEFAULT_BASE_URL: &str = "https://prodapp.lifepharmacy.com/api/v1";
pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);
pub const DEFAULT_DETAIL_CACHE_SECS: i64 = 300;

pub const ENV_API_URL: &str = "STOREFRONT_API_URL";
pub const ENV_PAGE_SIZE: &str = "STOREFRONT_PAGE_SIZE";
pub const ENV_TIMEOUT_SECS: &str = "STOREFRONT_TIMEOUT_SECS";
pub const ENV_DETAIL_CACHE_SECS: &str = "STOREFRONT_DETAIL_CACHE_SECS";

#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub base_url: String,
    /// Products requested per page (`take`).
    pub page_size: u32,
    pub timeout: Duration,
    /// How long a fetched detail payload is reused; `None` keeps it for the
    /// whole session.
    pub detail_cache_ttl: Option<chrono::Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            timeout: DEFAULT_TIMEOUT,
            detail_cache_ttl: Some(chrono::Duration::seconds(DEFAULT_DETAIL_CACHE_SECS)),
        }
    }
}

impl ClientConfig {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// Defaults overridden by `STOREFRONT_*` environment variables.
    pub fn from_env() -> Result<Self, ClientError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as `from_env`, reading variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ClientError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup(ENV_API_URL) {
            config.base_url = url;
        }
        if let Some(raw) = lookup(ENV_PAGE_SIZE) {
            config.page_size = parse_number(ENV_PAGE_SIZE, &raw)?;
        }
        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            config.timeout = Duration::from_secs(parse_number(ENV_TIMEOUT_SECS, &raw)?);
        }
        if let Some(raw) = lookup(ENV_DETAIL_CACHE_SECS) {
            let secs: i64 = parse_number(ENV_DETAIL_CACHE_SECS, &raw)?;
            // 0 disables expiry.
            config.detail_cache_ttl = (secs > 0).then(|| chrono::Duration::seconds(secs));
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ClientError> {
        let url = self.base_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ClientError::Config(format!(
                "base_url must be an http(s) URL, got {:?}",
                self.base_url
            )));
        }
        if self.page_size == 0 {
            return Err(ClientError::Config("page_size must be positive".to_string()));
        }
        if self.timeout.is_zero() {
            return Err(ClientError::Config("timeout must be positive".to_string()));
        }
        Ok(())
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T, ClientError>
where
    T::Err: core::fmt::Display,
{
    raw.trim()
        .parse()
        .map_err(|e| ClientError::Config(format!("{key}={raw:?}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_without_environment() {
        let config = ClientConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.page_size, 20);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn environment_overrides() {
        let config = ClientConfig::from_lookup(lookup(&[
            (ENV_API_URL, "http://127.0.0.1:9000/api"),
            (ENV_PAGE_SIZE, "50"),
            (ENV_TIMEOUT_SECS, "3"),
            (ENV_DETAIL_CACHE_SECS, "0"),
        ]))
        .unwrap();
        assert_eq!(config.base_url, "http://127.0.0.1:9000/api");
        assert_eq!(config.page_size, 50);
        assert_eq!(config.timeout, Duration::from_secs(3));
        assert_eq!(config.detail_cache_ttl, None);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            ClientConfig::from_lookup(lookup(&[(ENV_PAGE_SIZE, "many")])),
            Err(ClientError::Config(_))
        ));
        assert!(matches!(
            ClientConfig::from_lookup(lookup(&[(ENV_PAGE_SIZE, "0")])),
            Err(ClientError::Config(_))
        ));
        assert!(matches!(
            ClientConfig::from_lookup(lookup(&[(ENV_API_URL, "ftp://example.com")])),
            Err(ClientError::Config(_))
        ));
    }
}
