use std::{env, time::Duration};

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Public base URL of the site, without trailing slash
    /// (default: "http://localhost:3000")
    pub base_url: String,
    /// Content API base URL (default: "http://localhost:3333")
    /// Note: Only used when the `cms` feature is enabled.
    #[allow(dead_code)]
    pub cms_base_url: String,
    /// Content dataset name (default: "production")
    /// Note: Only used when the `cms` feature is enabled.
    #[allow(dead_code)]
    pub cms_dataset: String,
    /// Bearer token for content API mutations.
    /// Note: Only used when the `cms` feature is enabled.
    #[allow(dead_code)]
    pub cms_token: Option<String>,
    /// Account database URL (default: "sqlite:tapeo.db?mode=rwc")
    /// Note: Only used when the `auth-sqlite` feature is enabled.
    #[allow(dead_code)]
    pub database_url: String,
    /// Host registered with IndexNow, e.g. "tapeo.example"
    pub indexnow_host: Option<String>,
    /// IndexNow API key
    pub indexnow_key: Option<String>,
    /// URL where the IndexNow key file is served
    pub indexnow_key_location: Option<String>,
    /// Log IndexNow payloads instead of sending them (default: false)
    pub indexnow_dry_run: bool,
    /// Cache TTL in seconds (default: 300)
    pub cache_ttl_seconds: u64,
    /// Maximum number of cache entries (default: 10,000)
    pub cache_max_entries: usize,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `SITE_BASE_URL` - Public base URL (default: "http://localhost:3000")
    /// - `CMS_BASE_URL` - Content API base URL (default: "http://localhost:3333")
    /// - `CMS_DATASET` - Content dataset name (default: "production")
    /// - `CMS_TOKEN` - Bearer token for content mutations (optional)
    /// - `DATABASE_URL` - Account database URL (default: "sqlite:tapeo.db?mode=rwc")
    /// - `INDEXNOW_HOST`, `INDEXNOW_KEY` - IndexNow credentials; submission
    ///   is disabled unless both are set
    /// - `INDEXNOW_KEY_LOCATION` - Override for the key file URL (optional)
    /// - `INDEXNOW_DRY_RUN` - Log payloads instead of sending (default: false)
    /// - `CACHE_TTL_SECONDS` - Cache TTL in seconds (default: 300)
    /// - `CACHE_MAX_ENTRIES` - Maximum cache entries (default: 10,000)
    pub fn from_env() -> Self {
        Self {
            base_url: env::var("SITE_BASE_URL")
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            cms_base_url: env::var("CMS_BASE_URL")
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or_else(|_| "http://localhost:3333".to_string()),
            cms_dataset: env::var("CMS_DATASET").unwrap_or_else(|_| "production".to_string()),
            cms_token: env::var("CMS_TOKEN").ok().filter(|v| !v.is_empty()),
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite:tapeo.db?mode=rwc".to_string()),
            indexnow_host: env::var("INDEXNOW_HOST").ok().filter(|v| !v.is_empty()),
            indexnow_key: env::var("INDEXNOW_KEY").ok().filter(|v| !v.is_empty()),
            indexnow_key_location: env::var("INDEXNOW_KEY_LOCATION")
                .ok()
                .filter(|v| !v.is_empty()),
            indexnow_dry_run: env::var("INDEXNOW_DRY_RUN")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false),
            cache_ttl_seconds: env::var("CACHE_TTL_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(300),
            cache_max_entries: env::var("CACHE_MAX_ENTRIES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10_000),
        }
    }

    /// Get cache TTL as a Duration.
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_seconds)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bare_config() -> Config {
        Config {
            base_url: "https://tapeo.example".to_string(),
            cms_base_url: "http://localhost:3333".to_string(),
            cms_dataset: "production".to_string(),
            cms_token: None,
            database_url: "sqlite::memory:".to_string(),
            indexnow_host: None,
            indexnow_key: None,
            indexnow_key_location: None,
            indexnow_dry_run: false,
            cache_ttl_seconds: 600,
            cache_max_entries: 10_000,
        }
    }

    #[test]
    fn test_cache_ttl_conversion() {
        let config = bare_config();

        assert_eq!(config.cache_ttl(), Duration::from_secs(600));
    }

    #[test]
    fn test_default_values() {
        // Clear environment variables to test defaults
        env::remove_var("SITE_BASE_URL");
        env::remove_var("CMS_BASE_URL");
        env::remove_var("CMS_DATASET");
        env::remove_var("CMS_TOKEN");
        env::remove_var("DATABASE_URL");
        env::remove_var("INDEXNOW_HOST");
        env::remove_var("INDEXNOW_KEY");
        env::remove_var("INDEXNOW_KEY_LOCATION");
        env::remove_var("INDEXNOW_DRY_RUN");
        env::remove_var("CACHE_TTL_SECONDS");
        env::remove_var("CACHE_MAX_ENTRIES");

        let config = Config::from_env();

        assert_eq!(config.base_url, "http://localhost:3000");
        assert_eq!(config.cms_base_url, "http://localhost:3333");
        assert_eq!(config.cms_dataset, "production");
        assert_eq!(config.cms_token, None);
        assert!(!config.indexnow_dry_run);
        assert_eq!(config.cache_ttl_seconds, 300);
        assert_eq!(config.cache_max_entries, 10_000);
    }

    #[test]
    fn test_base_url_trailing_slash_is_stripped() {
        env::set_var("SITE_BASE_URL", "https://tapeo.example/");

        let config = Config::from_env();
        assert_eq!(config.base_url, "https://tapeo.example");

        env::remove_var("SITE_BASE_URL");
    }
}
