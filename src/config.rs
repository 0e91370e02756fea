//! Client configuration
//!
//! Settings come from an optional YAML file, then environment variables
//! override individual fields:
//!
//! | variable | field |
//! |---|---|
//! | `PUBLIC_API_URL` | `public_api_url` |
//! | `API_URL` | `api_url` |
//! | `PRICETRACKER_TIMEOUT_SECS` | `timeout_seconds` |

use crate::error::{Error, Result};
use crate::http::ApiClientConfig;
use crate::pagination::DEFAULT_PAGE_LIMIT;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Public API origin used when nothing else is configured
pub const DEFAULT_API_URL: &str = "http://localhost:3000";

pub const ENV_PUBLIC_API_URL: &str = "PUBLIC_API_URL";
pub const ENV_API_URL: &str = "API_URL";
pub const ENV_TIMEOUT_SECS: &str = "PRICETRACKER_TIMEOUT_SECS";

/// Complete client configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// API origin as seen by browsers
    #[serde(default = "default_public_api_url")]
    pub public_api_url: String,

    /// API origin reachable from the server; public URLs are rewritten to it
    #[serde(default)]
    pub api_url: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// Headers sent with every request
    #[serde(default)]
    pub headers: HashMap<String, String>,

    /// Keep and send session cookies
    #[serde(default = "default_true")]
    pub include_credentials: bool,

    /// Page size for paginated listings
    #[serde(default = "default_page_limit")]
    pub page_limit: u32,
}

fn default_public_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_true() -> bool {
    true
}

fn default_page_limit() -> u32 {
    DEFAULT_PAGE_LIMIT
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            public_api_url: default_public_api_url(),
            api_url: None,
            timeout_seconds: default_timeout(),
            headers: HashMap::new(),
            include_credentials: true,
            page_limit: default_page_limit(),
        }
    }
}

impl ClientConfig {
    /// Defaults with the process environment applied
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Override fields from environment-style lookups
    ///
    /// Empty values are ignored.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = get(ENV_PUBLIC_API_URL) {
            self.public_api_url = url;
        }
        if let Some(url) = get(ENV_API_URL) {
            self.api_url = Some(url);
        }
        if let Some(secs) = get(ENV_TIMEOUT_SECS) {
            self.timeout_seconds = secs
                .trim()
                .parse()
                .map_err(|_| Error::invalid_value(ENV_TIMEOUT_SECS, format!("not a number: {secs}")))?;
        }
        Ok(())
    }

    /// Check field values
    pub fn validate(&self) -> Result<()> {
        url::Url::parse(&self.public_api_url)
            .map_err(|e| Error::invalid_value("public_api_url", e.to_string()))?;

        if let Some(api_url) = &self.api_url {
            url::Url::parse(api_url).map_err(|e| Error::invalid_value("api_url", e.to_string()))?;
        }
        if self.timeout_seconds == 0 {
            return Err(Error::invalid_value(
                "timeout_seconds",
                "must be greater than zero",
            ));
        }
        if self.page_limit == 0 {
            return Err(Error::invalid_value("page_limit", "must be greater than zero"));
        }
        Ok(())
    }

    /// Request timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// HTTP client settings for requests made as a browser would
    pub fn browser_client(&self) -> ApiClientConfig {
        self.client_config(false)
    }

    /// HTTP client settings for server-side requests
    ///
    /// When `api_url` is set, requests addressed to the public origin are
    /// sent to it instead.
    pub fn server_client(&self) -> ApiClientConfig {
        self.client_config(true)
    }

    fn client_config(&self, server_side: bool) -> ApiClientConfig {
        let mut builder = ApiClientConfig::builder()
            .base_url(self.public_api_url.clone())
            .timeout(self.timeout())
            .include_credentials(self.include_credentials);

        if server_side {
            if let Some(api_url) = &self.api_url {
                builder = builder.internal_url(api_url.clone());
            }
        }
        for (key, value) in &self.headers {
            builder = builder.header(key.clone(), value.clone());
        }
        builder.build()
    }
}

/// Load configuration from a YAML file, then apply the environment
pub fn load_config(path: impl AsRef<Path>) -> Result<ClientConfig> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| {
        Error::config(format!(
            "Failed to read config file '{}': {}",
            path.display(),
            e
        ))
    })?;

    let mut config = load_config_from_str(&content)?;
    config.apply_env(|key| std::env::var(key).ok())?;
    config.validate()?;
    Ok(config)
}

/// Parse configuration from YAML without consulting the environment
pub fn load_config_from_str(yaml: &str) -> Result<ClientConfig> {
    if yaml.trim().is_empty() {
        return Ok(ClientConfig::default());
    }
    let config: ClientConfig = serde_yaml::from_str(yaml)
        .map_err(|e| Error::config(format!("Failed to parse config YAML: {e}")))?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.public_api_url, "http://localhost:3000");
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert_eq!(config.page_limit, 50);
        assert!(config.include_credentials);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_yaml() {
        let yaml = r#"
public_api_url: https://daam.deals
api_url: http://api.internal:8080
timeout_seconds: 10
headers:
  X-Client: cli
page_limit: 20
"#;
        let config = load_config_from_str(yaml).unwrap();

        assert_eq!(config.public_api_url, "https://daam.deals");
        assert_eq!(config.api_url.as_deref(), Some("http://api.internal:8080"));
        assert_eq!(config.timeout_seconds, 10);
        assert_eq!(config.headers["X-Client"], "cli");
        assert_eq!(config.page_limit, 20);
    }

    #[test]
    fn test_empty_yaml_is_default() {
        assert_eq!(load_config_from_str("  \n").unwrap(), ClientConfig::default());
    }

    #[test]
    fn test_invalid_yaml_and_values() {
        let err = load_config_from_str("timeout_seconds: [").unwrap_err();
        assert!(err.to_string().contains("Failed to parse config YAML"));

        let err = load_config_from_str("public_api_url: not a url").unwrap_err();
        assert!(matches!(err, Error::InvalidConfigValue { ref field, .. } if field == "public_api_url"));

        let err = load_config_from_str("timeout_seconds: 0").unwrap_err();
        assert!(matches!(err, Error::InvalidConfigValue { ref field, .. } if field == "timeout_seconds"));
    }

    #[test]
    fn test_env_overrides() {
        let mut config = ClientConfig::default();
        config
            .apply_env(env(&[
                ("PUBLIC_API_URL", "https://daam.deals"),
                ("API_URL", "http://10.0.0.2:3000"),
                ("PRICETRACKER_TIMEOUT_SECS", " 5 "),
            ]))
            .unwrap();

        assert_eq!(config.public_api_url, "https://daam.deals");
        assert_eq!(config.api_url.as_deref(), Some("http://10.0.0.2:3000"));
        assert_eq!(config.timeout_seconds, 5);
    }

    #[test]
    fn test_env_ignores_empty_and_rejects_bad_timeout() {
        let mut config = ClientConfig::default();
        config.apply_env(env(&[("API_URL", "")])).unwrap();
        assert_eq!(config.api_url, None);

        let err = config
            .apply_env(env(&[("PRICETRACKER_TIMEOUT_SECS", "soon")]))
            .unwrap_err();
        assert!(err.to_string().contains("PRICETRACKER_TIMEOUT_SECS"));
    }

    #[test]
    fn test_client_configs() {
        let config = ClientConfig {
            public_api_url: "https://daam.deals".to_string(),
            api_url: Some("http://api:3000".to_string()),
            ..Default::default()
        };

        let browser = config.browser_client();
        assert_eq!(browser.base_url.as_deref(), Some("https://daam.deals"));
        assert_eq!(browser.internal_url, None);

        let server = config.server_client();
        assert_eq!(server.internal_url.as_deref(), Some("http://api:3000"));
        assert_eq!(server.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_load_config_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "timeout_seconds: 12").unwrap();

        let config = load_config(file.path()).unwrap();
        assert!(config.timeout_seconds > 0);

        let err = load_config("/definitely/not/here.yaml").unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
