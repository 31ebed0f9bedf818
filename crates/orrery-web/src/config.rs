use std::env;
use std::path::PathBuf;

use orrery_engine::DEFAULT_MODEL;

/// Base URL of the hosted text-generation API.
pub const DEFAULT_UPSTREAM_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_BIND: &str = "127.0.0.1:3000";

/// Server configuration. Built from the environment, then overridden by
/// command-line flags.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to listen on (default: 127.0.0.1:3000).
    pub bind: String,
    /// Credential for the upstream API. Never sent to clients.
    pub api_key: Option<String>,
    /// Model used when a request does not name one.
    pub default_model: String,
    pub upstream_url: String,
    /// Upstream request timeout in seconds (default: 30).
    pub timeout_secs: u64,
    /// JSON catalog to serve instead of the built-in solar system.
    pub catalog_path: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_string(),
            api_key: None,
            default_model: DEFAULT_MODEL.to_string(),
            upstream_url: DEFAULT_UPSTREAM_URL.to_string(),
            timeout_secs: 30,
            catalog_path: None,
        }
    }
}

impl ServerConfig {
    /// Read `GEMINI_API_KEY`, `ORRERY_BIND`, `ORRERY_MODEL`,
    /// `ORRERY_UPSTREAM_URL` and `ORRERY_CATALOG`. Unset or blank variables
    /// keep the defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();
        Self {
            bind: get("ORRERY_BIND").unwrap_or(defaults.bind),
            api_key: get("GEMINI_API_KEY"),
            default_model: get("ORRERY_MODEL").unwrap_or(defaults.default_model),
            upstream_url: get("ORRERY_UPSTREAM_URL").unwrap_or(defaults.upstream_url),
            timeout_secs: defaults.timeout_secs,
            catalog_path: get("ORRERY_CATALOG").map(PathBuf::from),
        }
    }

    pub fn with_bind(mut self, bind: impl Into<String>) -> Self {
        self.bind = bind.into();
        self
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn with_default_model(mut self, model: impl Into<String>) -> Self {
        self.default_model = model.into();
        self
    }

    pub fn with_upstream_url(mut self, url: impl Into<String>) -> Self {
        self.upstream_url = url.into();
        self
    }

    pub fn with_catalog_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.catalog_path = Some(path.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn defaults_without_environment() {
        let config = ServerConfig::from_lookup(|_| None);
        assert_eq!(config.bind, "127.0.0.1:3000");
        assert_eq!(config.default_model, "gemini-2.5-flash");
        assert!(config.api_key.is_none());
        assert!(config.catalog_path.is_none());
    }

    #[test]
    fn environment_overrides_defaults() {
        let vars: HashMap<&str, &str> = [
            ("GEMINI_API_KEY", "secret"),
            ("ORRERY_BIND", "0.0.0.0:8080"),
            ("ORRERY_MODEL", "   "),
            ("ORRERY_CATALOG", "/etc/orrery/catalog.json"),
        ]
        .into_iter()
        .collect();
        let config = ServerConfig::from_lookup(|k| vars.get(k).map(|v| v.to_string()));
        assert_eq!(config.api_key.as_deref(), Some("secret"));
        assert_eq!(config.bind, "0.0.0.0:8080");
        // blank values are treated as unset
        assert_eq!(config.default_model, "gemini-2.5-flash");
        assert_eq!(
            config.catalog_path.as_deref(),
            Some(std::path::Path::new("/etc/orrery/catalog.json"))
        );
    }
}
