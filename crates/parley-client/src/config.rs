//! Client configuration loaded from environment variables.
//!
//! All settings have sensible defaults so the client can start with zero
//! configuration against a local development server.

use std::path::PathBuf;
use std::time::Duration;

/// Client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the chat server.
    /// Env: `PARLEY_SERVER_URL`
    /// Default: `http://localhost:3000`
    pub server_url: String,

    /// Path of the local database.
    /// Env: `PARLEY_DB_PATH`
    /// Default: `None` (platform data directory).
    pub database_path: Option<PathBuf>,

    /// Timeout applied to every HTTP request.
    /// Env: `PARLEY_REQUEST_TIMEOUT_SECS`
    /// Default: 30 seconds.
    pub request_timeout: Duration,

    /// Element the layout renders into.
    /// Env: `PARLEY_LAYOUT_ROOT`
    /// Default: `body`
    pub layout_root: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: "http://localhost:3000".to_string(),
            database_path: None,
            request_timeout: Duration::from_secs(30),
            layout_root: "body".to_string(),
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(url) = lookup("PARLEY_SERVER_URL") {
            if url.trim().is_empty() {
                tracing::warn!("Empty PARLEY_SERVER_URL, using default");
            } else {
                config.server_url = url.trim().to_string();
            }
        }

        if let Some(path) = lookup("PARLEY_DB_PATH") {
            if !path.is_empty() {
                config.database_path = Some(PathBuf::from(path));
            }
        }

        if let Some(val) = lookup("PARLEY_REQUEST_TIMEOUT_SECS") {
            match val.parse::<u64>() {
                Ok(secs) if secs > 0 => config.request_timeout = Duration::from_secs(secs),
                _ => {
                    tracing::warn!(
                        value = %val,
                        "Invalid PARLEY_REQUEST_TIMEOUT_SECS, using default"
                    );
                }
            }
        }

        if let Some(root) = lookup("PARLEY_LAYOUT_ROOT") {
            if !root.is_empty() {
                config.layout_root = root;
            }
        }

        // RUST_LOG is handled directly by tracing-subscriber's EnvFilter,
        // so we do not store it here.

        config
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn from_pairs(pairs: &[(&str, &str)]) -> ClientConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ClientConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_default_config() {
        let config = from_pairs(&[]);
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.server_url, "http://localhost:3000");
        assert_eq!(config.request_timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_overrides() {
        let config = from_pairs(&[
            ("PARLEY_SERVER_URL", " https://chat.example.org "),
            ("PARLEY_DB_PATH", "/tmp/parley.db"),
            ("PARLEY_REQUEST_TIMEOUT_SECS", "5"),
            ("PARLEY_LAYOUT_ROOT", "#app"),
        ]);
        assert_eq!(config.server_url, "https://chat.example.org");
        assert_eq!(config.database_path, Some(PathBuf::from("/tmp/parley.db")));
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert_eq!(config.layout_root, "#app");
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = from_pairs(&[
            ("PARLEY_SERVER_URL", "   "),
            ("PARLEY_REQUEST_TIMEOUT_SECS", "soon"),
        ]);
        assert_eq!(config.server_url, "http://localhost:3000");
        assert_eq!(config.request_timeout, Duration::from_secs(30));

        let config = from_pairs(&[("PARLEY_REQUEST_TIMEOUT_SECS", "0")]);
        assert_eq!(config.request_timeout, Duration::from_secs(30));
    }
}
