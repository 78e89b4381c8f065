//! Application configuration.
//!
//! Natively the configuration comes from an optional JSON file followed by
//! `MYSTRO_*` environment overrides. In the browser it is built from the page
//! location (see `web.rs`).

use mystro_core::ShareProps;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable naming a JSON configuration file.
pub const CONFIG_ENV: &str = "MYSTRO_CONFIG";
/// Environment variable overriding the username.
pub const USERNAME_ENV: &str = "MYSTRO_USERNAME";
/// Environment variable overriding the library name.
pub const LIBRARY_NAME_ENV: &str = "MYSTRO_LIBRARY_NAME";
/// Environment variable overriding the page origin.
pub const ORIGIN_ENV: &str = "MYSTRO_ORIGIN";

/// Origin used when none is configured (the library app's development server).
pub const DEFAULT_ORIGIN: &str = "http://localhost:5000";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("no username configured (set MYSTRO_USERNAME or \"username\" in the config file)")]
    MissingUsername,
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// Origin the share link points at.
    pub origin: String,
    /// Whose library to share.
    pub username: Option<String>,
    /// Display name of the library.
    pub library_name: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "MySTRO".to_string(),
            width: 480,
            height: 360,
            origin: DEFAULT_ORIGIN.to_string(),
            username: None,
            library_name: None,
        }
    }
}

impl AppConfig {
    /// Parse a JSON configuration. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a JSON configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Apply `MYSTRO_*` overrides looked up through `lookup`.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(username) = lookup(USERNAME_ENV) {
            self.username = Some(username);
        }
        if let Some(library_name) = lookup(LIBRARY_NAME_ENV) {
            self.library_name = Some(library_name);
        }
        if let Some(origin) = lookup(ORIGIN_ENV) {
            self.origin = origin;
        }
    }

    /// Take username and library name from page URL parameters.
    pub fn apply_url_params(&mut self, params: UrlParams) {
        if let Some(user) = params.user {
            self.username = Some(user);
        }
        if let Some(library) = params.library {
            self.library_name = Some(library);
        }
    }

    /// Load from `MYSTRO_CONFIG` (or the per-user config file if present),
    /// then apply environment overrides.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .or_else(|| default_config_path().filter(|path| path.exists()));

        let mut config = match path {
            Some(path) => {
                log::info!("Loading config from {}", path.display());
                Self::from_file(path)?
            }
            None => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// The share widget inputs described by this configuration.
    pub fn share_props(&self) -> Result<ShareProps, ConfigError> {
        let username = self
            .username
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .ok_or(ConfigError::MissingUsername)?;

        let mut props = ShareProps::new(username);
        props.library_name = self.library_name.clone();
        Ok(props)
    }
}

/// Share parameters read from a page URL (`?user=..&library=..`).
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct UrlParams {
    /// Whose library to share
    pub user: Option<String>,
    /// Library display name
    pub library: Option<String>,
}

impl UrlParams {
    /// Parse a query string or hash. A leading `?` or `#` is ignored, `+`
    /// decodes to a space and empty values count as absent.
    pub fn parse(s: &str) -> Self {
        let s = s.trim_start_matches(['?', '#']);
        let mut params = Self::default();

        for pair in s.split('&') {
            let Some((key, value)) = pair.split_once('=') else {
                continue;
            };
            if value.is_empty() {
                continue;
            }
            let value = value.replace('+', " ");
            let value = urlencoding::decode(&value)
                .map(|v| v.into_owned())
                .unwrap_or(value);
            match key {
                "user" => params.user = Some(value),
                "library" => params.library = Some(value),
                _ => {}
            }
        }

        params
    }

    /// Fill missing values from `other`.
    pub fn or(self, other: Self) -> Self {
        Self {
            user: self.user.or(other.user),
            library: self.library.or(other.library),
        }
    }
}

/// Per-user configuration file (`<config dir>/mystro/share.json`).
#[cfg(not(target_arch = "wasm32"))]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("mystro").join("share.json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.origin, DEFAULT_ORIGIN);
        assert!(matches!(config.share_props(), Err(ConfigError::MissingUsername)));
    }

    #[test]
    fn test_from_json_partial() {
        let config = AppConfig::from_json(r#"{"username": "clara"}"#).unwrap();
        assert_eq!(config.title, "MySTRO");
        assert_eq!(config.origin, DEFAULT_ORIGIN);

        let props = config.share_props().unwrap();
        assert_eq!(props.username, "clara");
        assert_eq!(props.library_name, None);
    }

    #[test]
    fn test_from_json_full() {
        let config = AppConfig::from_json(
            r#"{
                "title": "Share",
                "width": 640,
                "height": 480,
                "origin": "https://mystro.example",
                "username": "clara",
                "library_name": "Piano Sonatas"
            }"#,
        )
        .unwrap();
        assert_eq!(config.width, 640);
        assert_eq!(config.origin, "https://mystro.example");
        assert_eq!(
            config.share_props().unwrap().library_name(),
            "Piano Sonatas"
        );
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            AppConfig::from_json("{ not json"),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let result = AppConfig::from_file("/nonexistent/mystro/share.json");
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = HashMap::from([
            (USERNAME_ENV, "glenn"),
            (ORIGIN_ENV, "https://mystro.example"),
        ]);
        let mut config = AppConfig::from_json(r#"{"username": "clara", "library_name": "Fugues"}"#).unwrap();
        config.apply_overrides(|key| env.get(key).map(|value| value.to_string()));

        assert_eq!(config.username.as_deref(), Some("glenn"));
        assert_eq!(config.library_name.as_deref(), Some("Fugues"));
        assert_eq!(config.origin, "https://mystro.example");
    }

    #[test]
    fn test_parse_query() {
        let params = UrlParams::parse("?user=clara&library=Piano%20Sonatas");
        assert_eq!(params.user.as_deref(), Some("clara"));
        assert_eq!(params.library.as_deref(), Some("Piano Sonatas"));
    }

    #[test]
    fn test_parse_hash_with_plus() {
        let params = UrlParams::parse("#library=Lieder+and+Arias&user=fritz");
        assert_eq!(params.user.as_deref(), Some("fritz"));
        assert_eq!(params.library.as_deref(), Some("Lieder and Arias"));
    }

    #[test]
    fn test_parse_ignores_empty_and_unknown() {
        let params = UrlParams::parse("?user=&room=abc&flag");
        assert_eq!(params, UrlParams::default());
    }

    #[test]
    fn test_query_wins_over_hash() {
        let query = UrlParams::parse("?user=clara");
        let hash = UrlParams::parse("#user=glenn&library=Fugues");
        let params = query.or(hash);
        assert_eq!(params.user.as_deref(), Some("clara"));
        assert_eq!(params.library.as_deref(), Some("Fugues"));
    }

    #[test]
    fn test_url_params_feed_share_props() {
        let mut config = AppConfig::default();
        config.apply_url_params(UrlParams::parse("?user=clara&library=Nocturnes"));
        let props = config.share_props().unwrap();
        assert_eq!(props.username, "clara");
        assert_eq!(props.library_name(), "Nocturnes");
    }

    #[test]
    fn test_blank_username_rejected() {
        let config = AppConfig::from_json(r#"{"username": "   "}"#).unwrap();
        assert!(matches!(config.share_props(), Err(ConfigError::MissingUsername)));
    }
}
