//! Client configuration for reaching the REST backend.
//!
//! Values come from a JSON file and can be overridden from the environment
//! (`CONVOCA_API_URL`, `CONVOCA_TOKEN`, `CONVOCA_TIMEOUT_SECS`).

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::util::{is_http_url, normalize_text_option};

const DEFAULT_TIMEOUT_SECS: u64 = 15;

pub const ENV_API_URL: &str = "CONVOCA_API_URL";
pub const ENV_TOKEN: &str = "CONVOCA_TOKEN";
pub const ENV_TIMEOUT_SECS: &str = "CONVOCA_TIMEOUT_SECS";

#[derive(Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ClientConfig {
    #[serde(default)]
    pub api_base_url: Option<String>,
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("ClientConfig")
            .field("api_base_url", &self.api_base_url)
            .field(
                "access_token",
                &self.access_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

impl ClientConfig {
    /// Parse a JSON config payload.
    pub fn from_json(payload: &str) -> Result<Self> {
        serde_json::from_str::<Self>(payload)
            .map(Self::normalized)
            .map_err(|error| Error::InvalidInput(format!("invalid client config: {error}")))
    }

    /// Load a config file; a missing file yields the default config.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    /// Config built from the `CONVOCA_*` environment variables alone.
    #[must_use]
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// Overlay values from the process environment.
    #[must_use]
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Overlay values from an arbitrary key lookup.
    #[must_use]
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(url) = normalize_text_option(lookup(ENV_API_URL)) {
            self.api_base_url = Some(url);
        }
        if let Some(token) = normalize_text_option(lookup(ENV_TOKEN)) {
            self.access_token = Some(token);
        }
        match normalize_text_option(lookup(ENV_TIMEOUT_SECS)).map(|raw| raw.parse::<u64>()) {
            Some(Ok(secs)) => self.request_timeout_secs = Some(secs),
            Some(Err(error)) => {
                tracing::warn!("ignoring invalid {}: {}", ENV_TIMEOUT_SECS, error);
            }
            None => {}
        }
        self.normalized()
    }

    /// Validated base URL without a trailing slash.
    pub fn resolved_base_url(&self) -> Result<String> {
        let url = normalize_text_option(self.api_base_url.clone()).ok_or_else(|| {
            Error::InvalidInput("API base URL is not configured".to_string())
        })?;
        if !is_http_url(&url) {
            return Err(Error::InvalidInput(
                "API base URL must include http:// or https://".to_string(),
            ));
        }
        Ok(url.trim_end_matches('/').to_string())
    }

    #[must_use]
    pub fn access_token(&self) -> Option<String> {
        normalize_text_option(self.access_token.clone())
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(
            self.request_timeout_secs
                .filter(|secs| *secs > 0)
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
        )
    }

    fn normalized(mut self) -> Self {
        self.api_base_url = normalize_text_option(self.api_base_url);
        self.access_token = normalize_text_option(self.access_token);
        self
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn from_json_rejects_unknown_fields() {
        let error = ClientConfig::from_json(r#"{ "api_base_url": "https://x.io", "extra": 1 }"#)
            .unwrap_err();
        assert!(error.to_string().contains("unknown field"));
    }

    #[test]
    fn from_json_normalizes_blank_values() {
        let config =
            ClientConfig::from_json(r#"{ "api_base_url": " https://x.io/ ", "access_token": "  " }"#)
                .unwrap();
        assert_eq!(config.api_base_url.as_deref(), Some("https://x.io/"));
        assert_eq!(config.access_token, None);
        assert_eq!(config.resolved_base_url().unwrap(), "https://x.io");
    }

    #[test]
    fn overrides_take_precedence() {
        let env = HashMap::from([
            (ENV_API_URL, "https://override.example.com"),
            (ENV_TOKEN, "tok"),
            (ENV_TIMEOUT_SECS, "30"),
        ]);
        let config = ClientConfig {
            api_base_url: Some("https://file.example.com".to_string()),
            ..ClientConfig::default()
        }
        .with_overrides(|key| env.get(key).map(|value| (*value).to_string()));

        assert_eq!(
            config.resolved_base_url().unwrap(),
            "https://override.example.com"
        );
        assert_eq!(config.access_token().as_deref(), Some("tok"));
        assert_eq!(config.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn invalid_timeout_override_is_ignored() {
        let config = ClientConfig::default().with_overrides(|key| {
            (key == ENV_TIMEOUT_SECS).then(|| "soon".to_string())
        });
        assert_eq!(config.timeout(), Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    }

    #[test]
    fn resolved_base_url_requires_scheme() {
        let config = ClientConfig {
            api_base_url: Some("api.example.com".to_string()),
            ..ClientConfig::default()
        };
        assert!(config.resolved_base_url().is_err());
        assert!(ClientConfig::default().resolved_base_url().is_err());
    }

    #[test]
    fn load_from_missing_path_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = ClientConfig::load_from_path(&dir.path().join("missing.json")).unwrap();
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn debug_redacts_token() {
        let config = ClientConfig {
            access_token: Some("very-secret".to_string()),
            ..ClientConfig::default()
        };
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("very-secret"));
    }
}
