//! Process configuration models.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use validator::Validate;

use crate::error::ConfigError;

// ============================================================================
// Enums
// ============================================================================

/// Web search behaviour requested from the backend provider.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum WebSearchMode {
    /// Never search
    #[default]
    Off,
    /// Provider decides per request
    Auto,
    /// Always search
    On,
}

impl WebSearchMode {
    pub const ALL: [Self; 3] = [Self::Off, Self::Auto, Self::On];

    pub fn as_str(&self) -> &'static str {
        match *self {
            Self::Off => "off",
            Self::Auto => "auto",
            Self::On => "on",
        }
    }

    /// Exact, case-sensitive match against `off`, `auto`, `on`.
    pub fn parse_exact(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|mode| mode.as_str() == s)
    }
}

impl fmt::Display for WebSearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WebSearchMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_exact(s).ok_or_else(|| ConfigError::InvalidValue {
            field: "enable_web_search".to_string(),
            value: s.to_string(),
            expected: "off, auto, on".to_string(),
        })
    }
}

// ============================================================================
// Policy defaults
// ============================================================================

/// Values written into `venice_parameters` when the client omits a field.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PolicyDefaults {
    #[serde(default = "default_true")]
    pub strip_thinking_response: bool,
    #[serde(default = "default_true")]
    pub disable_thinking: bool,
    #[serde(default)]
    pub enable_web_search: WebSearchMode,
    #[serde(default)]
    pub enable_web_citations: bool,
    #[serde(default)]
    pub include_search_results_in_stream: bool,
    #[serde(default = "default_true")]
    pub include_venice_system_prompt: bool,
}

impl Default for PolicyDefaults {
    fn default() -> Self {
        Self {
            strip_thinking_response: true,
            disable_thinking: true,
            enable_web_search: WebSearchMode::Off,
            enable_web_citations: false,
            include_search_results_in_stream: false,
            include_venice_system_prompt: true,
        }
    }
}

// ============================================================================
// Sidecar configuration
// ============================================================================

/// Process-wide configuration. Built once at start-up, read-only afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Validate)]
pub struct SidecarConfig {
    /// Base URL of the backend gateway, without trailing slash.
    #[validate(url(message = "backend_url must be an absolute URL"))]
    #[serde(default = "default_backend_url")]
    pub backend_url: String,

    /// Static bearer token. Empty disables authentication on `/v1/*`.
    #[serde(default)]
    pub api_token: String,

    #[serde(default)]
    pub policy_defaults: PolicyDefaults,

    /// Honour the `X-*` override headers on chat completions.
    #[serde(default = "default_true")]
    pub allow_header_overrides: bool,

    /// Ceiling for one outbound call, in seconds.
    #[validate(range(min = 1, message = "request_timeout_secs must be at least 1"))]
    #[serde(default = "default_timeout")]
    pub request_timeout_secs: u64,
}

fn default_true() -> bool {
    true
}

fn default_backend_url() -> String {
    "http://litellm:4000".to_string()
}

fn default_timeout() -> u64 {
    120
}

impl Default for SidecarConfig {
    fn default() -> Self {
        Self {
            backend_url: default_backend_url(),
            api_token: String::new(),
            policy_defaults: PolicyDefaults::default(),
            allow_header_overrides: true,
            request_timeout_secs: default_timeout(),
        }
    }
}

impl SidecarConfig {
    /// Normalise and validate. Call once before sharing the config.
    pub fn validated(mut self) -> Result<Self, ConfigError> {
        let trimmed = self.backend_url.trim().trim_end_matches('/').to_string();
        self.backend_url = trimmed;
        self.validate().map_err(|e| ConfigError::from_validation(&e))?;
        Ok(self)
    }

    /// Whether `/v1/*` requires a bearer token.
    pub fn auth_enabled(&self) -> bool {
        !self.api_token.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_deployment_defaults() {
        let defaults = PolicyDefaults::default();
        assert!(defaults.strip_thinking_response);
        assert!(defaults.disable_thinking);
        assert_eq!(defaults.enable_web_search, WebSearchMode::Off);
        assert!(!defaults.enable_web_citations);
        assert!(!defaults.include_search_results_in_stream);
        assert!(defaults.include_venice_system_prompt);
    }

    #[test]
    fn test_web_search_mode_parse_is_case_sensitive() {
        assert_eq!(WebSearchMode::parse_exact("auto"), Some(WebSearchMode::Auto));
        assert_eq!(WebSearchMode::parse_exact("AUTO"), None);
        assert_eq!(WebSearchMode::parse_exact("maybe"), None);
        assert!("maybe".parse::<WebSearchMode>().is_err());
        assert_eq!("on".parse::<WebSearchMode>().unwrap(), WebSearchMode::On);
    }

    #[test]
    fn test_web_search_mode_serializes_lowercase() {
        assert_eq!(serde_json::to_value(WebSearchMode::Auto).unwrap(), "auto");
    }

    #[test]
    fn test_validated_trims_trailing_slash() {
        let config = SidecarConfig {
            backend_url: "http://litellm:4000/".to_string(),
            ..Default::default()
        }
        .validated()
        .unwrap();
        assert_eq!(config.backend_url, "http://litellm:4000");
    }

    #[test]
    fn test_validated_rejects_relative_url() {
        let err = SidecarConfig { backend_url: "litellm".to_string(), ..Default::default() }
            .validated()
            .unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError { ref field, .. } if field == "backend_url"));
    }

    #[test]
    fn test_validated_rejects_zero_timeout() {
        let err = SidecarConfig { request_timeout_secs: 0, ..Default::default() }
            .validated()
            .unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError { .. }));
    }

    #[test]
    fn test_auth_enabled_only_with_token() {
        assert!(!SidecarConfig::default().auth_enabled());
        let config = SidecarConfig { api_token: "secret".to_string(), ..Default::default() };
        assert!(config.auth_enabled());
    }

    #[test]
    fn test_deserialize_applies_field_defaults() {
        let config: SidecarConfig = serde_json::from_str(r#"{"api_token":"t"}"#).unwrap();
        assert_eq!(config.backend_url, "http://litellm:4000");
        assert_eq!(config.request_timeout_secs, 120);
        assert!(config.allow_header_overrides);
        assert_eq!(config.policy_defaults, PolicyDefaults::default());
    }
}
