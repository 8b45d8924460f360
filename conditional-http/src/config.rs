//! Middleware configuration.
//!
//! ```yaml
//! enabled: true
//! only_successful: true
//! ```
//!
//! Both keys are optional and default to `true`.

use http::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading a [`ConditionalConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The YAML document could not be deserialized.
    #[error("invalid conditional configuration: {0}")]
    Yaml(String),
}

/// Settings for conditional-request middleware.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConditionalConfig {
    /// When `false`, responses are passed through without evaluation.
    pub enabled: bool,
    /// Evaluate preconditions only for `2xx` responses
    /// ([RFC 7232 §5](https://tools.ietf.org/html/rfc7232#section-5)).
    pub only_successful: bool,
}

impl Default for ConditionalConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            only_successful: true,
        }
    }
}

impl ConditionalConfig {
    /// Loads a configuration from a YAML document.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        serde_saphyr::from_str(yaml).map_err(|error| ConfigError::Yaml(error.to_string()))
    }

    /// Whether preconditions should be evaluated for a response with `status`.
    pub fn applies_to(&self, status: StatusCode) -> bool {
        self.enabled && (!self.only_successful || status.is_success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_applies_to_success_only() {
        let config = ConditionalConfig::default();
        assert!(config.applies_to(StatusCode::OK));
        assert!(config.applies_to(StatusCode::NO_CONTENT));
        assert!(!config.applies_to(StatusCode::NOT_FOUND));
        assert!(!config.applies_to(StatusCode::FOUND));
    }

    #[test]
    fn disabled_applies_to_nothing() {
        let config = ConditionalConfig {
            enabled: false,
            ..Default::default()
        };
        assert!(!config.applies_to(StatusCode::OK));
    }

    #[test]
    fn every_status_when_not_restricted() {
        let config = ConditionalConfig {
            only_successful: false,
            ..Default::default()
        };
        assert!(config.applies_to(StatusCode::INTERNAL_SERVER_ERROR));
    }
}
