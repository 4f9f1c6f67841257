use serde::Deserialize;

use crate::error::ConfigError;

/// How numbers and booleans are treated where the wire expects a string.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScalarPolicy {
    /// Render the canonical text (`42`, `1.5`, `true`).
    #[default]
    Canonical,
    /// Refuse with [`NormalizeError::UnsupportedValue`](crate::NormalizeError).
    Strict,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Deserialize)]
#[serde(default)]
pub struct NormalizeConfig {
    pub scalar_policy: ScalarPolicy,
    pub max_line_bytes: usize,
}

impl Default for NormalizeConfig {
    fn default() -> Self {
        Self {
            scalar_policy: ScalarPolicy::Canonical,
            max_line_bytes: 64 * 1024,
        }
    }
}

impl NormalizeConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(raw)?)
    }
}
