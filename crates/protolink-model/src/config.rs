//! Model configuration.
//!
//! Every field has a default, so an empty JSON object (or no config file at
//! all) is a valid configuration.

use serde::Deserialize;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ModelConfig {
    pub extensions: MetadataExtensions,
    pub enum_deprecation: EnumDeprecationRule,
}

impl ModelConfig {
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&text)
    }
}

/// Fully-qualified names of the custom metadata extensions, per entity kind.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MetadataExtensions {
    pub file: String,
    pub message: String,
    pub field: String,
    #[serde(rename = "enum")]
    pub enumeration: String,
    pub enum_value: String,
    pub service: String,
    pub method: String,
}

impl Default for MetadataExtensions {
    fn default() -> Self {
        Self {
            file: "template.file_meta".to_string(),
            message: "template.message_meta".to_string(),
            field: "template.field_meta".to_string(),
            enumeration: "template.enum_meta".to_string(),
            enum_value: "template.enum_value_meta".to_string(),
            service: "template.service_meta".to_string(),
            method: "template.method_meta".to_string(),
        }
    }
}

/// How an enum inherits deprecation from its enclosing scopes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnumDeprecationRule {
    /// Deprecated if the file, an enclosing message, or the enum itself is.
    #[default]
    Ancestors,
    /// Deprecated if the file or enclosing message is *visible*, or the enum
    /// itself is deprecated. Kept for output compatibility with generators
    /// built against the older behaviour.
    LegacyVisibility,
}
