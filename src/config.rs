//! SDK configuration.
//!
//! Everything has a default; a JSON document only needs the keys it changes:
//!
//! ```json
//! { "analyzer": { "unreachable_severity": "error" }, "export": { "create_parent_dirs": false } }
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::validate::AnalyzerOptions;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SdkConfig {
    pub analyzer: AnalyzerOptions,
    pub export: ExportOptions,
}

impl SdkConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportOptions {
    /// Create missing parent directories before writing the artifact.
    pub create_parent_dirs: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            create_parent_dirs: true,
        }
    }
}
