//! Peer benchmark dataset configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;

/// Where peer benchmarks come from
#[derive(Debug, Clone, Deserialize, Default)]
pub struct BenchmarksConfig {
    /// JSON or YAML dataset; benchmarks are disabled when unset
    #[serde(default)]
    pub dataset_path: Option<PathBuf>,
}

impl BenchmarksConfig {
    /// Validate benchmark configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        match &self.dataset_path {
            Some(path) if path.as_os_str().is_empty() => Err(ValidationError::BlankDatasetPath),
            _ => Ok(()),
        }
    }
}
