//! File-based Benchmark Source Adapter
//!
//! Reads a peer dataset from a JSON or YAML file, chosen by extension.
//! The file is re-read on every load so an updated dataset is picked up
//! without a restart; its content hash then changes the cache key.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::domain::scoring::PeerBenchmarkDataset;
use crate::ports::{BenchmarkSource, BenchmarkSourceError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Json,
    Yaml,
}

impl Format {
    fn from_path(path: &Path) -> Result<Self, BenchmarkSourceError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("json") => Ok(Format::Json),
            Some("yaml") | Some("yml") => Ok(Format::Yaml),
            other => Err(BenchmarkSourceError::Parse(format!(
                "unsupported benchmark file extension: {:?}",
                other.unwrap_or("")
            ))),
        }
    }
}

/// Benchmark source backed by a dataset file
#[derive(Debug, Clone)]
pub struct FileBenchmarkSource {
    path: PathBuf,
}

impl FileBenchmarkSource {
    /// Create a source reading from `path` (`.json`, `.yaml` or `.yml`)
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads and parses the whole dataset.
    pub async fn read_dataset(&self) -> Result<PeerBenchmarkDataset, BenchmarkSourceError> {
        let format = Format::from_path(&self.path)?;
        let content = fs::read_to_string(&self.path)
            .await
            .map_err(|e| BenchmarkSourceError::Io(format!("{}: {}", self.path.display(), e)))?;

        match format {
            Format::Json => serde_json::from_str(&content)
                .map_err(|e| BenchmarkSourceError::Parse(e.to_string())),
            Format::Yaml => serde_yaml::from_str(&content)
                .map_err(|e| BenchmarkSourceError::Parse(e.to_string())),
        }
    }
}

#[async_trait]
impl BenchmarkSource for FileBenchmarkSource {
    async fn load(
        &self,
        sector: &str,
    ) -> Result<Option<PeerBenchmarkDataset>, BenchmarkSourceError> {
        let dataset = self.read_dataset().await?;
        let subset = dataset.for_sector(sector);
        tracing::debug!(
            path = %self.path.display(),
            sector,
            distributions = subset.distributions.len(),
            "loaded benchmark dataset"
        );
        Ok((!subset.is_empty()).then_some(subset))
    }

    fn name(&self) -> &str {
        "file"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const JSON: &str = r#"{
        "source": "Seed survey",
        "version": "2026.1",
        "distributions": [
            {"sector": "SaaS", "stage": "seed", "axis": "revenue", "scores": [40, 60, 80]},
            {"sector": "Fintech", "stage": "seed", "scores": [55]}
        ],
        "kpiAverages": [
            {"sector": "SaaS", "stage": "seed", "kpiId": "cac", "industryAverage": 420}
        ]
    }"#;

    const YAML: &str = r#"
source: Seed survey
version: "2026.1"
distributions:
  - sector: SaaS
    stage: series_a
    axis: finance
    scores: [30, 50, 70]
    average: 55
"#;

    fn file_with(suffix: &str, content: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    async fn loads_json_for_sector() {
        let file = file_with(".json", JSON);
        let source = FileBenchmarkSource::new(file.path());

        let dataset = source.load("SaaS").await.unwrap().unwrap();
        assert_eq!(dataset.distributions.len(), 1);
        assert_eq!(dataset.kpi_averages.len(), 1);
        assert_eq!(dataset.version, "2026.1");
    }

    #[tokio::test]
    async fn loads_yaml() {
        let file = file_with(".yaml", YAML);
        let source = FileBenchmarkSource::new(file.path());

        let dataset = source.load("saas").await.unwrap().unwrap();
        assert_eq!(dataset.distributions[0].average, Some(55.0));
    }

    #[tokio::test]
    async fn sector_without_data_is_none() {
        let file = file_with(".json", JSON);
        let source = FileBenchmarkSource::new(file.path());
        assert!(source.load("Biotech").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn missing_file_is_io_error() {
        let source = FileBenchmarkSource::new("/nonexistent/benchmarks.json");
        assert!(matches!(source.load("SaaS").await, Err(BenchmarkSourceError::Io(_))));
    }

    #[tokio::test]
    async fn malformed_content_is_parse_error() {
        let file = file_with(".json", "{ not json");
        let source = FileBenchmarkSource::new(file.path());
        assert!(matches!(source.load("SaaS").await, Err(BenchmarkSourceError::Parse(_))));
    }

    #[tokio::test]
    async fn unknown_extension_is_rejected() {
        let file = file_with(".csv", "sector,stage");
        let source = FileBenchmarkSource::new(file.path());
        assert!(matches!(source.load("SaaS").await, Err(BenchmarkSourceError::Parse(_))));
    }
}
