//! growth-report - Evaluate a diagnostic bundle and print the report as JSON.

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use thiserror::Error;

use growth_insight_engine::adapters::{FileBenchmarkSource, InMemoryReportCache, TemplateNarrator};
use growth_insight_engine::application::{
    CachedInsightEngine, GenerateReportCommand, GenerateReportHandler,
};
use growth_insight_engine::config::{AppConfig, ConfigError};
use growth_insight_engine::domain::foundation::DomainError;
use growth_insight_engine::domain::scoring::{EvaluationInput, InsightEngine};
use growth_insight_engine::logging;

#[derive(Parser, Debug)]
#[command(name = "growth-report")]
#[command(about = "Score a startup diagnostic and generate a growth report", long_about = None)]
struct Cli {
    /// JSON bundle with context, definitions, rules and responses
    #[arg(long)]
    input: PathBuf,

    /// Peer benchmark dataset (JSON or YAML); overrides the configured path
    #[arg(long)]
    benchmarks: Option<PathBuf>,

    /// Entries kept in the executive digest lists
    #[arg(long)]
    digest: Option<usize>,

    /// Attach a prose narrative to the report
    #[arg(long)]
    narrative: bool,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid input bundle {}: {source}", path.display())]
    Bundle {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Digest limit must be at least 1")]
    ZeroDigest,

    #[error(transparent)]
    Report(#[from] DomainError),

    #[error("Failed to encode report: {0}")]
    Encode(#[from] serde_json::Error),
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("growth-report: {err}");
            return ExitCode::from(2);
        }
    };
    logging::init(&config.logging);

    match run(cli, config).await {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!(error = %err, "report generation failed");
            eprintln!("growth-report: {err}");
            ExitCode::FAILURE
        }
    }
}

fn load_config() -> Result<AppConfig, CliError> {
    let config = AppConfig::load()?;
    config.validate().map_err(ConfigError::from)?;
    Ok(config)
}

async fn run(cli: Cli, config: AppConfig) -> Result<String, CliError> {
    let input = read_bundle(&cli.input).await?;

    let mut settings = config.scoring.to_settings();
    if let Some(digest) = cli.digest {
        if digest == 0 {
            return Err(CliError::ZeroDigest);
        }
        settings.digest_limit = digest;
    }

    let mut engine = CachedInsightEngine::new(InsightEngine::new(settings));
    if config.cache.enabled {
        engine = engine.with_cache(Arc::new(InMemoryReportCache::new(config.cache.capacity)));
    }

    let mut handler = GenerateReportHandler::new(engine);
    if let Some(path) = cli.benchmarks.or(config.benchmarks.dataset_path) {
        handler = handler.with_benchmark_source(Arc::new(FileBenchmarkSource::new(path)));
    }
    if cli.narrative {
        handler = handler.with_narrator(Arc::new(TemplateNarrator::new()));
    }

    let generated = handler
        .handle(GenerateReportCommand {
            input,
            narrate: cli.narrative,
        })
        .await?;

    let output = if cli.pretty {
        serde_json::to_string_pretty(&generated)?
    } else {
        serde_json::to_string(&generated)?
    };
    Ok(output)
}

async fn read_bundle(path: &Path) -> Result<EvaluationInput, CliError> {
    let bytes = tokio::fs::read(path).await.map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_slice(&bytes).map_err(|source| CliError::Bundle {
        path: path.to_path_buf(),
        source,
    })
}
