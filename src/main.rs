use anyhow::{Context, Result};
use clap::Parser;
use satisfaction_pipeline::{PipelineConfig, TrainingPipelineDirector};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "satisfaction-pipeline",
    version,
    about = "Trains a review-score regression model and reports R2 and RMSE"
)]
struct Cli {
    /// Source dataset (CSV or TSV with a header row).
    #[arg(long)]
    data_path: PathBuf,
    /// JSON configuration file; missing fields use defaults.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Overrides the configured model.
    #[arg(long)]
    model_name: Option<String>,
    /// Appends metrics to the JSONL tracking file.
    #[arg(long)]
    track: bool,
    /// Overrides the tracking file location.
    #[arg(long)]
    metrics_path: Option<PathBuf>,
}

fn load_config(cli: &Cli) -> Result<PipelineConfig> {
    let mut config = match &cli.config {
        Some(path) => PipelineConfig::from_json_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => PipelineConfig::default(),
    };
    if let Some(model_name) = &cli.model_name {
        config.model.model_name = model_name.clone();
    }
    if cli.track {
        config.tracking.enabled = true;
    }
    if let Some(metrics_path) = &cli.metrics_path {
        config.tracking.metrics_path = metrics_path.clone();
    }
    config.validate().context("validating config")?;
    Ok(config)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;

    if config.tracking.enabled {
        println!(
            "Tracking to {} (experiment {})",
            config.tracking.metrics_path.display(),
            config.tracking.experiment
        );
    } else {
        println!("Tracking disabled");
    }

    let mut pipeline = TrainingPipelineDirector::build_default(&config, &cli.data_path)
        .context("building pipeline")?;
    info!(info = ?pipeline.info(), "pipeline configured");

    let outcome = pipeline
        .run()
        .with_context(|| format!("running pipeline on {}", cli.data_path.display()))?;

    println!("r2: {:.6}", outcome.r2_score);
    println!("rmse: {:.6}", outcome.rmse);
    Ok(())
}
