// src/pipeline.rs

use anyhow::{Context, Result};
use tracing::{info, instrument};

use crate::config::PipelineConfig;
use crate::export::{render_preview, write_csv};
use crate::fetch::DatasetSource;
use crate::process::{transform, TrendRow};

/// Fetch → transform → export, once. Any failure aborts the run.
#[instrument(level = "info", skip_all, fields(dataset_id = config.dataset_id))]
pub async fn run(config: &PipelineConfig, source: &DatasetSource) -> Result<Vec<TrendRow>> {
    info!("Fetching dataset...");
    let dataset = source
        .load(config.dataset_id)
        .await
        .with_context(|| format!("fetching dataset {}", config.dataset_id))?;
    let features = dataset.features()?;

    info!("Processing data...");
    let rows = transform(&features)?;

    write_csv(&rows, &config.output_path)
        .with_context(|| format!("saving {}", config.output_path.display()))?;
    info!("Data saved to {}", config.output_path.display());

    println!("{}", render_preview(&rows, config.preview_rows));
    Ok(rows)
}
