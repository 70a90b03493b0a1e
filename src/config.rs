// src/config.rs

use std::path::PathBuf;

/// UCI "default of credit card clients".
pub const DEFAULT_DATASET_ID: u32 = 350;
pub const DEFAULT_API_URL: &str = "https://archive.ics.uci.edu/api/dataset";
pub const DEFAULT_OUTPUT_PATH: &str = "Assignment_3/visualization/data.csv";
pub const DEFAULT_PREVIEW_ROWS: usize = 5;

/// Everything a run needs to know. There are no flags or env-driven
/// settings; `main` uses `PipelineConfig::default()`.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub dataset_id: u32,
    pub api_url: String,
    pub output_path: PathBuf,
    pub preview_rows: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            dataset_id: DEFAULT_DATASET_ID,
            api_url: DEFAULT_API_URL.to_string(),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            preview_rows: DEFAULT_PREVIEW_ROWS,
        }
    }
}
