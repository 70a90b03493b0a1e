// src/error.rs

use std::path::PathBuf;
use thiserror::Error;

/// Root causes a pipeline run can fail with. These are wrapped in
/// `anyhow::Error` with context as they propagate.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("dataset source unavailable: {0}")]
    SourceUnavailable(String),

    #[error("dataset {id} exists in the repository but is not available for import")]
    DatasetNotImportable { id: u32 },

    #[error("expected numeric column `{0}` is missing or holds non-numeric values")]
    SchemaMismatch(String),

    #[error("column `{0}` has no date/measure mapping")]
    UnmappedColumn(String),

    #[error("failed to write {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}
