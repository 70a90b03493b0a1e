// src/process/mod.rs

use anyhow::{Context, Result};
use arrow::record_batch::RecordBatch;
use tracing::{info, instrument};

pub mod aggregate;
pub mod columns;
pub mod project;
pub mod relabel;
pub mod reshape;

pub use aggregate::{group_means, GroupedMeans};
pub use columns::{column_info, ColumnInfo, Measure, NUMERIC_COLUMNS};
pub use project::project;
pub use relabel::{relabel, Sex};
pub use reshape::{reshape, round2, sort_rows, TrendRow};

use columns::GROUP_LABEL_COLUMN;

/// Turn the wide feature table into sorted long-format rows:
/// project → relabel → group means → reshape → sort.
#[instrument(level = "info", skip(features), fields(rows = features.num_rows()))]
pub fn transform(features: &RecordBatch) -> Result<Vec<TrendRow>> {
    let projected = project(features).context("selecting columns")?;
    let labelled = relabel(&projected).context("relabeling group codes")?;
    let means = group_means(&labelled, GROUP_LABEL_COLUMN, &NUMERIC_COLUMNS)
        .context("aggregating group means")?;
    let mut rows = reshape(&means).context("reshaping to long format")?;
    sort_rows(&mut rows);
    info!(groups = means.groups.len(), rows = rows.len(), "transformed");
    Ok(rows)
}
