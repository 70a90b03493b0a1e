// src/process/reshape.rs

use anyhow::Result;
use chrono::NaiveDate;
use serde::Serialize;
use tracing::instrument;

use super::aggregate::GroupedMeans;
use super::columns::column_info;
use crate::error::PipelineError;

/// One long-format observation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendRow {
    pub date: NaiveDate,
    pub category: String,
    #[serde(serialize_with = "crate::export::serialize_value")]
    pub value: Option<f64>,
}

/// Round to two decimal places, halves away from zero.
pub fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// Pivot every (group, column) mean into its own row, labelled
/// "{group} - {measure}" and dated from the column layout.
#[instrument(level = "debug", skip(means), fields(groups = means.groups.len()))]
pub fn reshape(means: &GroupedMeans) -> Result<Vec<TrendRow>> {
    let mut rows = Vec::with_capacity(means.groups.len() * means.columns.len());
    for (group, values) in &means.groups {
        for (column, value) in means.columns.iter().zip(values) {
            let info =
                column_info(column).ok_or_else(|| PipelineError::UnmappedColumn(column.clone()))?;
            rows.push(TrendRow {
                date: info.date,
                category: format!("{} - {}", group, info.measure),
                value: value.map(round2),
            });
        }
    }
    Ok(rows)
}

/// Order by category, then date within a category.
pub fn sort_rows(rows: &mut [TrendRow]) {
    rows.sort_by(|a, b| a.category.cmp(&b.category).then(a.date.cmp(&b.date)));
}
