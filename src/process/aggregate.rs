// src/process/aggregate.rs

use anyhow::{anyhow, Result};
use arrow::{
    array::{Array, Float64Array, StringArray},
    record_batch::RecordBatch,
};
use std::collections::BTreeMap;
use tracing::{debug, instrument};

use crate::error::PipelineError;

/// Per-group means, one entry per value column, in `columns` order.
/// `None` marks a column with no non-null values in that group.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupedMeans {
    pub columns: Vec<String>,
    pub groups: BTreeMap<String, Vec<Option<f64>>>,
}

#[derive(Debug, Default, Clone, Copy)]
struct Accumulator {
    sum: f64,
    count: usize,
}

impl Accumulator {
    fn push(&mut self, v: f64) {
        self.sum += v;
        self.count += 1;
    }

    fn mean(&self) -> Option<f64> {
        (self.count > 0).then(|| self.sum / self.count as f64)
    }
}

fn float_column<'a>(batch: &'a RecordBatch, name: &str) -> Result<&'a Float64Array> {
    batch
        .column_by_name(name)
        .ok_or_else(|| anyhow::Error::from(PipelineError::SchemaMismatch(name.to_string())))?
        .as_any()
        .downcast_ref::<Float64Array>()
        .ok_or_else(|| anyhow!("{} must be a Float64 column", name))
}

/// Mean of each value column per distinct `key` label.
///
/// Two passes: rows are first partitioned by label (null labels are
/// skipped), then each group's columns are folded into sum/count pairs.
/// Nulls inside a value column are left out of both sum and count.
#[instrument(level = "debug", skip(batch, columns), fields(rows = batch.num_rows()))]
pub fn group_means(batch: &RecordBatch, key: &str, columns: &[&str]) -> Result<GroupedMeans> {
    let keys = batch
        .column_by_name(key)
        .ok_or_else(|| anyhow::Error::from(PipelineError::SchemaMismatch(key.to_string())))?
        .as_any()
        .downcast_ref::<StringArray>()
        .ok_or_else(|| anyhow!("{} must be a Utf8 column", key))?;

    let mut partitions: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
    for (row, label) in keys.iter().enumerate() {
        if let Some(label) = label {
            partitions.entry(label).or_default().push(row);
        }
    }
    debug!(groups = partitions.len(), "partitioned rows");

    let values = columns
        .iter()
        .map(|name| float_column(batch, name))
        .collect::<Result<Vec<_>>>()?;

    let mut groups = BTreeMap::new();
    for (label, rows) in partitions {
        let means = values
            .iter()
            .map(|arr| {
                let mut acc = Accumulator::default();
                for &row in &rows {
                    if arr.is_valid(row) {
                        acc.push(arr.value(row));
                    }
                }
                acc.mean()
            })
            .collect();
        groups.insert(label.to_string(), means);
    }

    Ok(GroupedMeans {
        columns: columns.iter().map(|c| c.to_string()).collect(),
        groups,
    })
}
