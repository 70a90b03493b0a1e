// src/process/project.rs

use anyhow::{Context, Result};
use arrow::{
    array::ArrayRef,
    compute::{cast, cast_with_options, CastOptions},
    datatypes::{DataType, Field, Schema},
    record_batch::RecordBatch,
};
use std::sync::Arc;
use tracing::{instrument, warn};

use super::columns::{GROUP_CODE_COLUMN, NUMERIC_COLUMNS};
use crate::error::PipelineError;

fn required_column<'a>(table: &'a RecordBatch, name: &str) -> Result<&'a ArrayRef> {
    table
        .column_by_name(name)
        .ok_or_else(|| PipelineError::SchemaMismatch(name.to_string()).into())
}

/// Keep the group code and the twelve numeric columns, in that order.
/// Everything is cast to Float64. A code that isn't a number becomes null
/// (and is dropped later as an unknown group); a non-numeric cell in a
/// value column is a schema mismatch.
#[instrument(level = "debug", skip(table), fields(rows = table.num_rows()))]
pub fn project(table: &RecordBatch) -> Result<RecordBatch> {
    let mut fields = Vec::with_capacity(1 + NUMERIC_COLUMNS.len());
    let mut arrays: Vec<ArrayRef> = Vec::with_capacity(1 + NUMERIC_COLUMNS.len());

    let code = required_column(table, GROUP_CODE_COLUMN)?;
    arrays.push(
        cast(code, &DataType::Float64)
            .with_context(|| format!("casting {} to Float64", GROUP_CODE_COLUMN))?,
    );
    fields.push(Field::new(GROUP_CODE_COLUMN, DataType::Float64, true));

    let strict = CastOptions {
        safe: false,
        ..Default::default()
    };

    for name in NUMERIC_COLUMNS {
        let col = required_column(table, name)?;
        arrays.push(
            cast_with_options(col, &DataType::Float64, &strict)
                .map_err(|e| {
                    warn!(column = name, error = %e, "non-numeric values");
                    PipelineError::SchemaMismatch(name.to_string())
                })
                .with_context(|| format!("casting {} to Float64", name))?,
        );
        fields.push(Field::new(name, DataType::Float64, true));
    }

    RecordBatch::try_new(Arc::new(Schema::new(fields)), arrays)
        .context("building projected batch")
}
