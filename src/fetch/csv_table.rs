// src/fetch/csv_table.rs

use anyhow::{Context, Result};
use arrow::compute::concat_batches;
use arrow::csv::reader::Format;
use arrow::csv::ReaderBuilder;
use arrow::record_batch::RecordBatch;
use std::io::Cursor;
use std::sync::Arc;
use tracing::debug;

const BATCH_SIZE: usize = 8192;

/// Parse a headed CSV blob into a single `RecordBatch`.
///
/// Column types are inferred over every record, so a float appearing late in
/// an otherwise integral column still widens the column.
pub fn read_csv_batch(data: &[u8]) -> Result<RecordBatch> {
    let format = Format::default().with_header(true);
    let (schema, records) = format
        .infer_schema(Cursor::new(data), None)
        .context("inferring CSV schema")?;
    let schema = Arc::new(schema);
    debug!(columns = schema.fields().len(), records, "inferred CSV schema");

    let reader = ReaderBuilder::new(schema.clone())
        .with_format(format)
        .with_batch_size(BATCH_SIZE)
        .build(Cursor::new(data))
        .context("creating CSV reader")?;

    let batches = reader
        .collect::<Result<Vec<_>, _>>()
        .context("reading CSV records")?;

    concat_batches(&schema, &batches).context("concatenating CSV batches")
}
