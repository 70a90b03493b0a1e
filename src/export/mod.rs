// src/export/mod.rs

use anyhow::Result;
use serde::Serializer;
use std::fmt::Write as _;
use std::path::Path;
use tracing::{debug, instrument};

use crate::error::PipelineError;
use crate::process::TrendRow;

pub const HEADER: [&str; 3] = ["date", "category", "value"];

/// Two fractional digits; a value that rounds to zero prints as `0.00`,
/// never `-0.00`.
pub fn format_value(v: f64) -> String {
    let v = if v == 0.0 { 0.0 } else { v };
    let text = format!("{:.2}", v);
    match text.strip_prefix('-') {
        Some(rest) if rest.bytes().all(|b| b == b'0' || b == b'.') => rest.to_string(),
        _ => text,
    }
}

/// Values are always written with two fractional digits; a missing mean is
/// an empty field.
pub fn serialize_value<S: Serializer>(value: &Option<f64>, s: S) -> Result<S::Ok, S::Error> {
    match value {
        Some(v) => s.serialize_str(&format_value(*v)),
        None => s.serialize_none(),
    }
}

/// Write `rows` as `date,category,value` CSV, replacing whatever is at `path`.
/// The parent directory must already exist.
#[instrument(level = "debug", skip(rows), fields(path = %path.display(), rows = rows.len()))]
pub fn write_csv(rows: &[TrendRow], path: &Path) -> Result<()> {
    let wrap = |source: csv::Error| PipelineError::Write {
        path: path.to_path_buf(),
        source,
    };

    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .map_err(wrap)?;
    wtr.write_record(HEADER).map_err(wrap)?;
    for row in rows {
        wtr.serialize(row).map_err(wrap)?;
    }
    wtr.flush().map_err(|e| wrap(e.into()))?;
    debug!("csv written");
    Ok(())
}

/// Render the first `n` rows as an aligned text table with a row index.
pub fn render_preview(rows: &[TrendRow], n: usize) -> String {
    let cells: Vec<[String; 4]> = rows
        .iter()
        .take(n)
        .enumerate()
        .map(|(i, r)| {
            [
                i.to_string(),
                r.date.to_string(),
                r.category.clone(),
                r.value.map(format_value).unwrap_or_default(),
            ]
        })
        .collect();

    let header = ["", HEADER[0], HEADER[1], HEADER[2]];
    let mut widths = header.map(str::len);
    for row in &cells {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.len());
        }
    }

    let mut out = String::new();
    let mut line = |fields: [&str; 4]| {
        let joined: Vec<String> = fields
            .iter()
            .zip(widths)
            .map(|(f, w)| format!("{:>w$}", f, w = w))
            .collect();
        let _ = writeln!(out, "{}", joined.join("  ").trim_end());
    };
    line(header);
    for row in &cells {
        line([row[0].as_str(), row[1].as_str(), row[2].as_str(), row[3].as_str()]);
    }
    out.trim_end().to_string()
}
