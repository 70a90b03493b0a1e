// src/process/relabel.rs

use anyhow::{anyhow, Result};
use arrow::{
    array::{Array, ArrayRef, Float64Array, StringArray},
    datatypes::{DataType, Field, FieldRef, Schema},
    record_batch::RecordBatch,
};
use std::fmt;
use std::sync::Arc;
use tracing::{instrument, warn};

use super::columns::{GROUP_CODE_COLUMN, GROUP_LABEL_COLUMN};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    /// Codes arrive as floats; only exact 1.0 and 2.0 carry a label.
    pub fn from_value(value: f64) -> Option<Self> {
        if value == 1.0 {
            Some(Sex::Male)
        } else if value == 2.0 {
            Some(Sex::Female)
        } else {
            None
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Sex::Male => "Male",
            Sex::Female => "Female",
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Append a nullable `Sex` label column derived from the group code.
/// Codes outside {1, 2} (and null codes) get a null label, which drops
/// the row from grouping later on.
#[instrument(level = "debug", skip(batch), fields(rows = batch.num_rows()))]
pub fn relabel(batch: &RecordBatch) -> Result<RecordBatch> {
    let codes = batch
        .column_by_name(GROUP_CODE_COLUMN)
        .and_then(|c| c.as_any().downcast_ref::<Float64Array>())
        .ok_or_else(|| anyhow!("{} must be a Float64 column", GROUP_CODE_COLUMN))?;

    let labels: StringArray = codes
        .iter()
        .map(|code| code.and_then(Sex::from_value).map(|s| s.label()))
        .collect();

    if labels.null_count() > 0 {
        warn!(
            rows = labels.null_count(),
            "rows with unrecognised {} codes are excluded from grouping", GROUP_CODE_COLUMN
        );
    }

    let mut fields: Vec<FieldRef> = batch.schema().fields().iter().cloned().collect();
    fields.push(Arc::new(Field::new(GROUP_LABEL_COLUMN, DataType::Utf8, true)));

    let mut columns: Vec<ArrayRef> = batch.columns().to_vec();
    columns.push(Arc::new(labels));

    RecordBatch::try_new(Arc::new(Schema::new(fields)), columns).map_err(Into::into)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codes_batch(codes: Vec<Option<f64>>) -> RecordBatch {
        let schema = Schema::new(vec![Field::new(GROUP_CODE_COLUMN, DataType::Float64, true)]);
        RecordBatch::try_new(
            Arc::new(schema),
            vec![Arc::new(Float64Array::from(codes)) as ArrayRef],
        )
        .unwrap()
    }

    fn labels(batch: &RecordBatch) -> Vec<Option<String>> {
        batch
            .column_by_name(GROUP_LABEL_COLUMN)
            .unwrap()
            .as_any()
            .downcast_ref::<StringArray>()
            .unwrap()
            .iter()
            .map(|v| v.map(str::to_string))
            .collect()
    }

    #[test]
    fn maps_known_codes() -> Result<()> {
        let out = relabel(&codes_batch(vec![Some(1.0), Some(2.0), Some(1.0)]))?;
        assert_eq!(out.num_columns(), 2);
        assert_eq!(
            labels(&out),
            vec![
                Some("Male".to_string()),
                Some("Female".to_string()),
                Some("Male".to_string())
            ]
        );
        Ok(())
    }

    #[test]
    fn unknown_and_null_codes_have_no_label() -> Result<()> {
        let out = relabel(&codes_batch(vec![
            Some(0.0),
            None,
            Some(3.0),
            Some(1.9),
            Some(f64::NAN),
            Some(2.0),
        ]))?;
        assert_eq!(
            labels(&out),
            vec![None, None, None, None, None, Some("Female".to_string())]
        );
        Ok(())
    }

    #[test]
    fn wrong_code_type_fails() {
        let schema = Schema::new(vec![Field::new(GROUP_CODE_COLUMN, DataType::Utf8, true)]);
        let batch = RecordBatch::try_new(
            Arc::new(schema),
            vec![Arc::new(StringArray::from(vec!["1"])) as ArrayRef],
        )
        .unwrap();
        assert!(relabel(&batch).is_err());
    }
}
