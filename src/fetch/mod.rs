// src/fetch/mod.rs

use anyhow::{Context, Result};
use arrow::record_batch::RecordBatch;
use std::path::PathBuf;
use tokio::fs;
use tracing::{debug, info};

pub mod csv_table;
pub mod types;
pub mod uci;

pub use csv_table::read_csv_batch;
pub use types::{DatasetMetadata, Variable};
pub use uci::UciRepository;

/// Variable role that marks a column as an input feature.
pub const FEATURE_ROLE: &str = "Feature";

/// A fetched dataset: the full table plus whatever metadata the source had.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub metadata: Option<DatasetMetadata>,
    pub table: RecordBatch,
}

impl Dataset {
    /// The feature columns only. Without variable metadata every column counts
    /// as a feature.
    pub fn features(&self) -> Result<RecordBatch> {
        let variables = match &self.metadata {
            Some(meta) if !meta.variables.is_empty() => &meta.variables,
            _ => return Ok(self.table.clone()),
        };

        let schema = self.table.schema();
        let indices: Vec<usize> = variables
            .iter()
            .filter(|v| v.role == FEATURE_ROLE)
            .filter_map(|v| schema.index_of(&v.name).ok())
            .collect();
        debug!(features = indices.len(), "selecting feature columns");

        self.table
            .project(&indices)
            .context("projecting feature columns")
    }
}

/// Where the input table comes from.
#[derive(Debug, Clone)]
pub enum DatasetSource {
    /// The UCI Machine Learning Repository API.
    Uci(UciRepository),
    /// A local CSV file in the same shape as the repository's data file.
    CsvFile(PathBuf),
}

impl DatasetSource {
    pub async fn load(&self, dataset_id: u32) -> Result<Dataset> {
        match self {
            DatasetSource::Uci(repo) => repo.fetch(dataset_id).await,
            DatasetSource::CsvFile(path) => {
                info!(path = %path.display(), "reading local dataset");
                let bytes = fs::read(path)
                    .await
                    .with_context(|| format!("reading {}", path.display()))?;
                let table = read_csv_batch(&bytes)
                    .with_context(|| format!("parsing {}", path.display()))?;
                Ok(Dataset {
                    metadata: None,
                    table,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn variable(name: &str, role: &str) -> Variable {
        Variable {
            name: name.to_string(),
            role: role.to_string(),
            ty: Some("Integer".to_string()),
        }
    }

    #[test]
    fn features_keeps_feature_role_columns() -> Result<()> {
        let table = read_csv_batch(b"ID,X1,X2,Y\n1,20000,2,1\n2,120000,1,0\n")?;
        let dataset = Dataset {
            metadata: Some(DatasetMetadata {
                uci_id: 350,
                name: "default of credit card clients".to_string(),
                data_url: None,
                num_instances: Some(2),
                variables: vec![
                    variable("ID", "ID"),
                    variable("X1", "Feature"),
                    variable("X2", "Feature"),
                    variable("Y", "Target"),
                ],
            }),
            table,
        };

        let features = dataset.features()?;
        let names: Vec<String> = features
            .schema()
            .fields()
            .iter()
            .map(|f| f.name().clone())
            .collect();
        assert_eq!(names, vec!["X1", "X2"]);
        assert_eq!(features.num_rows(), 2);
        Ok(())
    }

    #[test]
    fn features_without_metadata_is_whole_table() -> Result<()> {
        let table = read_csv_batch(b"X2,X12\n1,100\n")?;
        let dataset = Dataset {
            metadata: None,
            table: table.clone(),
        };
        assert_eq!(dataset.features()?, table);
        Ok(())
    }

    #[tokio::test]
    async fn csv_file_source_loads_table() -> Result<()> {
        let mut tmp = NamedTempFile::new()?;
        tmp.write_all(b"X2,X12\n1,100\n2,300\n")?;

        let source = DatasetSource::CsvFile(tmp.path().to_path_buf());
        let dataset = source.load(350).await?;
        assert!(dataset.metadata.is_none());
        assert_eq!(dataset.table.num_rows(), 2);
        assert_eq!(dataset.table.num_columns(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn csv_file_source_missing_file_fails() {
        let source = DatasetSource::CsvFile(PathBuf::from("does/not/exist.csv"));
        assert!(source.load(350).await.is_err());
    }
}
