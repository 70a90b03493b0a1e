// src/fetch/types.rs

use serde::{Deserialize, Serialize};

/// JSON envelope returned by the repository's dataset endpoint.
#[derive(Debug, Deserialize)]
pub struct ApiEnvelope {
    pub status: u16,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<DatasetMetadata>,
}

/// Dataset description as published by the repository.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DatasetMetadata {
    pub uci_id: u32,
    #[serde(default)]
    pub name: String,
    /// Where the data file lives; absent for datasets that cannot be imported.
    #[serde(default)]
    pub data_url: Option<String>,
    #[serde(default)]
    pub num_instances: Option<u64>,
    #[serde(default)]
    pub variables: Vec<Variable>,
}

/// A single column description.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Variable {
    pub name: String,
    pub role: String,
    #[serde(rename = "type", default)]
    pub ty: Option<String>,
}
