// src/fetch/uci.rs

use anyhow::{Context, Result};
use reqwest::Client;
use tracing::{debug, info, instrument};
use url::Url;

use super::csv_table::read_csv_batch;
use super::types::{ApiEnvelope, DatasetMetadata};
use super::Dataset;
use crate::error::PipelineError;

/// Client for the UCI Machine Learning Repository dataset API.
#[derive(Debug, Clone)]
pub struct UciRepository {
    client: Client,
    api_url: Url,
}

impl UciRepository {
    pub fn new(client: Client, api_url: &str) -> Result<Self> {
        let api_url =
            Url::parse(api_url).with_context(|| format!("parsing API URL {}", api_url))?;
        Ok(Self { client, api_url })
    }

    /// URL of the metadata request for `id`.
    pub fn dataset_url(&self, id: u32) -> Url {
        let mut url = self.api_url.clone();
        url.query_pairs_mut().append_pair("id", &id.to_string());
        url
    }

    /// Fetch metadata for `id`, then download and parse its data file.
    #[instrument(level = "info", skip(self))]
    pub async fn fetch(&self, id: u32) -> Result<Dataset> {
        let url = self.dataset_url(id);
        let body = get_bytes_core(&self.client, &url).await?;
        let metadata = parse_envelope(id, &body)?;
        info!(name = %metadata.name, instances = ?metadata.num_instances, "dataset metadata");

        let data_url = metadata
            .data_url
            .as_deref()
            .ok_or(PipelineError::DatasetNotImportable { id })?;
        let data_url = Url::parse(data_url)
            .with_context(|| format!("parsing data URL {}", data_url))?;

        let data = get_bytes_core(&self.client, &data_url).await?;
        let table = read_csv_batch(&data)
            .with_context(|| format!("parsing data file from {}", data_url))?;
        info!(rows = table.num_rows(), columns = table.num_columns(), "dataset loaded");

        Ok(Dataset {
            metadata: Some(metadata),
            table,
        })
    }
}

async fn get_bytes_core(client: &Client, url: &Url) -> Result<Vec<u8>> {
    debug!("Fetching {}", url);
    let resp = client
        .get(url.clone())
        .send()
        .await
        .map_err(|e| PipelineError::SourceUnavailable(format!("GET {}: {}", url, e)))?
        .error_for_status()
        .map_err(|e| PipelineError::SourceUnavailable(format!("GET {}: {}", url, e)))?;
    let bytes = resp
        .bytes()
        .await
        .map_err(|e| {
            PipelineError::SourceUnavailable(format!("reading body from {}: {}", url, e))
        })?;
    Ok(bytes.to_vec())
}

/// Decode the metadata envelope. A non-200 `status` is reported with the
/// repository's own message; a dataset without a data file can't be imported.
pub fn parse_envelope(id: u32, body: &[u8]) -> Result<DatasetMetadata> {
    let envelope: ApiEnvelope =
        serde_json::from_slice(body).context("decoding dataset metadata")?;

    if envelope.status != 200 {
        let message = envelope
            .message
            .unwrap_or_else(|| "An error occurred".to_string());
        return Err(PipelineError::SourceUnavailable(message).into());
    }

    let metadata = envelope.data.ok_or_else(|| {
        PipelineError::SourceUnavailable(format!("no metadata returned for dataset {}", id))
    })?;

    match metadata.data_url.as_deref() {
        Some(u) if !u.trim().is_empty() => Ok(metadata),
        _ => Err(PipelineError::DatasetNotImportable { id }.into()),
    }
}
