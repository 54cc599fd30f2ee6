use reqwest::header::ACCEPT;
use reqwest::{Client, StatusCode};
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, info, warn};

use super::endpoints::FdaConfig;
use super::payload::parse_payload;
use crate::record_normalizer::row_from_payload;
use crate::records::{NutritionRow, RawPayload};

#[derive(Debug, Error)]
pub enum FdaError {
    #[error("Food name must not be empty")]
    EmptyQuery,
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("API error {status}: {body}")]
    Api { status: StatusCode, body: String },
    #[error("Malformed JSON payload: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Malformed CSV payload: {0}")]
    Csv(#[from] csv::Error),
    #[error("Unexpected payload: {0}")]
    UnexpectedFormat(String),
    #[error("Failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Client for the FDA open data export endpoint.
#[derive(Debug, Clone)]
pub struct FdaClient {
    client: Client,
    config: FdaConfig,
}

impl FdaClient {
    pub fn new(config: FdaConfig) -> Result<Self, FdaError> {
        let client = Client::builder().timeout(config.timeout()).build()?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &FdaConfig {
        &self.config
    }

    /// Fetches every record the endpoint returns for a food name. The upstream match is
    /// partial, so the payload may hold several samples.
    pub async fn fetch_payload(&self, sample_name: &str) -> Result<RawPayload, FdaError> {
        let query = sample_name.trim();
        if query.is_empty() {
            return Err(FdaError::EmptyQuery);
        }

        info!(query, endpoint = %self.config.endpoint, "querying food composition data");
        let response = self
            .client
            .get(&self.config.endpoint)
            .query(&self.config.query_params(query))
            .header(ACCEPT, "application/json, text/plain, */*")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());
            return Err(FdaError::Api { status, body });
        }

        let body = response.text().await?;
        let payload = parse_payload(&body)?;
        debug!(query, rows = payload.len(), "decoded response");
        Ok(payload)
    }

    /// Looks up a food and normalizes the first sample of the response.
    /// `Ok(None)` means the source had no records for the name.
    pub async fn lookup(&self, sample_name: &str) -> Result<Option<NutritionRow>, FdaError> {
        let payload = self.fetch_payload(sample_name).await?;
        let row = row_from_payload(&payload);
        if row.is_none() {
            warn!(query = sample_name, "no records found");
        }
        Ok(row)
    }
}
