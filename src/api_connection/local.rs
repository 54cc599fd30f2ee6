use std::path::Path;
use tracing::{info, warn};

use super::connection::FdaError;
use super::payload::parse_payload;
use crate::record_normalizer::{normalize, normalize_summary, select_first_sample, NAME_ALIASES};
use crate::records::{NutritionRow, RawPayload};

/// A previously exported payload, queried the way the live endpoint matches names.
#[derive(Debug, Clone, PartialEq)]
pub struct LocalDataset {
    payload: RawPayload,
}

impl LocalDataset {
    pub fn new(payload: RawPayload) -> Self {
        Self { payload }
    }

    pub async fn from_path(path: &Path) -> Result<Self, FdaError> {
        let body = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| FdaError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        let payload = parse_payload(&body)?;
        info!(path = %path.display(), rows = payload.len(), "loaded local dataset");
        Ok(Self { payload })
    }

    pub fn payload(&self) -> &RawPayload {
        &self.payload
    }

    /// Normalizes the first sample whose name contains `sample_name`.
    pub fn lookup(&self, sample_name: &str) -> Result<Option<NutritionRow>, FdaError> {
        let query = sample_name.trim();
        if query.is_empty() {
            return Err(FdaError::EmptyQuery);
        }

        let row = match &self.payload {
            RawPayload::Analytes(records) => {
                let matching: Vec<_> = records
                    .iter()
                    .filter(|r| r.sample_name.contains(query))
                    .cloned()
                    .collect();
                normalize(&select_first_sample(&matching))
            }
            RawPayload::Summaries(rows) => rows
                .iter()
                .find(|row| {
                    NAME_ALIASES
                        .iter()
                        .find_map(|alias| row.get(*alias))
                        .is_some_and(|name| name.contains(query))
                })
                .map(normalize_summary),
        };

        if row.is_none() {
            warn!(query, "no records found in local dataset");
        }
        Ok(row)
    }
}
