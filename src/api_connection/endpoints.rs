use dotenv::dotenv;
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

use super::connection::FdaError;
use crate::records::{CATEGORY_COL, SAMPLE_NAME_COL};

pub const FDA_OPEN_DATA_URL: &str = "https://data.fda.gov.tw/opendata/exportDataList.do";
/// Dataset id of the food composition table.
pub const FOOD_COMPOSITION_INFO_ID: u32 = 20;
pub const DEFAULT_LIMIT: u32 = 20;
pub const DEFAULT_CATEGORY: &str = "一般成分";
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

pub const ENDPOINT_ENV_VAR: &str = "FOODCOUNT_ENDPOINT";
pub const INFO_ID_ENV_VAR: &str = "FOODCOUNT_INFO_ID";
pub const LIMIT_ENV_VAR: &str = "FOODCOUNT_LIMIT";
pub const CATEGORY_ENV_VAR: &str = "FOODCOUNT_CATEGORY";
pub const TIMEOUT_ENV_VAR: &str = "FOODCOUNT_TIMEOUT_SECS";

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct FdaConfig {
    pub endpoint: String,
    pub info_id: u32,
    pub limit: u32,
    /// Analyte category filter applied server-side.
    pub category: String,
    pub timeout_secs: u64,
}

impl Default for FdaConfig {
    fn default() -> Self {
        Self {
            endpoint: FDA_OPEN_DATA_URL.to_string(),
            info_id: FOOD_COMPOSITION_INFO_ID,
            limit: DEFAULT_LIMIT,
            category: DEFAULT_CATEGORY.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

fn parse_env_number<T: std::str::FromStr>(var: &str, default: T) -> Result<T, FdaError> {
    match env::var(var) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| FdaError::InvalidConfig(format!("{} must be a number, got '{}'", var, raw))),
        Err(_) => Ok(default),
    }
}

impl FdaConfig {
    /// Reads overrides from the environment (and `.env`), falling back to the public endpoint.
    pub fn from_env() -> Result<Self, FdaError> {
        dotenv().ok();
        let defaults = Self::default();
        Ok(Self {
            endpoint: env::var(ENDPOINT_ENV_VAR).unwrap_or(defaults.endpoint),
            info_id: parse_env_number(INFO_ID_ENV_VAR, defaults.info_id)?,
            limit: parse_env_number(LIMIT_ENV_VAR, defaults.limit)?,
            category: env::var(CATEGORY_ENV_VAR).unwrap_or(defaults.category),
            timeout_secs: parse_env_number(TIMEOUT_ENV_VAR, defaults.timeout_secs)?,
        })
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Query string pairs for a lookup by sample name.
    pub fn query_params(&self, sample_name: &str) -> Vec<(&'static str, String)> {
        vec![
            ("method", "openData".to_string()),
            ("InfoId", self.info_id.to_string()),
            ("limit", self.limit.to_string()),
            (SAMPLE_NAME_COL, sample_name.to_string()),
            (CATEGORY_COL, self.category.clone()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_targets_food_composition_table() {
        let config = FdaConfig::default();
        assert_eq!(config.endpoint, FDA_OPEN_DATA_URL);
        assert_eq!(config.info_id, 20);
        assert_eq!(config.limit, 20);
        assert_eq!(config.category, "一般成分");
        assert_eq!(config.timeout(), Duration::from_secs(15));
    }

    #[test]
    fn test_query_params() {
        let params = FdaConfig::default().query_params("雞胸肉");
        assert_eq!(
            params,
            vec![
                ("method", "openData".to_string()),
                ("InfoId", "20".to_string()),
                ("limit", "20".to_string()),
                ("樣品名稱", "雞胸肉".to_string()),
                ("分析項分類", "一般成分".to_string()),
            ]
        );
    }

    #[test]
    fn test_parse_env_number() {
        env::set_var("FOODCOUNT_TEST_LIMIT_OK", " 50 ");
        env::set_var("FOODCOUNT_TEST_LIMIT_BAD", "fifty");
        assert_eq!(parse_env_number("FOODCOUNT_TEST_LIMIT_OK", 20_u32).unwrap(), 50);
        assert_eq!(parse_env_number("FOODCOUNT_TEST_LIMIT_UNSET_XYZ", 20_u32).unwrap(), 20);
        let err = parse_env_number("FOODCOUNT_TEST_LIMIT_BAD", 20_u32).unwrap_err();
        assert!(err.to_string().contains("FOODCOUNT_TEST_LIMIT_BAD must be a number"));
    }
}
