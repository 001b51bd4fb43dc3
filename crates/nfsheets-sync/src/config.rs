//! Environment-backed configuration, validated once at startup.

use std::path::PathBuf;
use std::time::Duration;

use alloy::primitives::Address;
use reqwest::Url;
use thiserror::Error;

use nfsheets_common::GridDims;

/// Missing or malformed settings. Fatal at startup, never retried.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),

    #[error("environment variable {var} is invalid: {reason}")]
    Invalid { var: &'static str, reason: String },
}

/// Everything one sync cycle needs, resolved and typed.
#[derive(Clone, Debug)]
pub struct SyncConfig {
    pub contract_address: Address,
    pub rpc_endpoint: Url,
    pub spreadsheet_id: String,
    pub credentials_file: PathBuf,
    pub sheet_name: String,
    pub sheet_tab_id: i64,
    pub grid: GridDims,
    pub page_size: Option<u64>,
    pub phase_timeout: Option<Duration>,
}

impl SyncConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read configuration through an injectable lookup, so tests can
    /// supply an environment without touching process globals.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let contract_address =
            parse_required(&lookup, "NFSHEETS_CONTRACT_ADDRESS", |text| {
                text.parse::<Address>().map_err(|err| err.to_string())
            })?;
        let rpc_endpoint = parse_required(&lookup, "NFSHEETS_RPC_ENDPOINT", |text| {
            text.parse::<Url>().map_err(|err| err.to_string())
        })?;
        let spreadsheet_id = require(&lookup, "NFSHEETS_GOOGLE_SHEET_ID")?;
        let credentials_file =
            PathBuf::from(require(&lookup, "NFSHEETS_GOOGLE_CREDENTIALS_FILE")?);

        let sheet_name =
            lookup("NFSHEETS_SHEET_NAME").unwrap_or_else(|| "Sheet1".to_string());
        let sheet_tab_id = parse_optional(&lookup, "NFSHEETS_SHEET_TAB_ID")?.unwrap_or(0);

        let num_rows: u32 =
            parse_optional(&lookup, "NFSHEETS_NUM_ROWS")?.unwrap_or(GridDims::DEPLOYED.num_rows());
        if num_rows == 0 {
            return Err(ConfigError::Invalid {
                var: "NFSHEETS_NUM_ROWS",
                reason: "grid must have at least one row".to_string(),
            });
        }
        let grid = GridDims::new(num_rows, GridDims::DEPLOYED.num_columns());

        let page_size = parse_optional(&lookup, "NFSHEETS_PAGE_SIZE")?;
        if page_size == Some(0) {
            return Err(ConfigError::Invalid {
                var: "NFSHEETS_PAGE_SIZE",
                reason: "page size must be positive".to_string(),
            });
        }
        let timeout_secs: Option<u64> = parse_optional(&lookup, "NFSHEETS_PHASE_TIMEOUT_SECS")?;
        let phase_timeout = timeout_secs.map(Duration::from_secs);

        Ok(Self {
            contract_address,
            rpc_endpoint,
            spreadsheet_id,
            credentials_file,
            sheet_name,
            sheet_tab_id,
            grid,
            page_size,
            phase_timeout,
        })
    }
}

fn require(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
) -> Result<String, ConfigError> {
    match lookup(var) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(ConfigError::Missing(var)),
    }
}

fn parse_required<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
    parse: impl Fn(&str) -> Result<T, String>,
) -> Result<T, ConfigError> {
    let text = require(lookup, var)?;
    parse(&text).map_err(|reason| ConfigError::Invalid { var, reason })
}

fn parse_optional<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
) -> Result<Option<T>, ConfigError>
where
    T::Err: std::fmt::Display,
{
    match lookup(var) {
        None => Ok(None),
        Some(text) => text.parse().map(Some).map_err(|err: T::Err| {
            ConfigError::Invalid {
                var,
                reason: err.to_string(),
            }
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn base_env() -> HashMap<&'static str, String> {
        HashMap::from([
            (
                "NFSHEETS_CONTRACT_ADDRESS",
                "0x36f379400de6c6bcdf4408b282f8b685c56adc60".to_string(),
            ),
            (
                "NFSHEETS_RPC_ENDPOINT",
                "https://mainnet.example.org/rpc".to_string(),
            ),
            ("NFSHEETS_GOOGLE_SHEET_ID", "sheet-id".to_string()),
            (
                "NFSHEETS_GOOGLE_CREDENTIALS_FILE",
                "/etc/nfsheets/key.json".to_string(),
            ),
        ])
    }

    fn config_from(env: &HashMap<&'static str, String>) -> Result<SyncConfig, ConfigError> {
        SyncConfig::from_lookup(|var| env.get(var).cloned())
    }

    #[test]
    fn loads_with_defaults() {
        let config = config_from(&base_env()).unwrap();
        assert_eq!(config.sheet_name, "Sheet1");
        assert_eq!(config.sheet_tab_id, 0);
        assert_eq!(config.grid, GridDims::DEPLOYED);
        assert_eq!(config.page_size, None);
        assert_eq!(config.phase_timeout, None);
    }

    #[test]
    fn each_required_variable_is_reported_by_name() {
        for var in [
            "NFSHEETS_CONTRACT_ADDRESS",
            "NFSHEETS_RPC_ENDPOINT",
            "NFSHEETS_GOOGLE_SHEET_ID",
            "NFSHEETS_GOOGLE_CREDENTIALS_FILE",
        ] {
            let mut env = base_env();
            env.remove(var);
            match config_from(&env) {
                Err(ConfigError::Missing(missing)) => assert_eq!(missing, var),
                other => panic!("expected Missing({var}), got {other:?}"),
            }
        }
    }

    #[test]
    fn malformed_address_is_invalid_not_missing() {
        let mut env = base_env();
        env.insert("NFSHEETS_CONTRACT_ADDRESS", "not-an-address".to_string());
        assert!(matches!(
            config_from(&env),
            Err(ConfigError::Invalid {
                var: "NFSHEETS_CONTRACT_ADDRESS",
                ..
            })
        ));
    }

    #[test]
    fn optional_overrides_apply() {
        let mut env = base_env();
        env.insert("NFSHEETS_SHEET_NAME", "Cells".to_string());
        env.insert("NFSHEETS_SHEET_TAB_ID", "77".to_string());
        env.insert("NFSHEETS_NUM_ROWS", "500".to_string());
        env.insert("NFSHEETS_PAGE_SIZE", "250".to_string());
        env.insert("NFSHEETS_PHASE_TIMEOUT_SECS", "30".to_string());

        let config = config_from(&env).unwrap();
        assert_eq!(config.sheet_name, "Cells");
        assert_eq!(config.sheet_tab_id, 77);
        assert_eq!(config.grid.num_rows(), 500);
        assert_eq!(config.page_size, Some(250));
        assert_eq!(config.phase_timeout, Some(Duration::from_secs(30)));
    }

    #[test]
    fn zero_page_size_rejected() {
        let mut env = base_env();
        env.insert("NFSHEETS_PAGE_SIZE", "0".to_string());
        assert!(matches!(
            config_from(&env),
            Err(ConfigError::Invalid {
                var: "NFSHEETS_PAGE_SIZE",
                ..
            })
        ));
    }

    #[test]
    fn non_numeric_rows_rejected() {
        let mut env = base_env();
        env.insert("NFSHEETS_NUM_ROWS", "lots".to_string());
        assert!(matches!(
            config_from(&env),
            Err(ConfigError::Invalid {
                var: "NFSHEETS_NUM_ROWS",
                ..
            })
        ));
    }
}
