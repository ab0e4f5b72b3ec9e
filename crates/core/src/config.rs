//! Configuration structures for the p2p-collector system.
//!
//! The configuration is constructed once at process start (from defaults
//! or from the environment) and passed by parameter into the pipeline;
//! nothing reads the environment mid-run.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Order-book search endpoint used by the marketplace web UI.
pub const DEFAULT_ENDPOINT: &str = "https://p2p.binance.com/bapi/c2c/v2/friendly/c2c/adv/search";

/// Main configuration for one sampling run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Marketplace pair and query configuration.
    pub market: MarketConfig,
    /// Listing filter configuration.
    pub filter: FilterConfig,
    /// Capture-window configuration.
    pub window: WindowConfig,
    /// Fetch retry configuration.
    pub fetch: FetchConfig,
    /// Observation log configuration.
    pub sink: SinkConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            market: MarketConfig::default(),
            filter: FilterConfig::default(),
            window: WindowConfig::default(),
            fetch: FetchConfig::default(),
            sink: SinkConfig::default(),
        }
    }
}

impl Config {
    /// Build the configuration from the process environment.
    ///
    /// Every variable is optional; an unset variable keeps its default.
    /// A variable that is set but not parseable is a configuration error
    /// surfaced at startup, never a mid-pipeline failure.
    pub fn from_env() -> Result<Self> {
        let mut config = Config::default();
        if let Ok(v) = env::var("ASSET") {
            config.market.asset = v;
        }
        if let Ok(v) = env::var("FIAT") {
            config.market.fiat = v;
        }
        if let Ok(v) = env::var("ROWS") {
            config.market.rows = parse_var("ROWS", &v)?;
        }
        if let Ok(v) = env::var("PAY_TYPES") {
            config.filter.pay_types = split_tokens(&v);
        }
        if let Ok(v) = env::var("MIN_ORDER") {
            config.filter.min_order = parse_var("MIN_ORDER", &v)?;
        }
        if let Ok(v) = env::var("START_DATE") {
            config.window.start = non_empty(v);
        }
        if let Ok(v) = env::var("END_DATE") {
            config.window.end = non_empty(v);
        }
        if let Ok(v) = env::var("RETRIES") {
            config.fetch.retries = parse_var("RETRIES", &v)?;
        }
        if let Ok(v) = env::var("CSV_PATH") {
            config.sink.csv_path = PathBuf::from(v);
        }
        Ok(config)
    }
}

/// Marketplace pair and order-book query configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketConfig {
    /// Asset symbol (e.g., "USDT").
    pub asset: String,
    /// Fiat symbol (e.g., "VES").
    pub fiat: String,
    /// Listings requested per side (single page).
    pub rows: u32,
    /// Order-book search endpoint.
    pub endpoint: String,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            asset: "USDT".to_string(),
            fiat: "VES".to_string(),
            rows: 50,
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }
}

/// Listing filter configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Payment-method tokens as supplied, not normalized. Empty = no filter.
    pub pay_types: Vec<String>,
    /// Target order amount in fiat units.
    pub min_order: f64,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            pay_types: Vec::new(),
            min_order: 100.0,
        }
    }
}

/// Capture-window bounds, RFC 3339. An unset bound is unbounded.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WindowConfig {
    /// Earliest instant at which sampling may run.
    pub start: Option<String>,
    /// Latest instant at which sampling may run.
    pub end: Option<String>,
}

/// Fetch retry configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Additional attempts after the first failure.
    pub retries: u32,
    /// Backoff base; attempt n sleeps n x base before the next attempt.
    pub backoff_ms: u64,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            retries: 2,
            backoff_ms: 1500,
            timeout_secs: 30,
        }
    }
}

/// Observation log configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SinkConfig {
    /// Observation log path.
    pub csv_path: PathBuf,
}

impl Default for SinkConfig {
    fn default() -> Self {
        Self {
            csv_path: PathBuf::from("binance_p2p_prices.csv"),
        }
    }
}

/// Split a comma-separated token list, dropping empty segments.
fn split_tokens(value: &str) -> Vec<String> {
    value
        .split(',')
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_var<T: FromStr>(name: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| Error::config(format!("{name}: cannot parse `{value}` as a number")))
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.market.asset, "USDT");
        assert_eq!(config.market.fiat, "VES");
        assert_eq!(config.market.rows, 50);
        assert!(config.filter.pay_types.is_empty());
        assert_eq!(config.filter.min_order, 100.0);
        assert!(config.window.start.is_none());
        assert_eq!(config.fetch.retries, 2);
        assert_eq!(config.sink.csv_path, PathBuf::from("binance_p2p_prices.csv"));
    }

    #[test]
    fn test_split_tokens_drops_empty_segments() {
        assert_eq!(
            split_tokens("Pago Móvil,Banesco,,Mercantil"),
            vec!["Pago Móvil", "Banesco", "Mercantil"]
        );
        assert!(split_tokens("").is_empty());
    }

    #[test]
    fn test_parse_var_rejects_garbage() {
        assert!(parse_var::<u32>("ROWS", "50").is_ok());
        assert!(parse_var::<f64>("MIN_ORDER", " 100.5 ").is_ok());
        assert!(parse_var::<u32>("ROWS", "fifty").is_err());
    }
}
