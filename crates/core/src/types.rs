//! Core data types for the p2p-collector system.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Trade direction of the counterparty's advertisement.
///
/// `Sell` means the counterparty sells asset to the user (the user
/// acquires asset); `Buy` is the reverse. The direction determines both
/// the API query parameter and which end of the price range is "best".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TradeSide {
    /// Counterparty sells asset to the user.
    Sell,
    /// Counterparty buys asset from the user.
    Buy,
}

impl TradeSide {
    /// The `tradeType` value expected by the order-book endpoint.
    pub fn as_query(self) -> &'static str {
        match self {
            TradeSide::Sell => "SELL",
            TradeSide::Buy => "BUY",
        }
    }
}

impl std::fmt::Display for TradeSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_query())
    }
}

/// One order-book advertisement, decoded and ready for filtering.
///
/// All numeric fields come off the wire as strings; a field that is
/// missing or unparseable decodes to `None`. An absent order bound means
/// unbounded in that direction.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Listing {
    /// Advertised price in fiat units per unit of asset.
    pub price: Option<f64>,
    /// Smallest order the advertiser accepts, in fiat units.
    pub min_order_amount: Option<f64>,
    /// Largest order the advertiser accepts, in fiat units.
    pub max_order_amount: Option<f64>,
    /// Display names of the advertised payment methods.
    pub payment_methods: Vec<String>,
}

/// Summary statistics over one side's filtered listings.
///
/// When `prices` is empty every optional field is absent; otherwise all
/// are present and `best` equals `min_price` (SELL) or `max_price` (BUY).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SideSummary {
    /// Filtered prices, in arrival order.
    pub prices: Vec<f64>,
    /// Most favorable price for the user on this side.
    pub best: Option<f64>,
    /// Lowest filtered price.
    pub min_price: Option<f64>,
    /// Highest filtered price.
    pub max_price: Option<f64>,
    /// Trimmed average over the 10 most favorable prices.
    pub avg_top: Option<f64>,
}

impl SideSummary {
    /// Number of listings that survived filtering.
    pub fn count(&self) -> usize {
        self.prices.len()
    }
}

/// One row of the observation log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Observation {
    /// Sampling instant (UTC).
    pub timestamp: DateTime<Utc>,
    /// Asset symbol (e.g., "USDT").
    pub asset: String,
    /// Fiat symbol (e.g., "VES").
    pub fiat: String,
    /// Configured payment-method tokens as originally supplied, comma-joined.
    pub pay_types: String,
    /// Order-amount threshold used for filtering, in fiat units.
    pub min_order: f64,
    /// SELL-side summary.
    pub sell: SideSummary,
    /// BUY-side summary.
    pub buy: SideSummary,
    /// `best_buy - best_sell`, absent if either side is empty.
    pub spread: Option<f64>,
    /// Listings requested per side.
    pub rows_considered: u32,
}

impl Observation {
    /// Column names of the observation log, in record order.
    pub const HEADER: [&'static str; 17] = [
        "timestamp_utc",
        "asset",
        "fiat",
        "pay_types",
        "min_order",
        "best_sell",
        "sell_count",
        "sell_min_price",
        "sell_max_price",
        "avg_sell_top10",
        "best_buy",
        "buy_count",
        "buy_min_price",
        "buy_max_price",
        "avg_buy_top10",
        "spread_buy_minus_sell",
        "rows_considered",
    ];

    /// Render the row in [`Self::HEADER`] order. Absent values become `NA`.
    pub fn to_record(&self) -> Vec<String> {
        vec![
            self.timestamp.to_rfc3339_opts(SecondsFormat::Micros, false),
            self.asset.clone(),
            self.fiat.clone(),
            self.pay_types.clone(),
            self.min_order.to_string(),
            na(self.sell.best),
            self.sell.count().to_string(),
            na(self.sell.min_price),
            na(self.sell.max_price),
            na(self.sell.avg_top),
            na(self.buy.best),
            self.buy.count().to_string(),
            na(self.buy.min_price),
            na(self.buy.max_price),
            na(self.buy.avg_top),
            na(self.spread),
            self.rows_considered.to_string(),
        ]
    }
}

/// Render an optional value, substituting the `NA` sentinel when absent.
fn na(value: Option<f64>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => "NA".to_string(),
    }
}
