//! Typed decoding of the order-book search response.
//!
//! The endpoint returns numeric fields as JSON strings nested inside
//! `data[].adv`. All defensive handling lives here: every field is
//! declared optional, and a value that is missing, null, or wrong-typed
//! resolves to the absent sentinel instead of failing the whole parse.
//! The rest of the pipeline works over well-formed [`Listing`] values.

use p2p_core::Listing;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Top-level order-book search response.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    /// Listing entries; `None` when the endpoint omits or nulls the array.
    #[serde(default)]
    pub data: Option<Vec<AdvEntry>>,
}

/// One search result wrapping the advertisement body.
#[derive(Debug, Clone, Deserialize)]
pub struct AdvEntry {
    /// Advertisement body; entries without one decode to an empty listing.
    #[serde(default)]
    pub adv: Option<Adv>,
}

/// Advertisement body with string-typed numeric fields.
#[derive(Debug, Clone, Deserialize)]
pub struct Adv {
    /// Price in fiat units per unit of asset.
    #[serde(default, deserialize_with = "lenient_string")]
    pub price: Option<String>,
    /// Smallest accepted order, in fiat units.
    #[serde(rename = "minSingleTransAmount", default, deserialize_with = "lenient_string")]
    pub min_single_trans_amount: Option<String>,
    /// Largest accepted order, in fiat units.
    #[serde(rename = "maxSingleTransAmount", default, deserialize_with = "lenient_string")]
    pub max_single_trans_amount: Option<String>,
    /// Advertised payment methods.
    #[serde(rename = "tradeMethods", default)]
    pub trade_methods: Option<Vec<TradeMethod>>,
}

/// One advertised payment method.
#[derive(Debug, Clone, Deserialize)]
pub struct TradeMethod {
    /// Full display name shown in the marketplace UI.
    #[serde(rename = "tradeMethodName", default, deserialize_with = "lenient_string")]
    pub trade_method_name: Option<String>,
    /// Abbreviated display name, used when the full name is absent.
    #[serde(rename = "tradeMethodShortName", default, deserialize_with = "lenient_string")]
    pub trade_method_short_name: Option<String>,
}

/// Accept a string, stringify a number, and treat anything else as absent.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

/// Parse a wire decimal string.
///
/// `None` on empty, malformed, or non-finite input; never an error.
pub fn parse_decimal(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Flatten a decoded response into [`Listing`] values.
///
/// Every entry in the data array yields one listing, so downstream raw
/// counts match the page size the server returned; an entry without an
/// advertisement body becomes an empty listing that no filter passes.
pub fn decode_listings(response: SearchResponse) -> Vec<Listing> {
    response
        .data
        .unwrap_or_default()
        .into_iter()
        .map(|entry| entry.adv.map(listing_from_adv).unwrap_or_default())
        .collect()
}

fn listing_from_adv(adv: Adv) -> Listing {
    Listing {
        price: adv.price.as_deref().and_then(parse_decimal),
        min_order_amount: adv.min_single_trans_amount.as_deref().and_then(parse_decimal),
        max_order_amount: adv.max_single_trans_amount.as_deref().and_then(parse_decimal),
        payment_methods: adv
            .trade_methods
            .unwrap_or_default()
            .into_iter()
            .filter_map(|m| m.trade_method_name.or(m.trade_method_short_name))
            .collect(),
    }
}
