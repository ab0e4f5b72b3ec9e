//! Order-book ingestion for the p2p-collector system.
//!
//! This crate handles:
//! - Typed decoding of the order-book search response
//! - Best-effort decimal parsing of wire strings
//! - Payment-method name normalization
//! - Listing filtering with per-stage diagnostic counters

pub mod decode;
pub mod filter;
pub mod normalize;

pub use decode::{decode_listings, parse_decimal, SearchResponse};
pub use filter::{filter_listings, matches_payment, normalize_tokens, passes_order_window, FilterStats};
pub use normalize::normalize;
