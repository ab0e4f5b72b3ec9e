//! Summary statistics for the p2p-collector system.
//!
//! This crate handles:
//! - Direction-aware best-price selection
//! - Trimmed top-N price averaging
//! - Side summaries and the buy/sell spread

pub mod aggregate;

pub use aggregate::{spread, summarize, top_n_average, TOP_N};
