//! Core types and configuration for the p2p-collector system.
//!
//! This crate provides shared types used across all other crates:
//! - Order-book data types (listings, side summaries, observations)
//! - Configuration structures
//! - Common error types

pub mod config;
pub mod error;
pub mod types;

pub use config::Config;
pub use error::{Error, Result};
pub use types::*;
