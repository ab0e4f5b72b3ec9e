//! Sampling application for the p2p-collector system.
//!
//! This crate handles:
//! - The capture-window gate
//! - One-sided order-book fetches with retry/backoff
//! - Session orchestration and row assembly
//! - The append-only CSV sink

pub mod fetch;
pub mod runner;
pub mod sink;
pub mod window;
