//! Foundation module - small utilities used across the crate
//!
//! - Logging setup
//! - Tick-based rate gating

pub mod logging;
pub mod time;
