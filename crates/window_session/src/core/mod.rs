//! # Core Module
//!
//! Shared configuration types for sessions and the surrounding application.

pub mod config;

pub use config::{ApplicationConfig, LoggingConfig, SessionConfig};
