//! Logging utilities

pub use log::{debug, error, info, trace, warn};

use crate::core::config::LoggingConfig;

/// Initialize the logging system with the default level
pub fn init() {
    init_with_config(&LoggingConfig::default());
}

/// Initialize the logging system from configuration.
///
/// `RUST_LOG` overrides the configured level. Returns `false` if a logger was
/// already installed, in which case the call has no effect.
pub fn init_with_config(config: &LoggingConfig) -> bool {
    let env = env_logger::Env::default().default_filter_or(config.level.as_str());
    env_logger::Builder::from_env(env).try_init().is_ok()
}
