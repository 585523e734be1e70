//! # Session and Application Configuration
//!
//! Serializable settings for window sessions and logging. Every struct uses
//! `#[serde(default)]`, so config files only need the keys they change.

use serde::{Deserialize, Serialize};

use crate::config::{Config, ConfigError};
use crate::render::types::Color;

/// # Session Configuration
///
/// Window size, title, and presentation options for one session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Window width in pixels
    pub width: i32,
    /// Window height in pixels
    pub height: i32,
    /// Window title
    pub title: String,
    /// Initial background used by `clear(None)`
    pub background: Color,
    /// Synchronize present with the display refresh
    pub vsync: bool,
    /// Allow the user to resize the window
    pub resizable: bool,
}

impl SessionConfig {
    /// Create a configuration for the given size
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Set the window title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the initial background color
    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    /// Enable or disable vsync
    pub fn with_vsync(mut self, vsync: bool) -> Self {
        self.vsync = vsync;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.width <= 0 || self.height <= 0 {
            return Err(format!(
                "window size must be positive, got {}x{}",
                self.width, self.height
            ));
        }

        if self.title.is_empty() {
            return Err("window title cannot be empty".to_string());
        }

        Ok(())
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            title: "Window".to_string(),
            background: Color::BLACK,
            vsync: true,
            resizable: false,
        }
    }
}

/// # Logging Configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log filter, in `env_logger` syntax (`info`, `window_session=debug`, ...)
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// # Complete Application Configuration
///
/// Top-level configuration applications load from disk.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplicationConfig {
    /// Window session settings
    pub session: SessionConfig,
    /// Logging settings
    pub logging: LoggingConfig,
}

impl ApplicationConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.session.validate().map_err(ConfigError::Invalid)
    }
}

impl Config for ApplicationConfig {}
