//! # Window Session
//!
//! A small window handle that ties together a native display surface, a
//! drawing surface, and frame timing/event state, on top of a narrow graphics
//! backend interface.
//!
//! ## Features
//!
//! - **Window Sessions**: explicit construction, idempotent teardown, `Drop` safety
//! - **Immediate Drawing**: clear, draw color, filled rectangles, present
//! - **Event Polling**: non-blocking, one event per call, normalized key symbols
//! - **Rate Gating**: `per_second(n)` frame gate over a millisecond tick source
//! - **Backends**: GLFW/OpenGL for real windows, a headless software backend for
//!   tests and offscreen use
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use window_session::prelude::*;
//!
//! fn main() -> Result<(), SessionError> {
//!     let mut session = WindowSession::open(800, 600)?;
//!
//!     loop {
//!         match session.poll_event()? {
//!             (EventKind::KeyDown, EventPayload::Key(KeySymbol::Quit)) => break,
//!             _ => {}
//!         }
//!
//!         if session.per_second(60)? {
//!             session.clear(None)?;
//!             session.set_draw_color(Color::rgb(255, 0, 0))?;
//!             session.fill_rect(Rect::new(10, 10, 50, 50))?;
//!             session.present()?;
//!         }
//!     }
//!
//!     session.destroy();
//!     Ok(())
//! }
//! ```

#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names)]

pub mod config;
pub mod core;
pub mod foundation;
pub mod input;
pub mod render;

pub use render::window::{SessionError, SessionResult, WindowSession};

/// Common imports for session users
pub mod prelude {
    pub use crate::{
        config::{Config, ConfigError},
        core::config::{ApplicationConfig, LoggingConfig, SessionConfig},
        input::{EventKind, EventPayload, KeySymbol},
        render::{
            backends::{GlfwBackend, HeadlessBackend},
            types::{Color, Rect, RendererFlags, RendererInfo},
            window::{GraphicsBackend, Platform},
        },
        SessionError, SessionResult, WindowSession,
    };
}
