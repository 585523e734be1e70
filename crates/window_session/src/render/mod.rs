//! Rendering: value types, the window session, and graphics backends

pub mod backends;
pub mod types;
pub mod window;

pub use types::{Color, Rect, RendererFlags, RendererInfo};
pub use window::{WindowSession, Platform, GraphicsBackend};
