//! Graphics backend capability interface
//!
//! This module defines the trait every native graphics library must implement
//! to back a [`WindowSession`](super::WindowSession). The session never touches
//! native types directly: surfaces are referred to through opaque handles and
//! input arrives as backend-neutral [`NativeEvent`]s.

use thiserror::Error;

use crate::render::types::{Color, Rect, RendererInfo};

/// Error reported by a graphics backend, carrying the backend's own message
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct BackendError {
    message: String,
}

impl BackendError {
    /// Create an error from a backend diagnostic
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }

    /// The backend-provided message
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Opaque handle to a display surface (the visible window)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DisplayHandle(pub(crate) u32);

/// Opaque handle to a drawing surface (the buffer drawn into before present)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DrawHandle(pub(crate) u32);

impl DisplayHandle {
    /// Wrap a backend-assigned surface id
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Backend-assigned surface id
    pub const fn id(self) -> u32 {
        self.0
    }
}

impl DrawHandle {
    /// Wrap a backend-assigned surface id
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Backend-assigned surface id
    pub const fn id(self) -> u32 {
        self.0
    }
}

/// Parameters for surface creation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurfaceRequest {
    /// Width in pixels, always positive
    pub width: u32,
    /// Height in pixels, always positive
    pub height: u32,
    /// Window title
    pub title: String,
    /// Synchronize present with the display refresh
    pub vsync: bool,
    /// Allow the user to resize the window
    pub resizable: bool,
}

/// Native key code as delivered by the backend.
///
/// Values follow the GLFW key numbering; other backends translate into it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Keycode(pub i32);

#[allow(missing_docs)]
impl Keycode {
    pub const SPACE: Self = Self(32);
    pub const A: Self = Self(65);
    pub const D: Self = Self(68);
    pub const S: Self = Self(83);
    pub const W: Self = Self(87);
    pub const ESCAPE: Self = Self(256);
    pub const RIGHT: Self = Self(262);
    pub const LEFT: Self = Self(263);
    pub const DOWN: Self = Self(264);
    pub const UP: Self = Self(265);
}

/// Input event as reported by the backend, before normalization
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NativeEvent {
    /// Key pressed, or auto-repeated while held
    KeyDown(Keycode),
    /// Key released
    KeyUp(Keycode),
    /// Cursor moved, in window coordinates
    MouseMotion {
        /// Cursor x
        x: i32,
        /// Cursor y
        y: i32,
    },
    /// Mouse button pressed
    MouseButtonDown(u8),
    /// Mouse button released
    MouseButtonUp(u8),
    /// The user asked to close the window
    CloseRequested,
    /// Anything the session does not translate (focus, resize, scroll, ...)
    Other,
}

/// Capability interface of a native graphics library.
///
/// Implementations are single-threaded: surfaces and the event queue belong
/// to the thread that created them.
pub trait GraphicsBackend {
    /// Initialize the library. Called once before the first surface is created.
    fn init(&mut self) -> Result<(), BackendError>;

    /// Shut the library down. Called once after the last surface is destroyed.
    fn shutdown(&mut self);

    /// Allocate a display surface and its drawing surface
    fn create_surfaces(&mut self, request: &SurfaceRequest) -> Result<(DisplayHandle, DrawHandle), BackendError>;

    /// Release both surfaces
    fn destroy_surfaces(&mut self, display: DisplayHandle, draw: DrawHandle);

    /// Renderer metadata for a drawing surface
    fn renderer_info(&self, draw: DrawHandle) -> RendererInfo;

    /// Set the color used by subsequent clear and fill operations
    fn set_draw_color(&mut self, draw: DrawHandle, color: Color);

    /// Fill the whole drawing surface with the draw color
    fn clear(&mut self, draw: DrawHandle);

    /// Fill a rectangle with the draw color, clipped to the surface
    fn fill_rect(&mut self, draw: DrawHandle, rect: Rect);

    /// Make the drawing surface contents visible on the display surface
    fn present(&mut self, display: DisplayHandle);

    /// Remove and return the oldest pending input event, without blocking
    fn poll_event(&mut self) -> Option<NativeEvent>;

    /// Whether the windowing system flagged the display surface for closing
    fn should_close(&self, _display: DisplayHandle) -> bool {
        false
    }

    /// Monotonic milliseconds since the backend was initialized
    fn tick_count(&self) -> u32;

    /// Most recent diagnostic message, empty if none
    fn last_error(&self) -> String;
}
