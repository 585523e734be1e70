//! Window session handle
//!
//! A [`WindowSession`] exclusively owns one display surface and one drawing
//! surface from a graphics backend, plus the background color and the tick
//! at which its frame gate last opened.
//!
//! # Lifecycle
//!
//! ```text
//! new / with_config ──► Live ──► destroy / drop ──► Destroyed
//! ```
//!
//! Every operation except [`WindowSession::destroy`] fails with
//! [`SessionError::SessionDestroyed`] once the session is destroyed.
//! `destroy` itself is idempotent, and dropping the session runs the same
//! teardown, so surfaces are released exactly once.
//!
//! # Background color
//!
//! [`WindowSession::clear`] keeps a background color: `clear(None)` fills with
//! it and `clear(Some(color))` replaces it before filling.
//! [`WindowSession::set_draw_color`] changes only the color used by the next
//! fills and leaves the stored background alone.

use log::{debug, info, trace, warn};
use thiserror::Error;

use super::backend::{BackendError, DisplayHandle, DrawHandle, GraphicsBackend, NativeEvent, SurfaceRequest};
use super::platform::Platform;
use crate::core::config::SessionConfig;
use crate::foundation::time::RateGate;
use crate::input::{self, EventKind, EventPayload};
use crate::render::backends::GlfwBackend;
use crate::render::types::{Color, Rect, RendererInfo};

/// Window session errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// The backend could not be initialized or could not allocate surfaces
    #[error("backend initialization failed: {0}")]
    BackendInit(String),

    /// The session was already torn down
    #[error("window session has been destroyed")]
    SessionDestroyed,

    /// An argument was outside its allowed range
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl From<BackendError> for SessionError {
    fn from(err: BackendError) -> Self {
        Self::BackendInit(err.message().to_string())
    }
}

/// Result alias for session operations
pub type SessionResult<T> = Result<T, SessionError>;

/// Lifecycle state of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Surfaces are allocated and usable
    Live,
    /// Surfaces were released; terminal
    Destroyed,
}

#[derive(Debug, Clone, Copy)]
struct Surfaces {
    display: DisplayHandle,
    draw: DrawHandle,
}

/// Handle binding a display surface, a drawing surface, and timing state
pub struct WindowSession<B: GraphicsBackend = GlfwBackend> {
    platform: Platform<B>,
    surfaces: Option<Surfaces>,
    width: u32,
    height: u32,
    background: Color,
    gate: RateGate,
    close_requested: bool,
    renderer_info: RendererInfo,
}

impl WindowSession<GlfwBackend> {
    /// Open a GLFW window of the given size on this thread's shared platform
    pub fn open(width: i32, height: i32) -> SessionResult<Self> {
        Self::new(&GlfwBackend::shared_platform(), width, height)
    }

    /// Open a GLFW window from configuration on this thread's shared platform
    pub fn open_with_config(config: &SessionConfig) -> SessionResult<Self> {
        Self::with_config(&GlfwBackend::shared_platform(), config)
    }
}

impl<B: GraphicsBackend> WindowSession<B> {
    /// Create a session with default options and the given size.
    ///
    /// # Errors
    /// [`SessionError::InvalidArgument`] if either dimension is not positive,
    /// [`SessionError::BackendInit`] with the backend's message if the surfaces
    /// cannot be allocated.
    pub fn new(platform: &Platform<B>, width: i32, height: i32) -> SessionResult<Self> {
        Self::with_config(platform, &SessionConfig::new(width, height))
    }

    /// Create a session from configuration
    pub fn with_config(platform: &Platform<B>, config: &SessionConfig) -> SessionResult<Self> {
        config.validate().map_err(SessionError::InvalidArgument)?;
        let width = positive_dimension("width", config.width)?;
        let height = positive_dimension("height", config.height)?;

        let request = SurfaceRequest {
            width,
            height,
            title: config.title.clone(),
            vsync: config.vsync,
            resizable: config.resizable,
        };

        let (display, draw, renderer_info) = platform.open_surfaces(&request).map_err(|err| {
            let message = if err.message().is_empty() {
                platform.with_backend(GraphicsBackend::last_error)
            } else {
                err.message().to_string()
            };
            warn!("Failed to create {}x{} window session: {}", width, height, message);
            SessionError::BackendInit(message)
        })?;

        info!(
            "Created {}x{} window session (renderer: {} {}, flags: {:?})",
            width, height, renderer_info.name, renderer_info.version, renderer_info.flags
        );

        Ok(Self {
            platform: platform.clone(),
            surfaces: Some(Surfaces { display, draw }),
            width,
            height,
            background: config.background,
            gate: RateGate::new(),
            close_requested: false,
            renderer_info,
        })
    }

    /// Clear the drawing surface.
    ///
    /// `None` clears with the stored background; `Some(color)` stores `color`
    /// as the new background first.
    pub fn clear(&mut self, color: Option<Color>) -> SessionResult<()> {
        let surfaces = self.live()?;
        if let Some(color) = color {
            self.background = color;
        }

        let background = self.background;
        self.platform.with_backend_mut(|backend| {
            backend.set_draw_color(surfaces.draw, background);
            backend.clear(surfaces.draw);
        });
        Ok(())
    }

    /// Set the color for subsequent fills without clearing
    pub fn set_draw_color(&mut self, color: Color) -> SessionResult<()> {
        let surfaces = self.live()?;
        self.platform
            .with_backend_mut(|backend| backend.set_draw_color(surfaces.draw, color));
        Ok(())
    }

    /// Fill a rectangle with the current draw color.
    ///
    /// The position is not validated; parts outside the surface are clipped by
    /// the backend. Width and height must be positive.
    pub fn fill_rect(&mut self, rect: Rect) -> SessionResult<()> {
        let surfaces = self.live()?;
        rect.validate()?;
        self.platform
            .with_backend_mut(|backend| backend.fill_rect(surfaces.draw, rect));
        Ok(())
    }

    /// Show everything drawn since the last present
    pub fn present(&mut self) -> SessionResult<()> {
        let surfaces = self.live()?;
        self.platform
            .with_backend_mut(|backend| backend.present(surfaces.display));
        Ok(())
    }

    /// Take the oldest pending input event without blocking.
    ///
    /// Returns `(EventKind::NoEvent, EventPayload::Empty)` when nothing is pending.
    pub fn poll_event(&mut self) -> SessionResult<(EventKind, EventPayload)> {
        self.live()?;
        let event = self.platform.with_backend_mut(GraphicsBackend::poll_event);

        let Some(native) = event else {
            return Ok(input::NO_EVENT);
        };

        if native == NativeEvent::CloseRequested {
            self.close_requested = true;
        }

        let translated = input::translate(native);
        trace!("Polled {:?} as {}", native, translated.0);
        Ok(translated)
    }

    /// Whether the user asked to close the window.
    ///
    /// Set once a close request has been polled (it still reaches the caller
    /// as [`EventKind::Unsupported`]) or when the windowing system flags the
    /// display surface for closing. Stays set for the rest of the session.
    pub fn close_requested(&self) -> SessionResult<bool> {
        let surfaces = self.live()?;
        Ok(self.close_requested
            || self
                .platform
                .with_backend(|backend| backend.should_close(surfaces.display)))
    }

    /// True at most `n` times per second.
    ///
    /// Opens when at least `1000 / n` milliseconds (integer division, never less
    /// than 1) have passed since it last opened, and records the current tick
    /// when it does.
    pub fn per_second(&mut self, n: u32) -> SessionResult<bool> {
        self.live()?;
        let period = RateGate::period_ms(n)
            .ok_or_else(|| SessionError::InvalidArgument("per_second rate must be positive".to_string()))?;

        let now = self.platform.with_backend(GraphicsBackend::tick_count);
        Ok(self.gate.try_open(now, period))
    }

    /// Most recent backend diagnostic, empty if none
    pub fn get_error(&self) -> SessionResult<String> {
        self.live()?;
        Ok(self.platform.with_backend(GraphicsBackend::last_error))
    }

    /// Release both surfaces. Calling it again does nothing.
    pub fn destroy(&mut self) {
        if let Some(surfaces) = self.surfaces.take() {
            self.platform.close_surfaces(surfaces.display, surfaces.draw);
            debug!("Destroyed {}x{} window session", self.width, self.height);
        }
    }

    /// Current lifecycle state
    pub const fn state(&self) -> SessionState {
        if self.surfaces.is_some() {
            SessionState::Live
        } else {
            SessionState::Destroyed
        }
    }

    /// Whether the session still owns its surfaces
    pub const fn is_alive(&self) -> bool {
        self.surfaces.is_some()
    }

    /// Width requested at construction
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Height requested at construction
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Background used by `clear(None)`
    pub const fn background(&self) -> Color {
        self.background
    }

    /// Tick at which `per_second` last returned true, 0 before that
    pub const fn last_time(&self) -> u32 {
        self.gate.last_time()
    }

    /// Renderer metadata recorded at construction
    pub const fn renderer_info(&self) -> &RendererInfo {
        &self.renderer_info
    }

    /// Platform this session draws through
    pub const fn platform(&self) -> &Platform<B> {
        &self.platform
    }

    fn live(&self) -> SessionResult<Surfaces> {
        self.surfaces.ok_or(SessionError::SessionDestroyed)
    }
}

impl<B: GraphicsBackend> Drop for WindowSession<B> {
    fn drop(&mut self) {
        self.destroy();
    }
}

fn positive_dimension(name: &str, value: i32) -> SessionResult<u32> {
    u32::try_from(value)
        .ok()
        .filter(|&v| v > 0)
        .ok_or_else(|| SessionError::InvalidArgument(format!("{name} must be positive, got {value}")))
}
