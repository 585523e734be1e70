//! Shared backend subsystem
//!
//! A [`Platform`] owns one graphics backend and counts the sessions using it.
//! The backend is initialized when the first session opens its surfaces and
//! shut down when the last one closes them. Every session on a platform shares
//! its event queue and tick source.

use std::cell::RefCell;
use std::rc::Rc;

use log::debug;

use super::backend::{BackendError, DisplayHandle, DrawHandle, GraphicsBackend, SurfaceRequest};
use crate::render::types::RendererInfo;

struct PlatformState<B> {
    backend: B,
    live_sessions: usize,
}

/// Reference-counted handle to a graphics backend shared by sessions.
///
/// Cloning yields another handle to the same backend. `Platform` is neither
/// `Send` nor `Sync`: the backend belongs to the thread that created it.
pub struct Platform<B: GraphicsBackend> {
    inner: Rc<RefCell<PlatformState<B>>>,
}

impl<B: GraphicsBackend> Platform<B> {
    /// Wrap a backend. The backend is not initialized until a session needs it.
    pub fn new(backend: B) -> Self {
        Self {
            inner: Rc::new(RefCell::new(PlatformState {
                backend,
                live_sessions: 0,
            })),
        }
    }

    /// Number of sessions currently holding surfaces
    pub fn live_sessions(&self) -> usize {
        self.inner.borrow().live_sessions
    }

    /// Inspect the backend
    pub fn with_backend<R>(&self, f: impl FnOnce(&B) -> R) -> R {
        f(&self.inner.borrow().backend)
    }

    /// Mutate the backend
    pub fn with_backend_mut<R>(&self, f: impl FnOnce(&mut B) -> R) -> R {
        f(&mut self.inner.borrow_mut().backend)
    }

    /// Initialize the backend if needed, then allocate a surface pair.
    ///
    /// A failed allocation leaves the live-session count unchanged and shuts the
    /// backend down again if no other session is using it.
    pub(crate) fn open_surfaces(
        &self,
        request: &SurfaceRequest,
    ) -> Result<(DisplayHandle, DrawHandle, RendererInfo), BackendError> {
        let mut state = self.inner.borrow_mut();

        if state.live_sessions == 0 {
            state.backend.init()?;
            debug!("Graphics backend initialized");
        }

        match state.backend.create_surfaces(request) {
            Ok((display, draw)) => {
                state.live_sessions += 1;
                let info = state.backend.renderer_info(draw);
                Ok((display, draw, info))
            }
            Err(err) => {
                if state.live_sessions == 0 {
                    state.backend.shutdown();
                    debug!("Graphics backend shut down after failed surface creation");
                }
                Err(err)
            }
        }
    }

    /// Release a surface pair, shutting the backend down after the last one
    pub(crate) fn close_surfaces(&self, display: DisplayHandle, draw: DrawHandle) {
        let mut state = self.inner.borrow_mut();
        state.backend.destroy_surfaces(display, draw);
        state.live_sessions = state.live_sessions.saturating_sub(1);

        if state.live_sessions == 0 {
            state.backend.shutdown();
            debug!("Graphics backend shut down");
        }
    }
}

impl<B: GraphicsBackend> Clone for Platform<B> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<B: GraphicsBackend + Default> Default for Platform<B> {
    fn default() -> Self {
        Self::new(B::default())
    }
}
