//! Window session subsystem
//!
//! ```text
//! ┌─────────────────────────────────┐
//! │     Application / host binding  │
//! └─────────────┬───────────────────┘
//!               │ Uses
//!       ┌───────▼────────┐
//!       │ WindowSession  │ ← Public handle (handle.rs)
//!       └───────┬────────┘
//!               │ Shares
//!       ┌───────▼────────┐
//!       │ Platform       │ ← Backend + live-session count (platform.rs)
//!       └───────┬────────┘
//!               │ Drives
//!   ┌───────────▼───────────┐
//!   │ GraphicsBackend trait │ ← Capability interface (backend.rs)
//!   └───────────┬───────────┘
//!               │ Implemented by
//!   ┌───────────▼───────────┐
//!   │ GlfwBackend           │ ← GLFW window + OpenGL context
//!   │ HeadlessBackend       │ ← Software surfaces, manual clock
//!   └───────────────────────┘
//! ```

pub mod backend;
pub mod handle;
pub mod platform;

#[cfg(test)]
mod tests;

pub use backend::{BackendError, DisplayHandle, DrawHandle, GraphicsBackend, Keycode, NativeEvent, SurfaceRequest};
pub use handle::{SessionError, SessionResult, SessionState, WindowSession};
pub use platform::Platform;
