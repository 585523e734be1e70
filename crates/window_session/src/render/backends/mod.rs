//! Graphics backend implementations

pub mod glfw_backend;
pub mod headless_backend;

pub use glfw_backend::GlfwBackend;
pub use headless_backend::{HeadlessBackend, HeadlessSurface};
