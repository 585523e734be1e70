//! GLFW backend with an OpenGL drawing surface
//!
//! Each surface pair is one GLFW window and its OpenGL context. Clears and
//! rectangle fills are `glClear` calls, the latter restricted by a scissor box,
//! and present swaps the window's buffers.

#![allow(unsafe_code)]

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::ffi::CStr;

use glfw::{Action, Context, WindowEvent};
use log::{debug, warn};

use crate::render::types::{Color, Rect, RendererFlags, RendererInfo};
use crate::render::window::backend::{
    BackendError, DisplayHandle, DrawHandle, GraphicsBackend, Keycode, NativeEvent, SurfaceRequest,
};
use crate::render::window::Platform;

thread_local! {
    static LAST_ERROR: RefCell<String> = const { RefCell::new(String::new()) };
    static SHARED_PLATFORM: Platform<GlfwBackend> = Platform::new(GlfwBackend::new());
}

fn record_error(error: glfw::Error, description: String) {
    warn!("GLFW error {:?}: {}", error, description);
    LAST_ERROR.with(|last| *last.borrow_mut() = description);
}

fn set_last_error(message: &str) {
    LAST_ERROR.with(|last| message.clone_into(&mut last.borrow_mut()));
}

struct GlfwSurface {
    window: glfw::PWindow,
    events: glfw::GlfwReceiver<(f64, WindowEvent)>,
    draw_color: Color,
    info: RendererInfo,
}

impl GlfwSurface {
    fn make_current(&mut self) {
        if !self.window.is_current() {
            self.window.make_current();
        }
    }

    /// Map a window-space rectangle to a bottom-left-origin framebuffer scissor box
    fn scissor_box(&self, rect: Rect) -> Option<(i32, i32, i32, i32)> {
        let (win_w, win_h) = self.window.get_size();
        let (fb_w, fb_h) = self.window.get_framebuffer_size();
        if win_w <= 0 || win_h <= 0 {
            return None;
        }

        let (x0, y0, x1, y1) = rect.clip_to(win_w.unsigned_abs(), win_h.unsigned_abs())?;
        let scale_x = f64::from(fb_w) / f64::from(win_w);
        let scale_y = f64::from(fb_h) / f64::from(win_h);
        let to_fb = |v: u32, scale: f64| (f64::from(v) * scale).round() as i32;

        let x = to_fb(x0, scale_x);
        let width = to_fb(x1, scale_x) - x;
        let height = to_fb(y1, scale_y) - to_fb(y0, scale_y);
        let y = fb_h - to_fb(y1, scale_y);
        Some((x, y, width, height))
    }
}

/// GLFW/OpenGL graphics backend
pub struct GlfwBackend {
    glfw: Option<glfw::Glfw>,
    surfaces: HashMap<u32, GlfwSurface>,
    pending: VecDeque<NativeEvent>,
    next_id: u32,
}

impl GlfwBackend {
    /// Create an uninitialized backend
    pub fn new() -> Self {
        Self {
            glfw: None,
            surfaces: HashMap::new(),
            pending: VecDeque::new(),
            next_id: 0,
        }
    }

    /// This thread's shared GLFW platform.
    ///
    /// GLFW is process-global and main-thread bound, so sessions opened with
    /// [`WindowSession::open`](crate::WindowSession::open) all share it.
    pub fn shared_platform() -> Platform<Self> {
        SHARED_PLATFORM.with(Platform::clone)
    }

    fn surface_mut(&mut self, id: u32) -> Option<&mut GlfwSurface> {
        let surface = self.surfaces.get_mut(&id);
        if surface.is_none() {
            warn!("GLFW backend has no surface {}", id);
        }
        surface
    }

    fn query_renderer_info(vsync: bool) -> RendererInfo {
        let name = gl_string(gl::RENDERER);
        let mut max_texture_size: gl::types::GLint = 0;
        unsafe { gl::GetIntegerv(gl::MAX_TEXTURE_SIZE, &mut max_texture_size) };

        let lower = name.to_lowercase();
        let mut flags = if lower.contains("llvmpipe") || lower.contains("software") || lower.contains("swrast") {
            RendererFlags::SOFTWARE
        } else {
            RendererFlags::ACCELERATED
        };
        if vsync {
            flags |= RendererFlags::PRESENT_VSYNC;
        }
        if gl::GenFramebuffers::is_loaded() {
            flags |= RendererFlags::TARGET_TEXTURE;
        }

        RendererInfo {
            name,
            version: gl_string(gl::VERSION),
            flags,
            max_texture_size: u32::try_from(max_texture_size).unwrap_or(0),
        }
    }
}

impl Default for GlfwBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphicsBackend for GlfwBackend {
    fn init(&mut self) -> Result<(), BackendError> {
        if self.glfw.is_none() {
            let glfw = glfw::init(record_error).map_err(|err| {
                let message = format!("GLFW initialization failed: {err:?}");
                set_last_error(&message);
                BackendError::new(message)
            })?;
            debug!("GLFW {} initialized", glfw::get_version_string());
            self.glfw = Some(glfw);
        }
        Ok(())
    }

    fn shutdown(&mut self) {
        self.surfaces.clear();
        self.pending.clear();
        // Dropping the last Glfw handle terminates the library.
        self.glfw = None;
    }

    fn create_surfaces(&mut self, request: &SurfaceRequest) -> Result<(DisplayHandle, DrawHandle), BackendError> {
        let Some(glfw) = self.glfw.as_mut() else {
            let message = "GLFW is not initialized";
            set_last_error(message);
            return Err(BackendError::new(message));
        };

        glfw.window_hint(glfw::WindowHint::ContextVersion(2, 1));
        glfw.window_hint(glfw::WindowHint::Resizable(request.resizable));
        glfw.window_hint(glfw::WindowHint::Visible(true));

        let (mut window, events) = glfw
            .create_window(request.width, request.height, &request.title, glfw::WindowMode::Windowed)
            .ok_or_else(|| {
                let mut message = LAST_ERROR.with(|last| last.borrow().clone());
                if message.is_empty() {
                    message = format!("failed to create {}x{} window", request.width, request.height);
                    set_last_error(&message);
                }
                BackendError::new(message)
            })?;

        window.make_current();
        gl::load_with(|symbol| window.get_proc_address(symbol) as *const _);
        glfw.set_swap_interval(if request.vsync {
            glfw::SwapInterval::Sync(1)
        } else {
            glfw::SwapInterval::None
        });

        window.set_key_polling(true);
        window.set_cursor_pos_polling(true);
        window.set_mouse_button_polling(true);
        window.set_close_polling(true);

        let info = Self::query_renderer_info(request.vsync);

        self.next_id += 1;
        let id = self.next_id;
        self.surfaces.insert(
            id,
            GlfwSurface {
                window,
                events,
                draw_color: Color::BLACK,
                info,
            },
        );

        Ok((DisplayHandle::new(id), DrawHandle::new(id)))
    }

    fn destroy_surfaces(&mut self, display: DisplayHandle, _draw: DrawHandle) {
        // Dropping the PWindow destroys the window and its context.
        if self.surfaces.remove(&display.id()).is_none() {
            warn!("GLFW backend asked to destroy unknown surface {}", display.id());
        }
    }

    fn renderer_info(&self, draw: DrawHandle) -> RendererInfo {
        self.surfaces
            .get(&draw.id())
            .map(|surface| surface.info.clone())
            .unwrap_or_default()
    }

    fn set_draw_color(&mut self, draw: DrawHandle, color: Color) {
        if let Some(surface) = self.surface_mut(draw.id()) {
            surface.draw_color = color;
        }
    }

    fn clear(&mut self, draw: DrawHandle) {
        if let Some(surface) = self.surface_mut(draw.id()) {
            surface.make_current();
            let [r, g, b, a] = surface.draw_color.to_f32();
            unsafe {
                gl::Disable(gl::SCISSOR_TEST);
                gl::ClearColor(r, g, b, a);
                gl::Clear(gl::COLOR_BUFFER_BIT);
            }
        }
    }

    fn fill_rect(&mut self, draw: DrawHandle, rect: Rect) {
        if let Some(surface) = self.surface_mut(draw.id()) {
            let Some((x, y, width, height)) = surface.scissor_box(rect) else {
                return;
            };

            surface.make_current();
            let [r, g, b, a] = surface.draw_color.to_f32();
            unsafe {
                gl::Enable(gl::SCISSOR_TEST);
                gl::Scissor(x, y, width, height);
                gl::ClearColor(r, g, b, a);
                gl::Clear(gl::COLOR_BUFFER_BIT);
                gl::Disable(gl::SCISSOR_TEST);
            }
        }
    }

    fn present(&mut self, display: DisplayHandle) {
        if let Some(surface) = self.surface_mut(display.id()) {
            surface.window.swap_buffers();
        }
    }

    fn poll_event(&mut self) -> Option<NativeEvent> {
        if self.pending.is_empty() {
            if let Some(glfw) = self.glfw.as_mut() {
                glfw.poll_events();
            }
            for surface in self.surfaces.values() {
                self.pending
                    .extend(glfw::flush_messages(&surface.events).map(|(_, event)| translate_event(event)));
            }
        }
        self.pending.pop_front()
    }

    fn should_close(&self, display: DisplayHandle) -> bool {
        self.surfaces
            .get(&display.id())
            .is_some_and(|surface| surface.window.should_close())
    }

    fn tick_count(&self) -> u32 {
        // GLFW time starts at 0 on init; truncation to u32 wraps like any 32-bit tick counter.
        self.glfw
            .as_ref()
            .map_or(0, |glfw| ((glfw.get_time() * 1000.0) as u64 & u64::from(u32::MAX)) as u32)
    }

    fn last_error(&self) -> String {
        LAST_ERROR.with(|last| last.borrow().clone())
    }
}

/// Convert a GLFW window event to a backend-neutral event
pub fn translate_event(event: WindowEvent) -> NativeEvent {
    match event {
        WindowEvent::Key(key, _, Action::Press | Action::Repeat, _) => NativeEvent::KeyDown(Keycode(key as i32)),
        WindowEvent::Key(key, _, Action::Release, _) => NativeEvent::KeyUp(Keycode(key as i32)),
        WindowEvent::CursorPos(x, y) => NativeEvent::MouseMotion {
            x: x.floor() as i32,
            y: y.floor() as i32,
        },
        WindowEvent::MouseButton(button, Action::Press, _) => NativeEvent::MouseButtonDown(button as u8),
        WindowEvent::MouseButton(button, Action::Release | Action::Repeat, _) => {
            NativeEvent::MouseButtonUp(button as u8)
        }
        WindowEvent::Close => NativeEvent::CloseRequested,
        _ => NativeEvent::Other,
    }
}

fn gl_string(name: gl::types::GLenum) -> String {
    let ptr = unsafe { gl::GetString(name) };
    if ptr.is_null() {
        return String::new();
    }
    unsafe { CStr::from_ptr(ptr.cast()) }.to_string_lossy().into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translate_keys() {
        let press = WindowEvent::Key(glfw::Key::W, 17, Action::Press, glfw::Modifiers::empty());
        assert_eq!(translate_event(press), NativeEvent::KeyDown(Keycode::W));

        let repeat = WindowEvent::Key(glfw::Key::Escape, 1, Action::Repeat, glfw::Modifiers::empty());
        assert_eq!(translate_event(repeat), NativeEvent::KeyDown(Keycode::ESCAPE));

        let release = WindowEvent::Key(glfw::Key::Up, 0, Action::Release, glfw::Modifiers::empty());
        assert_eq!(translate_event(release), NativeEvent::KeyUp(Keycode::UP));
    }

    #[test]
    fn test_keycode_constants_match_glfw() {
        assert_eq!(Keycode::SPACE.0, glfw::Key::Space as i32);
        assert_eq!(Keycode::A.0, glfw::Key::A as i32);
        assert_eq!(Keycode::D.0, glfw::Key::D as i32);
        assert_eq!(Keycode::S.0, glfw::Key::S as i32);
        assert_eq!(Keycode::W.0, glfw::Key::W as i32);
        assert_eq!(Keycode::ESCAPE.0, glfw::Key::Escape as i32);
        assert_eq!(Keycode::RIGHT.0, glfw::Key::Right as i32);
        assert_eq!(Keycode::LEFT.0, glfw::Key::Left as i32);
        assert_eq!(Keycode::DOWN.0, glfw::Key::Down as i32);
        assert_eq!(Keycode::UP.0, glfw::Key::Up as i32);
    }

    #[test]
    fn test_translate_mouse_and_window_events() {
        assert_eq!(
            translate_event(WindowEvent::CursorPos(10.7, -0.5)),
            NativeEvent::MouseMotion { x: 10, y: -1 }
        );
        assert_eq!(
            translate_event(WindowEvent::MouseButton(
                glfw::MouseButton::Button1,
                Action::Press,
                glfw::Modifiers::empty()
            )),
            NativeEvent::MouseButtonDown(0)
        );
        assert_eq!(translate_event(WindowEvent::Close), NativeEvent::CloseRequested);
        assert_eq!(translate_event(WindowEvent::Focus(true)), NativeEvent::Other);
    }
}
