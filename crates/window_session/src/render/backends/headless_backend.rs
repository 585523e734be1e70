//! Headless software backend
//!
//! Surfaces are plain pixel buffers: drawing goes to a back buffer and
//! `present` copies it to the front buffer. Time only advances when the caller
//! moves the clock, and input is whatever the caller queues. This makes the
//! backend useful for offscreen rendering and for exercising sessions
//! deterministically.
//!
//! # Example
//!
//! ```
//! use window_session::prelude::*;
//! use window_session::render::window::{Keycode, NativeEvent};
//!
//! let platform = Platform::new(HeadlessBackend::new());
//! let mut session = WindowSession::new(&platform, 4, 4).unwrap();
//!
//! session.clear(Some(Color::rgb(0, 0, 255))).unwrap();
//! session.present().unwrap();
//!
//! platform.with_backend_mut(|b| b.push_event(NativeEvent::KeyDown(Keycode::SPACE)));
//! let (kind, payload) = session.poll_event().unwrap();
//! assert_eq!(kind, EventKind::KeyDown);
//! assert_eq!(payload, EventPayload::Key(KeySymbol::Space));
//! ```

use std::collections::{HashMap, VecDeque};

use log::{debug, trace};

use crate::render::types::{Color, Rect, RendererFlags, RendererInfo};
use crate::render::window::backend::{
    BackendError, DisplayHandle, DrawHandle, GraphicsBackend, NativeEvent, SurfaceRequest,
};

/// Largest surface dimension the headless backend allocates
pub const MAX_SURFACE_DIMENSION: u32 = 16384;

/// One software surface pair
#[derive(Debug, Clone)]
pub struct HeadlessSurface {
    width: u32,
    height: u32,
    title: String,
    draw_color: Color,
    back: Vec<Color>,
    front: Vec<Color>,
    present_count: u64,
}

impl HeadlessSurface {
    fn new(request: &SurfaceRequest) -> Self {
        let len = request.width as usize * request.height as usize;
        Self {
            width: request.width,
            height: request.height,
            title: request.title.clone(),
            draw_color: Color::BLACK,
            back: vec![Color::rgba(0, 0, 0, 0); len],
            front: vec![Color::rgba(0, 0, 0, 0); len],
            present_count: 0,
        }
    }

    /// Surface size in pixels
    pub const fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Title the surface was created with
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Current draw color
    pub const fn draw_color(&self) -> Color {
        self.draw_color
    }

    /// Pixel in the drawing surface, `None` outside the surface
    pub fn back_pixel(&self, x: u32, y: u32) -> Option<Color> {
        self.index(x, y).map(|i| self.back[i])
    }

    /// Pixel on the display surface, as of the last present
    pub fn front_pixel(&self, x: u32, y: u32) -> Option<Color> {
        self.index(x, y).map(|i| self.front[i])
    }

    /// Displayed pixels as tightly packed RGBA bytes, row-major
    pub fn front_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.front)
    }

    /// Number of presents so far
    pub const fn present_count(&self) -> u64 {
        self.present_count
    }

    fn index(&self, x: u32, y: u32) -> Option<usize> {
        (x < self.width && y < self.height).then(|| y as usize * self.width as usize + x as usize)
    }

    fn fill(&mut self, rect: Rect) {
        let Some((x0, y0, x1, y1)) = rect.clip_to(self.width, self.height) else {
            trace!("Rectangle {:?} lies entirely outside {}x{} surface", rect, self.width, self.height);
            return;
        };

        let stride = self.width as usize;
        for y in y0 as usize..y1 as usize {
            self.back[y * stride + x0 as usize..y * stride + x1 as usize].fill(self.draw_color);
        }
    }
}

/// Software backend with a manual clock and an injectable event queue
#[derive(Debug, Default)]
pub struct HeadlessBackend {
    initialized: bool,
    init_count: u32,
    shutdown_count: u32,
    next_id: u32,
    surfaces: HashMap<u32, HeadlessSurface>,
    events: VecDeque<NativeEvent>,
    ticks: u32,
    last_error: String,
    pending_failure: Option<String>,
}

impl HeadlessBackend {
    /// Create an uninitialized backend with the clock at tick 0
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an input event for `poll_event`
    pub fn push_event(&mut self, event: NativeEvent) {
        self.events.push_back(event);
    }

    /// Number of queued events
    pub fn pending_events(&self) -> usize {
        self.events.len()
    }

    /// Set the tick count
    pub fn set_ticks(&mut self, ticks: u32) {
        self.ticks = ticks;
    }

    /// Move the clock forward, wrapping like a 32-bit millisecond counter
    pub fn advance_ticks(&mut self, millis: u32) {
        self.ticks = self.ticks.wrapping_add(millis);
    }

    /// Make the next surface allocation fail with `message`, as a backend
    /// without a display would
    pub fn fail_next_create(&mut self, message: impl Into<String>) {
        self.pending_failure = Some(message.into());
    }

    /// Number of allocated surface pairs
    pub fn live_surfaces(&self) -> usize {
        self.surfaces.len()
    }

    /// Whether `init` ran without a matching `shutdown`
    pub const fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// How many times the backend was brought up
    pub const fn init_count(&self) -> u32 {
        self.init_count
    }

    /// How many times the backend was shut down
    pub const fn shutdown_count(&self) -> u32 {
        self.shutdown_count
    }

    /// Surface pair behind a drawing handle
    pub fn surface(&self, draw: DrawHandle) -> Option<&HeadlessSurface> {
        self.surfaces.get(&draw.id())
    }

    fn fail(&mut self, message: String) -> BackendError {
        self.last_error.clone_from(&message);
        BackendError::new(message)
    }
}

impl GraphicsBackend for HeadlessBackend {
    fn init(&mut self) -> Result<(), BackendError> {
        if !self.initialized {
            self.initialized = true;
            self.init_count += 1;
            debug!("Headless backend initialized");
        }
        Ok(())
    }

    fn shutdown(&mut self) {
        if self.initialized {
            self.surfaces.clear();
            self.events.clear();
            self.initialized = false;
            self.shutdown_count += 1;
            debug!("Headless backend shut down");
        }
    }

    fn create_surfaces(&mut self, request: &SurfaceRequest) -> Result<(DisplayHandle, DrawHandle), BackendError> {
        if !self.initialized {
            return Err(self.fail("headless backend is not initialized".to_string()));
        }

        if let Some(message) = self.pending_failure.take() {
            return Err(self.fail(message));
        }

        if request.width == 0
            || request.height == 0
            || request.width > MAX_SURFACE_DIMENSION
            || request.height > MAX_SURFACE_DIMENSION
        {
            return Err(self.fail(format!(
                "cannot allocate {}x{} surface (limit {MAX_SURFACE_DIMENSION})",
                request.width, request.height
            )));
        }

        self.next_id += 1;
        let id = self.next_id;
        self.surfaces.insert(id, HeadlessSurface::new(request));
        Ok((DisplayHandle::new(id), DrawHandle::new(id)))
    }

    fn destroy_surfaces(&mut self, display: DisplayHandle, draw: DrawHandle) {
        debug_assert_eq!(display.id(), draw.id());
        self.surfaces.remove(&draw.id());
    }

    fn renderer_info(&self, _draw: DrawHandle) -> RendererInfo {
        RendererInfo {
            name: "headless".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            flags: RendererFlags::SOFTWARE | RendererFlags::TARGET_TEXTURE,
            max_texture_size: MAX_SURFACE_DIMENSION,
        }
    }

    fn set_draw_color(&mut self, draw: DrawHandle, color: Color) {
        if let Some(surface) = self.surfaces.get_mut(&draw.id()) {
            surface.draw_color = color;
        }
    }

    fn clear(&mut self, draw: DrawHandle) {
        if let Some(surface) = self.surfaces.get_mut(&draw.id()) {
            let color = surface.draw_color;
            surface.back.fill(color);
        }
    }

    fn fill_rect(&mut self, draw: DrawHandle, rect: Rect) {
        if let Some(surface) = self.surfaces.get_mut(&draw.id()) {
            surface.fill(rect);
        }
    }

    fn present(&mut self, display: DisplayHandle) {
        if let Some(surface) = self.surfaces.get_mut(&display.id()) {
            surface.front.copy_from_slice(&surface.back);
            surface.present_count += 1;
        }
    }

    fn poll_event(&mut self) -> Option<NativeEvent> {
        self.events.pop_front()
    }

    fn tick_count(&self) -> u32 {
        self.ticks
    }

    fn last_error(&self) -> String {
        self.last_error.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(width: u32, height: u32) -> SurfaceRequest {
        SurfaceRequest {
            width,
            height,
            title: "test".to_string(),
            vsync: false,
            resizable: false,
        }
    }

    #[test]
    fn test_create_requires_init() {
        let mut backend = HeadlessBackend::new();
        assert!(backend.create_surfaces(&request(4, 4)).is_err());
        assert!(!backend.last_error().is_empty());

        backend.init().unwrap();
        assert!(backend.create_surfaces(&request(4, 4)).is_ok());
        assert_eq!(backend.live_surfaces(), 1);
    }

    #[test]
    fn test_fill_rect_clips_to_surface() {
        let mut backend = HeadlessBackend::new();
        backend.init().unwrap();
        let (_, draw) = backend.create_surfaces(&request(4, 4)).unwrap();

        backend.set_draw_color(draw, Color::WHITE);
        backend.fill_rect(draw, Rect::new(-2, -2, 4, 4));

        let surface = backend.surface(draw).unwrap();
        assert_eq!(surface.back_pixel(0, 0), Some(Color::WHITE));
        assert_eq!(surface.back_pixel(1, 1), Some(Color::WHITE));
        assert_eq!(surface.back_pixel(2, 2), Some(Color::rgba(0, 0, 0, 0)));
        assert_eq!(surface.back_pixel(4, 0), None);
    }

    #[test]
    fn test_present_copies_back_to_front() {
        let mut backend = HeadlessBackend::new();
        backend.init().unwrap();
        let (display, draw) = backend.create_surfaces(&request(2, 1)).unwrap();

        backend.set_draw_color(draw, Color::rgba(1, 2, 3, 4));
        backend.clear(draw);
        assert_eq!(backend.surface(draw).unwrap().front_pixel(0, 0), Some(Color::rgba(0, 0, 0, 0)));

        backend.present(display);
        let surface = backend.surface(draw).unwrap();
        assert_eq!(surface.front_bytes(), &[1, 2, 3, 4, 1, 2, 3, 4]);
        assert_eq!(surface.present_count(), 1);
    }

    #[test]
    fn test_oversized_surface_fails() {
        let mut backend = HeadlessBackend::new();
        backend.init().unwrap();
        let err = backend
            .create_surfaces(&request(MAX_SURFACE_DIMENSION + 1, 1))
            .unwrap_err();
        assert_eq!(backend.last_error(), err.message());
    }

    #[test]
    fn test_shutdown_releases_everything() {
        let mut backend = HeadlessBackend::new();
        backend.init().unwrap();
        backend.create_surfaces(&request(1, 1)).unwrap();
        backend.push_event(NativeEvent::Other);

        backend.shutdown();
        backend.shutdown();
        assert_eq!(backend.live_surfaces(), 0);
        assert_eq!(backend.pending_events(), 0);
        assert_eq!(backend.shutdown_count(), 1);
    }
}
