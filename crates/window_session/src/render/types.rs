//! Drawing value types shared by sessions and backends

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::render::window::{SessionError, SessionResult};

/// RGBA color with 8-bit channels
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Color {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
    /// Alpha channel
    pub a: u8,
}

impl Color {
    /// Opaque black, the initial background of every session
    pub const BLACK: Self = Self::rgba(0, 0, 0, 255);
    /// Opaque white
    pub const WHITE: Self = Self::rgba(255, 255, 255, 255);

    /// Create a color from four channels
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque color
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    /// Build a color from untyped integer channels, as a host binding receives them.
    ///
    /// Every channel must lie in `0..=255`; out-of-range values are rejected,
    /// never clamped.
    pub fn from_channels(r: i64, g: i64, b: i64, a: i64) -> SessionResult<Self> {
        Ok(Self::rgba(channel("r", r)?, channel("g", g)?, channel("b", b)?, channel("a", a)?))
    }

    /// Channels normalized to `0.0..=1.0`, for APIs that take float colors
    pub fn to_f32(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a].map(|c| f32::from(c) / 255.0)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl From<[u8; 4]> for Color {
    fn from([r, g, b, a]: [u8; 4]) -> Self {
        Self::rgba(r, g, b, a)
    }
}

fn channel(name: &str, value: i64) -> SessionResult<u8> {
    u8::try_from(value).map_err(|_| {
        SessionError::InvalidArgument(format!("color channel {name}={value} is outside 0..=255"))
    })
}

/// Axis-aligned rectangle in surface pixels.
///
/// The origin may lie anywhere, including off-surface; only the size is
/// validated, and backends clip against their surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rect {
    /// Left edge
    pub x: i32,
    /// Top edge
    pub y: i32,
    /// Width in pixels
    pub w: i32,
    /// Height in pixels
    pub h: i32,
}

impl Rect {
    /// Create a rectangle
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Reject non-positive sizes
    pub fn validate(&self) -> SessionResult<()> {
        if self.w <= 0 || self.h <= 0 {
            return Err(SessionError::InvalidArgument(format!(
                "rectangle size must be positive, got {}x{}",
                self.w, self.h
            )));
        }
        Ok(())
    }

    /// Intersect with a `width` x `height` surface anchored at the origin.
    ///
    /// Returns `(x0, y0, x1, y1)` with exclusive upper bounds, or `None` when
    /// nothing of the rectangle lands on the surface.
    pub fn clip_to(&self, width: u32, height: u32) -> Option<(u32, u32, u32, u32)> {
        let x0 = i64::from(self.x).max(0);
        let y0 = i64::from(self.y).max(0);
        let x1 = (i64::from(self.x) + i64::from(self.w)).min(i64::from(width));
        let y1 = (i64::from(self.y) + i64::from(self.h)).min(i64::from(height));

        if x0 >= x1 || y0 >= y1 {
            return None;
        }

        // All four values are within 0..=u32::MAX after clamping against the surface.
        let to_u32 = |v: i64| u32::try_from(v).unwrap_or(u32::MAX);
        Some((to_u32(x0), to_u32(y0), to_u32(x1), to_u32(y1)))
    }
}

bitflags! {
    /// Capabilities reported by a backend's renderer
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct RendererFlags: u32 {
        /// Software fallback renderer
        const SOFTWARE = 1 << 0;
        /// Hardware accelerated
        const ACCELERATED = 1 << 1;
        /// Present is synchronized with the display refresh
        const PRESENT_VSYNC = 1 << 2;
        /// Supports rendering to textures
        const TARGET_TEXTURE = 1 << 3;
    }
}

/// Renderer/driver metadata recorded at session construction for diagnostics
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RendererInfo {
    /// Renderer name as reported by the driver
    pub name: String,
    /// Driver or API version string
    pub version: String,
    /// Renderer capabilities
    pub flags: RendererFlags,
    /// Largest texture dimension supported, 0 when unknown
    pub max_texture_size: u32,
}
