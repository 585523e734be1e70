//! Input event normalization
//!
//! Backends report [`NativeEvent`]s; sessions hand callers an [`EventKind`]
//! plus a kind-dependent [`EventPayload`], with keys reduced to a small fixed
//! set of [`KeySymbol`]s.

use std::fmt;

use crate::render::window::backend::{Keycode, NativeEvent};

/// Normalized key identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeySymbol {
    /// Escape
    Quit,
    /// W key
    W,
    /// A key
    A,
    /// S key
    S,
    /// D key
    D,
    /// Up arrow
    Up,
    /// Down arrow
    Down,
    /// Left arrow
    Left,
    /// Right arrow
    Right,
    /// Space bar
    Space,
    /// Any key outside the set above
    Unsupported,
}

impl KeySymbol {
    /// Map a native key code; unknown codes become [`KeySymbol::Unsupported`]
    pub const fn from_keycode(code: Keycode) -> Self {
        match code {
            Keycode::ESCAPE => Self::Quit,
            Keycode::W => Self::W,
            Keycode::A => Self::A,
            Keycode::S => Self::S,
            Keycode::D => Self::D,
            Keycode::UP => Self::Up,
            Keycode::DOWN => Self::Down,
            Keycode::LEFT => Self::Left,
            Keycode::RIGHT => Self::Right,
            Keycode::SPACE => Self::Space,
            _ => Self::Unsupported,
        }
    }

    /// Name handed to host bindings
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Quit => "quit",
            Self::W => "w",
            Self::A => "a",
            Self::S => "s",
            Self::D => "d",
            Self::Up => "up",
            Self::Down => "down",
            Self::Left => "left",
            Self::Right => "right",
            Self::Space => "space",
            Self::Unsupported => "unsupported",
        }
    }
}

impl fmt::Display for KeySymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of event returned by `poll_event`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Key pressed
    KeyDown,
    /// Key released
    KeyUp,
    /// Cursor moved
    MouseMove,
    /// Mouse button pressed
    MouseClickDown,
    /// Mouse button released
    MouseClickUp,
    /// An event the session does not translate
    Unsupported,
    /// Nothing was pending
    NoEvent,
}

impl EventKind {
    /// Name handed to host bindings
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::KeyDown => "key_down",
            Self::KeyUp => "key_up",
            Self::MouseMove => "mouse_move",
            Self::MouseClickDown => "mouse_click_down",
            Self::MouseClickUp => "mouse_click_up",
            Self::Unsupported => "unsupported",
            Self::NoEvent => "no_event",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind-dependent event data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventPayload {
    /// No data (clicks, unsupported events, no event)
    Empty,
    /// Key events
    Key(KeySymbol),
    /// Cursor location for mouse motion
    Location {
        /// Cursor x
        x: i32,
        /// Cursor y
        y: i32,
    },
}

impl EventPayload {
    /// Key symbol, if this is a key payload
    pub const fn key(&self) -> Option<KeySymbol> {
        match self {
            Self::Key(symbol) => Some(*symbol),
            _ => None,
        }
    }

    /// Cursor location, if this is a motion payload
    pub const fn location(&self) -> Option<(i32, i32)> {
        match self {
            Self::Location { x, y } => Some((*x, *y)),
            _ => None,
        }
    }
}

/// Event pair for an empty queue
pub const NO_EVENT: (EventKind, EventPayload) = (EventKind::NoEvent, EventPayload::Empty);

/// Normalize a backend event
pub const fn translate(event: NativeEvent) -> (EventKind, EventPayload) {
    match event {
        NativeEvent::KeyDown(code) => (EventKind::KeyDown, EventPayload::Key(KeySymbol::from_keycode(code))),
        NativeEvent::KeyUp(code) => (EventKind::KeyUp, EventPayload::Key(KeySymbol::from_keycode(code))),
        NativeEvent::MouseMotion { x, y } => (EventKind::MouseMove, EventPayload::Location { x, y }),
        NativeEvent::MouseButtonDown(_) => (EventKind::MouseClickDown, EventPayload::Empty),
        NativeEvent::MouseButtonUp(_) => (EventKind::MouseClickUp, EventPayload::Empty),
        NativeEvent::CloseRequested | NativeEvent::Other => (EventKind::Unsupported, EventPayload::Empty),
    }
}
