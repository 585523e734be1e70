use super::headless;
use crate::render::backends::HeadlessBackend;
use crate::render::types::{Color, Rect};
use crate::render::window::{DrawHandle, Platform, SessionError};
use crate::WindowSession;

const RED: Color = Color::rgb(255, 0, 0);
const BLUE: Color = Color::rgb(0, 0, 255);

fn small(platform: &Platform<HeadlessBackend>) -> WindowSession<HeadlessBackend> {
    WindowSession::new(platform, 8, 8).unwrap()
}

fn front_pixel(platform: &Platform<HeadlessBackend>, x: u32, y: u32) -> Option<Color> {
    platform.with_backend(|backend| backend.surface(DrawHandle::new(1)).and_then(|s| s.front_pixel(x, y)))
}

#[test]
fn test_clear_without_color_uses_background() {
    let platform = headless();
    let mut session = small(&platform);

    session.clear(None).unwrap();
    session.present().unwrap();
    assert_eq!(front_pixel(&platform, 3, 3), Some(Color::BLACK));
}

#[test]
fn test_clear_with_color_updates_background() {
    let platform = headless();
    let mut session = small(&platform);

    session.clear(Some(BLUE)).unwrap();
    assert_eq!(session.background(), BLUE);

    session.set_draw_color(RED).unwrap();
    session.fill_rect(Rect::new(0, 0, 8, 8)).unwrap();

    // Stored background wins over the draw color set in between.
    session.clear(None).unwrap();
    session.present().unwrap();
    assert_eq!(front_pixel(&platform, 0, 0), Some(BLUE));
}

#[test]
fn test_set_draw_color_leaves_background() {
    let platform = headless();
    let mut session = small(&platform);

    session.set_draw_color(RED).unwrap();
    assert_eq!(session.background(), Color::BLACK);
}

#[test]
fn test_fill_rect_uses_draw_color() {
    let platform = headless();
    let mut session = small(&platform);

    session.clear(None).unwrap();
    session.set_draw_color(RED).unwrap();
    session.fill_rect(Rect::new(2, 2, 2, 2)).unwrap();
    session.present().unwrap();

    assert_eq!(front_pixel(&platform, 2, 2), Some(RED));
    assert_eq!(front_pixel(&platform, 3, 3), Some(RED));
    assert_eq!(front_pixel(&platform, 4, 4), Some(Color::BLACK));
    assert_eq!(front_pixel(&platform, 1, 2), Some(Color::BLACK));
}

#[test]
fn test_draws_invisible_until_present() {
    let platform = headless();
    let mut session = small(&platform);

    session.clear(Some(RED)).unwrap();
    assert_ne!(front_pixel(&platform, 0, 0), Some(RED));

    session.present().unwrap();
    assert_eq!(front_pixel(&platform, 0, 0), Some(RED));
}

#[test]
fn test_fill_rect_outside_bounds_is_fine() {
    let platform = headless();
    let mut session = small(&platform);

    session.clear(None).unwrap();
    session.set_draw_color(RED).unwrap();
    session.fill_rect(Rect::new(100, 100, 10, 10)).unwrap();
    session.fill_rect(Rect::new(-50, -50, 10, 10)).unwrap();
    session.fill_rect(Rect::new(-4, 6, 6, 20)).unwrap();
    session.present().unwrap();

    assert_eq!(front_pixel(&platform, 0, 0), Some(Color::BLACK));
    assert_eq!(front_pixel(&platform, 1, 7), Some(RED));
    assert_eq!(front_pixel(&platform, 2, 7), Some(Color::BLACK));
}

#[test]
fn test_fill_rect_rejects_non_positive_size() {
    let platform = headless();
    let mut session = small(&platform);

    assert!(matches!(
        session.fill_rect(Rect::new(0, 0, 0, 4)),
        Err(SessionError::InvalidArgument(_))
    ));
    assert!(matches!(
        session.fill_rect(Rect::new(0, 0, 4, -4)),
        Err(SessionError::InvalidArgument(_))
    ));
}
