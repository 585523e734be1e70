use super::{headless, open};
use crate::core::config::SessionConfig;
use crate::render::types::{Color, Rect, RendererFlags};
use crate::render::window::{SessionError, SessionState};
use crate::WindowSession;

#[test]
fn test_construct_records_dimensions() {
    let platform = headless();
    let session = open(&platform);

    assert_eq!(session.state(), SessionState::Live);
    assert!(session.is_alive());
    assert_eq!(session.width(), 800);
    assert_eq!(session.height(), 600);
    assert_eq!(session.background(), Color::BLACK);
    assert_eq!(session.last_time(), 0);
    assert_eq!(session.renderer_info().name, "headless");
    assert!(session.renderer_info().flags.contains(RendererFlags::SOFTWARE));
}

#[test]
fn test_non_positive_dimensions_rejected() {
    let platform = headless();

    for (width, height) in [(0, 600), (800, -1), (-5, -5), (0, 0)] {
        let result = WindowSession::new(&platform, width, height);
        assert!(
            matches!(result, Err(SessionError::InvalidArgument(_))),
            "{width}x{height} should be rejected"
        );
    }

    // Rejected before the backend is touched.
    platform.with_backend(|backend| {
        assert_eq!(backend.init_count(), 0);
        assert_eq!(backend.live_surfaces(), 0);
    });
}

#[test]
fn test_backend_failure_carries_message() {
    let platform = headless();
    platform.with_backend_mut(|backend| backend.fail_next_create("no display available"));

    let err = WindowSession::new(&platform, 800, 600).err().unwrap();
    assert_eq!(err, SessionError::BackendInit("no display available".to_string()));
    assert!(err.to_string().contains("no display available"));

    platform.with_backend(|backend| {
        assert_eq!(backend.live_surfaces(), 0);
        assert!(!backend.is_initialized());
    });
    assert_eq!(platform.live_sessions(), 0);
}

#[test]
fn test_destroy_twice_is_noop() {
    let platform = headless();
    let baseline = platform.with_backend(|backend| backend.live_surfaces());

    let mut session = open(&platform);
    assert_eq!(platform.with_backend(|backend| backend.live_surfaces()), baseline + 1);

    session.destroy();
    assert_eq!(session.state(), SessionState::Destroyed);
    assert_eq!(platform.with_backend(|backend| backend.live_surfaces()), baseline);

    session.destroy();
    assert_eq!(platform.with_backend(|backend| backend.live_surfaces()), baseline);
    platform.with_backend(|backend| assert_eq!(backend.shutdown_count(), 1));

    drop(session);
    platform.with_backend(|backend| {
        assert_eq!(backend.live_surfaces(), baseline);
        assert_eq!(backend.shutdown_count(), 1);
    });
}

#[test]
fn test_drop_releases_surfaces() {
    let platform = headless();
    {
        let _session = open(&platform);
        assert_eq!(platform.live_sessions(), 1);
    }
    assert_eq!(platform.live_sessions(), 0);
    platform.with_backend(|backend| {
        assert_eq!(backend.live_surfaces(), 0);
        assert!(!backend.is_initialized());
    });
}

#[test]
fn test_backend_shared_until_last_session() {
    let platform = headless();
    let mut first = open(&platform);
    let second = WindowSession::new(&platform, 320, 240).unwrap();

    platform.with_backend(|backend| {
        assert_eq!(backend.init_count(), 1);
        assert_eq!(backend.live_surfaces(), 2);
    });

    first.destroy();
    platform.with_backend(|backend| {
        assert!(backend.is_initialized());
        assert_eq!(backend.live_surfaces(), 1);
    });

    drop(second);
    platform.with_backend(|backend| {
        assert!(!backend.is_initialized());
        assert_eq!(backend.shutdown_count(), 1);
    });

    // A fresh session brings the backend back up.
    let _third = open(&platform);
    platform.with_backend(|backend| assert_eq!(backend.init_count(), 2));
}

#[test]
fn test_operations_after_destroy_fail() {
    let platform = headless();
    let mut session = open(&platform);
    session.destroy();

    assert_eq!(session.clear(None), Err(SessionError::SessionDestroyed));
    assert_eq!(session.set_draw_color(Color::WHITE), Err(SessionError::SessionDestroyed));
    assert_eq!(session.fill_rect(Rect::new(0, 0, 1, 1)), Err(SessionError::SessionDestroyed));
    assert_eq!(session.present(), Err(SessionError::SessionDestroyed));
    assert_eq!(session.poll_event(), Err(SessionError::SessionDestroyed));
    assert_eq!(session.per_second(60), Err(SessionError::SessionDestroyed));
    assert_eq!(session.get_error(), Err(SessionError::SessionDestroyed));
    assert_eq!(session.close_requested(), Err(SessionError::SessionDestroyed));
}

#[test]
fn test_with_config() {
    let platform = headless();
    let config = SessionConfig::new(64, 32)
        .with_title("Config Window")
        .with_background(Color::rgb(9, 8, 7));

    let session = WindowSession::with_config(&platform, &config).unwrap();
    assert_eq!((session.width(), session.height()), (64, 32));
    assert_eq!(session.background(), Color::rgb(9, 8, 7));

    // Headless surfaces share their id between the display and drawing handle.
    platform.with_backend(|backend| {
        let surface = backend
            .surface(crate::render::window::DrawHandle::new(1))
            .unwrap();
        assert_eq!(surface.title(), "Config Window");
        assert_eq!(surface.size(), (64, 32));
    });
}

#[test]
fn test_config_with_empty_title_rejected() {
    let platform = headless();
    let config = SessionConfig::new(64, 32).with_title("");

    let result = WindowSession::with_config(&platform, &config);
    assert!(matches!(result, Err(SessionError::InvalidArgument(_))));
    platform.with_backend(|backend| {
        assert_eq!(backend.init_count(), 0);
        assert_eq!(backend.live_surfaces(), 0);
    });
}

#[test]
fn test_get_error_reports_backend_message() {
    let platform = headless();
    let session = open(&platform);
    assert_eq!(session.get_error().unwrap(), "");

    platform.with_backend_mut(|backend| backend.fail_next_create("out of surfaces"));
    assert!(WindowSession::new(&platform, 10, 10).is_err());
    assert_eq!(session.get_error().unwrap(), "out of surfaces");
}
