//! Session scenarios run against the headless backend

mod drawing;
mod lifecycle;

use super::Platform;
use crate::render::backends::HeadlessBackend;
use crate::WindowSession;

fn headless() -> Platform<HeadlessBackend> {
    Platform::new(HeadlessBackend::new())
}

fn open(platform: &Platform<HeadlessBackend>) -> WindowSession<HeadlessBackend> {
    WindowSession::new(platform, 800, 600).unwrap()
}
