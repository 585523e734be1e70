//! Interactive window session demo
//!
//! Moves a square with WASD or the arrow keys, space picks a new random
//! background, escape or closing the window quits.
//!
//! Usage: `session_demo [config.toml|config.ron]`

use std::time::Duration;

use log::{error, info};
use rand::prelude::*;
use thiserror::Error;
use window_session::foundation::logging;
use window_session::prelude::*;

const FRAMES_PER_SECOND: u32 = 60;
const SQUARE_SIZE: i32 = 40;
const STEP: i32 = 8;

#[derive(Error, Debug)]
enum DemoError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Session(#[from] SessionError),
}

struct Square {
    x: i32,
    y: i32,
}

impl Square {
    fn step(&mut self, key: KeySymbol, width: i32, height: i32) {
        match key {
            KeySymbol::W | KeySymbol::Up => self.y -= STEP,
            KeySymbol::S | KeySymbol::Down => self.y += STEP,
            KeySymbol::A | KeySymbol::Left => self.x -= STEP,
            KeySymbol::D | KeySymbol::Right => self.x += STEP,
            _ => return,
        }
        // Let the square leave the window by at most half its size.
        self.x = self.x.clamp(-SQUARE_SIZE / 2, width - SQUARE_SIZE / 2);
        self.y = self.y.clamp(-SQUARE_SIZE / 2, height - SQUARE_SIZE / 2);
    }
}

fn load_config() -> Result<ApplicationConfig, ConfigError> {
    let config = match std::env::args().nth(1) {
        Some(path) => ApplicationConfig::load_from_file(path)?,
        None => ApplicationConfig::default(),
    };
    config.validate()?;
    Ok(config)
}

fn run(config: &ApplicationConfig) -> Result<(), DemoError> {
    let mut session = WindowSession::open_with_config(&config.session)?;
    let (width, height) = (config.session.width, config.session.height);
    let mut square = Square {
        x: width / 2 - SQUARE_SIZE / 2,
        y: height / 2 - SQUARE_SIZE / 2,
    };
    let mut rng = thread_rng();
    let mut frames: u64 = 0;

    info!("Running at up to {} frames per second", FRAMES_PER_SECOND);

    'running: loop {
        loop {
            match session.poll_event()? {
                (EventKind::NoEvent, _) => break,
                (EventKind::KeyDown, EventPayload::Key(KeySymbol::Quit)) => break 'running,
                (EventKind::KeyDown, EventPayload::Key(KeySymbol::Space)) => {
                    session.clear(Some(Color::rgb(rng.gen(), rng.gen(), rng.gen())))?;
                }
                (EventKind::KeyDown, EventPayload::Key(key)) => square.step(key, width, height),
                _ => {}
            }
        }

        if session.close_requested()? {
            break;
        }

        if session.per_second(FRAMES_PER_SECOND)? {
            session.clear(None)?;
            session.set_draw_color(Color::WHITE)?;
            session.fill_rect(Rect::new(square.x, square.y, SQUARE_SIZE, SQUARE_SIZE))?;
            session.present()?;
            frames += 1;
        }

        std::thread::sleep(Duration::from_millis(1));
    }

    info!("Quit after {} frames", frames);
    session.destroy();
    Ok(())
}

fn main() {
    let config = match load_config() {
        Ok(config) => config,
        Err(err) => {
            logging::init();
            error!("Failed to load configuration: {}", err);
            std::process::exit(1);
        }
    };

    logging::init_with_config(&config.logging);

    if let Err(err) = run(&config) {
        error!("{}", err);
        std::process::exit(1);
    }
}
