//! Tick-based rate gating

/// Milliseconds in one second of ticks
const MILLIS_PER_SECOND: u32 = 1000;

/// Edge-triggered gate that opens at most `n` times per second.
///
/// The gate compares a monotonic millisecond tick count against the tick at
/// which it last opened. The period is `1000 / n` with integer truncation, so
/// rates that do not divide 1000 run slightly fast. The period never drops
/// below one tick, so rates above 1000 are capped at one opening per
/// millisecond.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RateGate {
    last_time: u32,
}

impl RateGate {
    /// Create a gate whose last opening is tick 0
    pub const fn new() -> Self {
        Self { last_time: 0 }
    }

    /// Tick at which the gate last opened
    pub const fn last_time(&self) -> u32 {
        self.last_time
    }

    /// Period in milliseconds for a rate, at least 1, `None` for a zero rate
    pub const fn period_ms(per_second: u32) -> Option<u32> {
        if per_second == 0 {
            None
        } else {
            Some(max_u32(MILLIS_PER_SECOND / per_second, 1))
        }
    }

    /// Open the gate if at least `period_ms` ticks passed since it last opened.
    ///
    /// Tick wrap-around is handled with wrapping arithmetic.
    pub fn try_open(&mut self, now: u32, period_ms: u32) -> bool {
        if now.wrapping_sub(self.last_time) >= period_ms {
            self.last_time = now;
            true
        } else {
            false
        }
    }
}

const fn max_u32(a: u32, b: u32) -> u32 {
    if a > b {
        a
    } else {
        b
    }
}
