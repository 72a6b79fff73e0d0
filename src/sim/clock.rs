//! Frame clock
//!
//! Turns wall-clock frame times into a clamped `dt`. All per-tick motion is
//! tuned for 60 fps and scaled by `dt * REFERENCE_FPS`.

use std::time::Instant;

use crate::consts::{MAX_DT, REFERENCE_FPS};

/// Clamp a raw frame time into `[0, MAX_DT]`. Non-finite input becomes 0.
#[inline]
pub fn clamp_dt(raw: f32) -> f32 {
    if raw.is_finite() {
        raw.clamp(0.0, MAX_DT)
    } else {
        0.0
    }
}

/// Normalize `dt` against the reference frame rate
#[inline]
pub fn dt_scaled(dt: f32) -> f32 {
    dt * REFERENCE_FPS
}

/// Measures the time between successive ticks
#[derive(Debug, Clone, Default)]
pub struct Stepper {
    last: Option<Instant>,
}

impl Stepper {
    pub fn new() -> Self {
        Self { last: None }
    }

    /// Seconds since the previous call, clamped. The first call returns 0.
    pub fn advance(&mut self, now: Instant) -> f32 {
        let dt = match self.last {
            Some(last) => clamp_dt(now.saturating_duration_since(last).as_secs_f32()),
            None => 0.0,
        };
        self.last = Some(now);
        dt
    }

    /// Forget the previous frame (e.g. after resuming from a pause)
    pub fn reset(&mut self) {
        self.last = None;
    }
}
