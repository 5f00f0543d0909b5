use std::f64::consts::TAU;
use std::time::{Duration, Instant};

use super::progress;

/// Horizontal oscillation whose envelope decays linearly to zero.
///
/// Amplitude 4 reads as a nudge, 10 as a violent shake.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Shake {
    amplitude: f64,
    duration: Duration,
    frequency: f64,
    started: Instant,
}

impl Shake {
    #[must_use]
    pub fn new(amplitude: u32, duration: Duration, frequency: f64, started: Instant) -> Self {
        Self {
            amplitude: f64::from(amplitude),
            duration,
            frequency,
            started,
        }
    }

    /// Horizontal displacement from the resting position at `now`.
    #[must_use]
    pub fn offset(&self, now: Instant) -> f64 {
        let p = progress(self.started, self.duration, now);
        if p >= 1.0 || self.amplitude == 0.0 {
            return 0.0;
        }
        let t = now.saturating_duration_since(self.started).as_secs_f64();
        self.amplitude * (1.0 - p) * (TAU * self.frequency * t).sin()
    }

    #[must_use]
    pub fn is_finished(&self, now: Instant) -> bool {
        progress(self.started, self.duration, now) >= 1.0
    }
}
