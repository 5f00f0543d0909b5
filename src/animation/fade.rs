use std::time::{Duration, Instant};

use super::progress;

/// Linear opacity ramp used for entry and exit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Fade {
    from: f32,
    to: f32,
    started: Instant,
    duration: Duration,
}

impl Fade {
    #[must_use]
    pub const fn fade_in(started: Instant, duration: Duration) -> Self {
        Self {
            from: 0.0,
            to: 1.0,
            started,
            duration,
        }
    }

    /// Exit ramp starting from whatever opacity the popup currently has.
    #[must_use]
    pub const fn fade_out(from: f32, started: Instant, duration: Duration) -> Self {
        Self {
            from,
            to: 0.0,
            started,
            duration,
        }
    }

    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn opacity(&self, now: Instant) -> f32 {
        let p = progress(self.started, self.duration, now) as f32;
        (self.to - self.from).mul_add(p, self.from)
    }

    #[must_use]
    pub fn is_finished(&self, now: Instant) -> bool {
        progress(self.started, self.duration, now) >= 1.0
    }
}

#[cfg(test)]
mod tests {
    use super::Fade;
    use std::time::{Duration, Instant};

    #[test]
    fn fade_in_ramps_up() {
        let start = Instant::now();
        let fade = Fade::fade_in(start, Duration::from_millis(100));
        assert!(fade.opacity(start).abs() < f32::EPSILON);
        assert!((fade.opacity(start + Duration::from_millis(50)) - 0.5).abs() < 1e-3);
        assert!(fade.is_finished(start + Duration::from_millis(100)));
    }

    #[test]
    fn fade_out_starts_from_current_opacity() {
        let start = Instant::now();
        let fade = Fade::fade_out(0.4, start, Duration::from_millis(100));
        assert!((fade.opacity(start) - 0.4).abs() < f32::EPSILON);
        assert!(fade.opacity(start + Duration::from_millis(100)).abs() < f32::EPSILON);
    }

    #[test]
    fn zero_duration_jumps() {
        let start = Instant::now();
        let fade = Fade::fade_in(start, Duration::ZERO);
        assert!(fade.is_finished(start));
        assert!((fade.opacity(start) - 1.0).abs() < f32::EPSILON);
    }
}
