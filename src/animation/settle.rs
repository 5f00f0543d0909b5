use std::time::{Duration, Instant};

use super::{Easing, Offset, progress};
use crate::types::Point;

/// Interpolation of a popup's origin towards a new slot.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Settle {
    from: Offset,
    to: Point,
    started: Instant,
    duration: Duration,
    easing: Easing,
}

impl Settle {
    #[must_use]
    pub const fn new(
        from: Offset,
        to: Point,
        started: Instant,
        duration: Duration,
        easing: Easing,
    ) -> Self {
        Self {
            from,
            to,
            started,
            duration,
            easing,
        }
    }

    #[must_use]
    pub const fn target(&self) -> Point {
        self.to
    }

    #[must_use]
    pub fn sample(&self, now: Instant) -> Offset {
        let eased = self.easing.apply(progress(self.started, self.duration, now));
        self.from.lerp(Offset::from(self.to), eased)
    }

    #[must_use]
    pub fn is_finished(&self, now: Instant) -> bool {
        progress(self.started, self.duration, now) >= 1.0
    }
}
