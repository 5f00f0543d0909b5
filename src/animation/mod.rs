//! Time-driven animations advanced by the coordinator tick.
//!
//! Nothing here sleeps or owns a clock: every sample takes the `now` of the
//! tick that asks for it, so the same inputs always yield the same frame.

use std::fmt::{self, Display};
use std::str::FromStr;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::types::Point;

mod fade;
mod settle;
mod shake;

pub use fade::Fade;
pub use settle::Settle;
pub use shake::Shake;

/// Monotonic easing curves applied to a linear progress in `[0, 1]`.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Easing {
    Linear,
    /// Cubic deceleration.
    #[default]
    EaseOut,
    /// Cubic S-curve.
    EaseInOut,
}

impl Easing {
    #[must_use]
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseOut => {
                let inv = 1.0 - t;
                1.0 - inv * inv * inv
            }
            Self::EaseInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let inv = (-2.0f64).mul_add(t, 2.0);
                    1.0 - inv * inv * inv / 2.0
                }
            }
        }
    }
}

impl Display for Easing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Linear => "linear",
            Self::EaseOut => "ease-out",
            Self::EaseInOut => "ease-in-out",
        })
    }
}

impl FromStr for Easing {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "linear" => Ok(Self::Linear),
            "ease-out" => Ok(Self::EaseOut),
            "ease-in-out" => Ok(Self::EaseInOut),
            other => Err(format!("unknown easing: {other}")),
        }
    }
}

/// Sub-pixel position used while interpolating.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Offset {
    pub x: f64,
    pub y: f64,
}

impl Offset {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn lerp(self, to: Self, t: f64) -> Self {
        Self {
            x: (to.x - self.x).mul_add(t, self.x),
            y: (to.y - self.y).mul_add(t, self.y),
        }
    }

    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn round(self) -> Point {
        Point::new(self.x.round() as i32, self.y.round() as i32)
    }
}

impl From<Point> for Offset {
    fn from(point: Point) -> Self {
        Self::new(f64::from(point.x), f64::from(point.y))
    }
}

/// Linear progress of a timeline; a zero duration is already complete.
pub(crate) fn progress(started: Instant, duration: Duration, now: Instant) -> f64 {
    if duration.is_zero() {
        return 1.0;
    }
    let elapsed = now.saturating_duration_since(started);
    (elapsed.as_secs_f64() / duration.as_secs_f64()).min(1.0)
}
