//! Easing curves and timing parameters for keyframe phases

use serde::{Deserialize, Serialize};

/// Easing curve applied to a linear progress fraction
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Easing {
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
    /// Arbitrary cubic bezier with control points (x1, y1) and (x2, y2)
    CubicBezier { x1: f64, y1: f64, x2: f64, y2: f64 },
}

impl Easing {
    /// Apply the easing curve to a fraction in [0, 1]
    pub fn transform(&self, fraction: f64) -> f64 {
        let curve = match *self {
            Easing::Linear => return fraction.clamp(0.0, 1.0),
            Easing::EaseIn => BezierCurve::new(0.42, 0.0, 1.0, 1.0),
            Easing::EaseOut => BezierCurve::new(0.0, 0.0, 0.58, 1.0),
            Easing::EaseInOut => BezierCurve::new(0.42, 0.0, 0.58, 1.0),
            Easing::CubicBezier { x1, y1, x2, y2 } => BezierCurve::new(x1, y1, x2, y2),
        };
        curve.ease(fraction)
    }
}

/// Bezier from (0, 0) to (1, 1) with two inner control points
#[derive(Debug, Clone, Copy)]
struct BezierCurve {
    p1: (f64, f64),
    p2: (f64, f64),
}

impl BezierCurve {
    /// Halvings of the parameter range when inverting x
    const SEARCH_STEPS: u32 = 40;

    fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self {
            p1: (x1, y1),
            p2: (x2, y2),
        }
    }

    /// One coordinate of the curve at parameter `t`, in Bernstein form
    fn coordinate(a: f64, b: f64, t: f64) -> f64 {
        let u = 1.0 - t;
        3.0 * u * u * t * a + 3.0 * u * t * t * b + t * t * t
    }

    fn x_at(&self, t: f64) -> f64 {
        Self::coordinate(self.p1.0, self.p2.0, t)
    }

    fn y_at(&self, t: f64) -> f64 {
        Self::coordinate(self.p1.1, self.p2.1, t)
    }

    /// Parameter whose x coordinate is `x`
    ///
    /// x(t) is non-decreasing when both control x values lie in [0, 1], so a
    /// plain bisection always brackets the answer.
    fn parameter_for(&self, x: f64) -> f64 {
        let (mut lo, mut hi) = (0.0, 1.0);
        for _ in 0..Self::SEARCH_STEPS {
            let mid = (lo + hi) / 2.0;
            if self.x_at(mid) < x {
                lo = mid;
            } else {
                hi = mid;
            }
        }
        (lo + hi) / 2.0
    }

    fn ease(&self, fraction: f64) -> f64 {
        if fraction <= 0.0 {
            0.0
        } else if fraction >= 1.0 {
            1.0
        } else {
            self.y_at(self.parameter_for(fraction))
        }
    }
}

/// Timing for one keyframe phase
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Timing {
    pub duration_ms: u64,
    pub delay_ms: u64,
    pub easing: Easing,
}

impl Timing {
    pub const fn tween(duration_ms: u64, easing: Easing) -> Self {
        Self {
            duration_ms,
            delay_ms: 0,
            easing,
        }
    }

    pub const fn with_delay(mut self, delay_ms: u64) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    /// Delay plus duration
    pub fn total_ms(&self) -> f64 {
        (self.delay_ms + self.duration_ms) as f64
    }

    /// Eased progress `elapsed_ms` after the phase started
    pub fn progress(&self, elapsed_ms: f64) -> f64 {
        let active = elapsed_ms - self.delay_ms as f64;
        if active <= 0.0 {
            return 0.0;
        }
        if self.duration_ms == 0 || active >= self.duration_ms as f64 {
            return 1.0;
        }
        self.easing.transform(active / self.duration_ms as f64)
    }
}
