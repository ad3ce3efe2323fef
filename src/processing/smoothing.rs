//! Per-frame interpolation for trailing cursor elements
//!
//! A trail follows its anchor by linear interpolation with a fixed smoothing
//! factor, then gets clamped so it never lags further than a fixed radius.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};

/// A 2D point in viewport pixel space
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Per-event position delta
pub type Velocity = Point;

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    pub fn distance_to(&self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Linear interpolation between `current` and `target`
///
/// Written as a weighted sum so that factor 0 returns `current` and factor 1
/// returns `target` bit-for-bit.
pub fn lerp(current: f64, target: f64, factor: f64) -> f64 {
    current * (1.0 - factor) + target * factor
}

/// Component-wise [`lerp`] for points
pub fn lerp_point(current: Point, target: Point, factor: f64) -> Point {
    Point::new(
        lerp(current.x, target.x, factor),
        lerp(current.y, target.y, factor),
    )
}

/// Pull `trailing` back toward `anchor` so it is at most `max_distance` away
///
/// Points already within the radius (including a zero distance) are returned
/// unchanged.
pub fn clamp_to_radius(trailing: Point, anchor: Point, max_distance: f64) -> Point {
    let offset = trailing - anchor;
    let distance = offset.x.hypot(offset.y);

    if distance <= max_distance || distance == 0.0 {
        return trailing;
    }

    let scale = max_distance / distance;
    Point::new(anchor.x + offset.x * scale, anchor.y + offset.y * scale)
}

/// Trailing element state (ring or glow)
#[derive(Debug, Clone)]
pub struct TrailState {
    pub position: Point,
    pub smoothing: f64,
    pub max_distance: f64,
}

impl TrailState {
    /// Create a trail at the origin
    pub fn new(smoothing: f64, max_distance: f64) -> Self {
        Self {
            position: Point::ORIGIN,
            smoothing,
            max_distance,
        }
    }

    /// Advance one frame toward `target`: interpolate, then clamp
    pub fn step(&mut self, target: Point) {
        let next = lerp_point(self.position, target, self.smoothing);
        self.position = clamp_to_radius(next, target, self.max_distance);
    }

    /// Snap the trail to a new position
    pub fn reset(&mut self, position: Point) {
        self.position = position;
    }

    /// Check if the trail has caught up with `target`
    pub fn is_settled(&self, target: Point, threshold: f64) -> bool {
        self.position.distance_to(target) < threshold
    }
}
