//! Processing module for cursor motion
//!
//! This module contains the per-frame smoothing math and the cursor
//! tracker built on top of it.

pub mod cursor_tracker;
pub mod smoothing;

pub use cursor_tracker::{replay_events, CursorTracker, TrackerConfig, TrackerFrame, TrackerSnapshot};
pub use smoothing::{clamp_to_radius, lerp, lerp_point, Point, TrailState, Velocity};
