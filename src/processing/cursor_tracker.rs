//! Cursor position tracking for the animated cursor
//!
//! The primary dot follows raw pointer input with no smoothing. Two trailing
//! elements, a tight ring and a loose glow, chase it once per animation frame
//! and are clamped so they never fall too far behind.

use crate::error::{MotionError, MotionResult};
use crate::input::types::{PointerEvent, TimedPointerEvent};
use crate::processing::smoothing::{Point, TrailState, Velocity};
use crate::scheduler::Debounce;
use serde::{Deserialize, Serialize};

/// Default ring smoothing factor (tight follow)
pub const DEFAULT_RING_SMOOTHING: f64 = 0.5;
/// Default glow smoothing factor (loose trailing)
pub const DEFAULT_GLOW_SMOOTHING: f64 = 0.12;
/// Maximum ring distance from the raw position in pixels
pub const DEFAULT_RING_MAX_DISTANCE: f64 = 16.0;
/// Maximum glow distance from the raw position in pixels
pub const DEFAULT_GLOW_MAX_DISTANCE: f64 = 40.0;
/// Idle window after the last move before `is_moving` resets
pub const DEFAULT_IDLE_TIMEOUT_MS: f64 = 100.0;
/// Longest replay accepted, in output frames (about 4.6 hours at 60fps)
pub const MAX_REPLAY_FRAMES: usize = 1_000_000;

/// Tracker configuration accepted at construction time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TrackerConfig {
    pub enabled: bool,
    pub ring_smoothing: f64,
    pub glow_smoothing: f64,
    pub ring_max_distance: f64,
    pub glow_max_distance: f64,
    pub idle_timeout_ms: f64,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            ring_smoothing: DEFAULT_RING_SMOOTHING,
            glow_smoothing: DEFAULT_GLOW_SMOOTHING,
            ring_max_distance: DEFAULT_RING_MAX_DISTANCE,
            glow_max_distance: DEFAULT_GLOW_MAX_DISTANCE,
            idle_timeout_ms: DEFAULT_IDLE_TIMEOUT_MS,
        }
    }
}

impl TrackerConfig {
    /// Check the configuration preconditions
    pub fn validate(&self) -> MotionResult<()> {
        for (name, value) in [
            ("ringSmoothing", self.ring_smoothing),
            ("glowSmoothing", self.glow_smoothing),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(MotionError::InvalidConfig(format!(
                    "{} must be within [0, 1], got {}",
                    name, value
                )));
            }
        }

        for (name, value) in [
            ("ringMaxDistance", self.ring_max_distance),
            ("glowMaxDistance", self.glow_max_distance),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(MotionError::InvalidConfig(format!(
                    "{} must be a positive distance, got {}",
                    name, value
                )));
            }
        }

        if !self.idle_timeout_ms.is_finite() || self.idle_timeout_ms < 0.0 {
            return Err(MotionError::InvalidConfig(format!(
                "idleTimeoutMs must be non-negative, got {}",
                self.idle_timeout_ms
            )));
        }

        Ok(())
    }
}

/// Read-only tracker state exposed to rendering consumers
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackerSnapshot {
    pub position: Point,
    pub ring_position: Point,
    pub glow_position: Point,
    pub velocity: Velocity,
    pub is_visible: bool,
    pub is_moving: bool,
}

/// Snapshot taken at one output frame of a replay
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackerFrame {
    pub frame_time_ms: f64,
    #[serde(flatten)]
    pub snapshot: TrackerSnapshot,
}

/// Cursor position tracker
///
/// Raw position and velocity change synchronously in [`handle_event`]; the
/// trailing positions only change in [`tick`].
///
/// [`handle_event`]: CursorTracker::handle_event
/// [`tick`]: CursorTracker::tick
#[derive(Debug, Clone)]
pub struct CursorTracker {
    config: TrackerConfig,
    raw: Point,
    velocity: Velocity,
    ring: TrailState,
    glow: TrailState,
    is_visible: bool,
    is_moving: bool,
    idle: Debounce,
    torn_down: bool,
}

impl CursorTracker {
    /// Create a tracker at the origin, rejecting invalid configuration
    pub fn new(config: TrackerConfig) -> MotionResult<Self> {
        if let Err(e) = config.validate() {
            tracing::warn!("Rejected tracker configuration: {}", e);
            return Err(e);
        }

        Ok(Self {
            ring: TrailState::new(config.ring_smoothing, config.ring_max_distance),
            glow: TrailState::new(config.glow_smoothing, config.glow_max_distance),
            config,
            raw: Point::ORIGIN,
            velocity: Point::ORIGIN,
            is_visible: false,
            is_moving: false,
            idle: Debounce::new(),
            torn_down: false,
        })
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// Whether the tracker currently accepts events and frames
    pub fn is_live(&self) -> bool {
        self.config.enabled && !self.torn_down
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// Apply a pointer event at `now_ms`
    ///
    /// Returns false when the event was ignored (disabled or torn down).
    pub fn handle_event(&mut self, event: PointerEvent, now_ms: f64) -> bool {
        if !self.is_live() {
            return false;
        }

        match event {
            PointerEvent::Move { x, y } => {
                let next = Point::new(x, y);
                self.velocity = next - self.raw;
                self.raw = next;
                self.is_visible = true;
                self.is_moving = true;
                self.idle.schedule(now_ms + self.config.idle_timeout_ms);
            }
            PointerEvent::Enter => self.is_visible = true,
            PointerEvent::Leave => self.is_visible = false,
        }

        true
    }

    /// Fire due timers; returns true if `is_moving` just reset
    pub fn advance_timers(&mut self, now_ms: f64) -> bool {
        if !self.is_live() {
            return false;
        }

        if self.idle.poll(now_ms) {
            self.is_moving = false;
            return true;
        }

        false
    }

    /// Pending idle deadline, if the pointer is still considered moving
    pub fn idle_deadline_ms(&self) -> Option<f64> {
        self.idle.deadline_ms()
    }

    /// Run one animation frame
    pub fn tick(&mut self, now_ms: f64) -> TrackerSnapshot {
        if self.is_live() {
            self.advance_timers(now_ms);
            self.ring.step(self.raw);
            self.glow.step(self.raw);
        }
        self.snapshot()
    }

    /// Stop the tracker: pending timers are dropped and later input is ignored
    pub fn teardown(&mut self) {
        self.idle.cancel();
        self.torn_down = true;
    }

    pub fn snapshot(&self) -> TrackerSnapshot {
        TrackerSnapshot {
            position: self.raw,
            ring_position: self.ring.position,
            glow_position: self.glow.position,
            velocity: self.velocity,
            is_visible: self.is_visible,
            is_moving: self.is_moving,
        }
    }
}

/// Replay a timestamped pointer log at a fixed output framerate
///
/// Events are applied in log order up to each frame time, then the frame is
/// ticked. Produces one frame per output tick; at least one for non-empty
/// input. Logs with non-finite timestamps or longer than
/// [`MAX_REPLAY_FRAMES`] are rejected.
pub fn replay_events(
    events: &[TimedPointerEvent],
    config: &TrackerConfig,
    output_fps: f64,
) -> MotionResult<Vec<TrackerFrame>> {
    if !output_fps.is_finite() || output_fps <= 0.0 {
        return Err(MotionError::InvalidConfig(format!(
            "output fps must be positive, got {}",
            output_fps
        )));
    }

    let mut tracker = CursorTracker::new(config.clone())?;
    if events.is_empty() {
        return Ok(vec![]);
    }

    if let Some(bad) = events.iter().find(|e| !e.process_time_ms.is_finite()) {
        return Err(MotionError::InvalidConfig(format!(
            "pointer event timestamp must be finite, got {}",
            bad.process_time_ms
        )));
    }

    let frame_duration_ms = 1000.0 / output_fps;
    let total_duration_ms = events
        .iter()
        .map(|e| e.process_time_ms)
        .fold(0.0, f64::max);
    let frames_needed = (total_duration_ms / frame_duration_ms).ceil();
    if frames_needed > MAX_REPLAY_FRAMES as f64 {
        return Err(MotionError::InvalidConfig(format!(
            "replay of {}ms at {}fps exceeds {} frames",
            total_duration_ms, output_fps, MAX_REPLAY_FRAMES
        )));
    }
    let frame_count = (frames_needed as usize).max(1);

    let mut frames = Vec::new();
    let mut next_event = 0;

    for frame in 0..frame_count {
        let frame_time_ms = (frame + 1) as f64 * frame_duration_ms;

        while next_event < events.len() && events[next_event].process_time_ms <= frame_time_ms {
            let timed = &events[next_event];
            tracker.handle_event(timed.event, timed.process_time_ms);
            next_event += 1;
        }

        frames.push(TrackerFrame {
            frame_time_ms,
            snapshot: tracker.tick(frame_time_ms),
        });
    }

    Ok(frames)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn moved(x: f64, y: f64) -> PointerEvent {
        PointerEvent::Move { x, y }
    }

    fn tracker() -> CursorTracker {
        CursorTracker::new(TrackerConfig::default()).unwrap()
    }

    #[test]
    fn test_starts_at_origin_hidden() {
        let snapshot = tracker().snapshot();
        assert_eq!(snapshot.position, Point::ORIGIN);
        assert_eq!(snapshot.ring_position, Point::ORIGIN);
        assert_eq!(snapshot.glow_position, Point::ORIGIN);
        assert!(!snapshot.is_visible);
        assert!(!snapshot.is_moving);
    }

    #[test]
    fn test_move_updates_raw_and_velocity_immediately() {
        let mut t = tracker();
        t.handle_event(moved(10.0, 20.0), 0.0);
        t.handle_event(moved(15.0, 18.0), 5.0);

        let s = t.snapshot();
        assert_eq!(s.position, Point::new(15.0, 18.0));
        assert_eq!(s.velocity, Point::new(5.0, -2.0));
        assert!(s.is_visible);
        assert!(s.is_moving);
        // Trailing positions wait for the next frame
        assert_eq!(s.ring_position, Point::ORIGIN);
    }

    #[test]
    fn test_enter_and_leave_toggle_visibility() {
        let mut t = tracker();
        t.handle_event(PointerEvent::Enter, 0.0);
        assert!(t.snapshot().is_visible);
        t.handle_event(PointerEvent::Leave, 1.0);
        assert!(!t.snapshot().is_visible);
        t.handle_event(moved(1.0, 1.0), 2.0);
        assert!(t.snapshot().is_visible);
    }

    #[test]
    fn test_moving_resets_once_after_idle_window() {
        let mut t = tracker();
        t.handle_event(moved(1.0, 1.0), 0.0);

        assert!(!t.advance_timers(99.0));
        assert!(t.snapshot().is_moving);
        assert!(t.advance_timers(100.0));
        assert!(!t.snapshot().is_moving);
        assert!(!t.advance_timers(200.0));
    }

    #[test]
    fn test_idle_window_is_debounced() {
        let mut t = tracker();
        t.handle_event(moved(1.0, 1.0), 0.0);
        t.handle_event(moved(2.0, 2.0), 80.0);

        assert!(!t.advance_timers(120.0));
        assert!(t.snapshot().is_moving);
        assert!(t.advance_timers(180.0));
    }

    #[test]
    fn test_trailing_distances_hold_every_frame() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        let mut t = tracker();
        let mut now = 0.0;

        for _ in 0..2_000 {
            // Mix small jitters with long jumps across the viewport
            let (x, y) = if rng.gen_bool(0.1) {
                (rng.gen_range(-4000.0..4000.0), rng.gen_range(-4000.0..4000.0))
            } else {
                let p = t.snapshot().position;
                (p.x + rng.gen_range(-60.0..60.0), p.y + rng.gen_range(-60.0..60.0))
            };
            now += rng.gen_range(1.0..12.0);
            t.handle_event(moved(x, y), now);

            for _ in 0..rng.gen_range(0..4) {
                now += 16.0;
                let s = t.tick(now);
                assert!(s.ring_position.distance_to(s.position) <= 16.0 + 1e-9);
                assert!(s.glow_position.distance_to(s.position) <= 40.0 + 1e-9);
            }
        }
    }

    #[test]
    fn test_ring_follows_tighter_than_glow() {
        let mut t = tracker();
        t.handle_event(moved(10.0, 0.0), 0.0);
        let s = t.tick(16.0);

        assert!((s.ring_position.x - 5.0).abs() < 1e-9);
        assert!((s.glow_position.x - 1.2).abs() < 1e-9);
    }

    #[test]
    fn test_teardown_stops_updates() {
        let mut t = tracker();
        t.handle_event(moved(10.0, 10.0), 0.0);
        t.teardown();

        assert!(!t.handle_event(moved(50.0, 50.0), 10.0));
        let before = t.snapshot();
        let after = t.tick(500.0);
        assert_eq!(before, after);
        assert_eq!(after.position, Point::new(10.0, 10.0));
        // The pending idle reset was dropped with the tracker
        assert!(after.is_moving);
        assert!(t.idle_deadline_ms().is_none());
    }

    #[test]
    fn test_disabled_tracker_ignores_input() {
        let config = TrackerConfig {
            enabled: false,
            ..TrackerConfig::default()
        };
        let mut t = CursorTracker::new(config).unwrap();
        assert!(!t.handle_event(moved(5.0, 5.0), 0.0));
        assert_eq!(t.tick(16.0), TrackerSnapshot::default());
    }

    #[test]
    fn test_rejects_out_of_range_smoothing() {
        let config = TrackerConfig {
            glow_smoothing: 1.5,
            ..TrackerConfig::default()
        };
        assert!(matches!(
            CursorTracker::new(config),
            Err(MotionError::InvalidConfig(_))
        ));

        let config = TrackerConfig {
            ring_smoothing: f64::NAN,
            ..TrackerConfig::default()
        };
        assert!(CursorTracker::new(config).is_err());
    }

    #[test]
    fn test_rejects_non_positive_radius() {
        let config = TrackerConfig {
            ring_max_distance: 0.0,
            ..TrackerConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_replay_empty_log() {
        let frames = replay_events(&[], &TrackerConfig::default(), 60.0).unwrap();
        assert!(frames.is_empty());
    }

    #[test]
    fn test_replay_frame_count_follows_fps() {
        let events = vec![
            TimedPointerEvent::new(moved(0.0, 0.0), 0.0),
            TimedPointerEvent::new(moved(100.0, 100.0), 1000.0),
        ];

        let at_30 = replay_events(&events, &TrackerConfig::default(), 30.0).unwrap();
        let at_60 = replay_events(&events, &TrackerConfig::default(), 60.0).unwrap();

        assert_eq!(at_30.len(), 30);
        assert_eq!(at_60.len(), 60);
    }

    #[test]
    fn test_replay_marks_idle_after_pause() {
        let events = vec![
            TimedPointerEvent::new(moved(10.0, 10.0), 0.0),
            TimedPointerEvent::new(PointerEvent::Leave, 500.0),
        ];

        let frames = replay_events(&events, &TrackerConfig::default(), 50.0).unwrap();

        assert!(frames[0].snapshot.is_moving);
        let idle_frame = frames.iter().find(|f| f.frame_time_ms >= 100.0).unwrap();
        assert!(!idle_frame.snapshot.is_moving);
        assert!(!frames.last().unwrap().snapshot.is_visible);
    }

    #[test]
    fn test_replay_rejects_huge_timestamp() {
        let events = vec![TimedPointerEvent::new(moved(1.0, 1.0), 1e300)];
        assert!(matches!(
            replay_events(&events, &TrackerConfig::default(), 60.0),
            Err(MotionError::InvalidConfig(_))
        ));

        let one_past_cap = (MAX_REPLAY_FRAMES as f64 + 1.0) * 1000.0 / 60.0;
        let events = vec![TimedPointerEvent::new(moved(1.0, 1.0), one_past_cap)];
        assert!(replay_events(&events, &TrackerConfig::default(), 60.0).is_err());
    }

    #[test]
    fn test_replay_rejects_non_finite_timestamp() {
        let events = vec![
            TimedPointerEvent::new(moved(1.0, 1.0), 0.0),
            TimedPointerEvent::new(PointerEvent::Leave, f64::INFINITY),
        ];
        assert!(matches!(
            replay_events(&events, &TrackerConfig::default(), 60.0),
            Err(MotionError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_replay_rejects_bad_fps() {
        assert!(replay_events(&[], &TrackerConfig::default(), 0.0).is_err());
    }
}
