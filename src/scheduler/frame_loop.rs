//! Fixed-tick frame clock and frame loop cancellation

use std::time::Duration;
use tokio::sync::oneshot;
use tokio::time::{Instant, Interval, MissedTickBehavior};

/// Default redraw rate for the live tracker (60Hz)
pub const DEFAULT_FRAME_INTERVAL: Duration = Duration::from_micros(16_667);

/// One tick of the frame clock
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTick {
    /// Frame number, starting at 1
    pub index: u64,
    /// Milliseconds since the clock was created
    pub now_ms: f64,
}

/// Fixed-tick frame source measured against its own origin
pub struct FrameClock {
    interval: Interval,
    origin: Instant,
    index: u64,
}

impl FrameClock {
    pub fn new(frame_interval: Duration) -> Self {
        let origin = Instant::now();
        let mut interval = tokio::time::interval_at(origin + frame_interval, frame_interval);
        // A stalled host drops frames instead of replaying a burst of them
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        Self {
            interval,
            origin,
            index: 0,
        }
    }

    /// Milliseconds elapsed since the clock origin
    pub fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }

    /// Convert a clock-relative time back to an instant
    pub fn instant_at(&self, ms: f64) -> Instant {
        self.origin + Duration::from_secs_f64(ms.max(0.0) / 1000.0)
    }

    /// Wait for the next frame
    pub async fn next_frame(&mut self) -> FrameTick {
        let at = self.interval.tick().await;
        self.index += 1;
        FrameTick {
            index: self.index,
            now_ms: at.duration_since(self.origin).as_secs_f64() * 1000.0,
        }
    }
}

/// Owner side of a frame loop cancellation
///
/// `cancel` consumes the handle, so a loop can only be cancelled once.
#[derive(Debug)]
pub struct CancelHandle {
    tx: oneshot::Sender<()>,
}

impl CancelHandle {
    pub fn cancel(self) {
        // The loop may already have exited on its own
        let _ = self.tx.send(());
    }
}

/// Loop side of a frame loop cancellation
#[derive(Debug)]
pub struct CancelSignal {
    rx: oneshot::Receiver<()>,
}

impl CancelSignal {
    /// Resolves once the handle is cancelled or dropped
    pub async fn cancelled(&mut self) {
        let _ = (&mut self.rx).await;
    }
}

/// Create a linked cancellation handle and signal
pub fn cancel_pair() -> (CancelHandle, CancelSignal) {
    let (tx, rx) = oneshot::channel();
    (CancelHandle { tx }, CancelSignal { rx })
}
