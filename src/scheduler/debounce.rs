//! One-shot debounce timer on a logical millisecond clock

/// A debounced deadline
///
/// Scheduling again before the deadline restarts the window. The timer fires
/// at most once per scheduling.
#[derive(Debug, Clone, Default)]
pub struct Debounce {
    deadline_ms: Option<f64>,
}

impl Debounce {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm (or re-arm) the timer to fire at `at_ms`
    pub fn schedule(&mut self, at_ms: f64) {
        self.deadline_ms = Some(at_ms);
    }

    /// Drop any pending deadline
    pub fn cancel(&mut self) {
        self.deadline_ms = None;
    }

    pub fn deadline_ms(&self) -> Option<f64> {
        self.deadline_ms
    }

    pub fn is_pending(&self) -> bool {
        self.deadline_ms.is_some()
    }

    /// Returns true exactly once when `now_ms` reaches the pending deadline
    pub fn poll(&mut self, now_ms: f64) -> bool {
        match self.deadline_ms {
            Some(deadline) if now_ms >= deadline => {
                self.deadline_ms = None;
                true
            }
            _ => false,
        }
    }
}
