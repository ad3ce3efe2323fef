use serde::{Deserialize, Serialize};

/// A pointer event delivered by the host environment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum PointerEvent {
    Move { x: f64, y: f64 },
    Enter,
    Leave,
}

/// A pointer event stamped with its process time, as stored in pointer logs
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimedPointerEvent {
    #[serde(flatten)]
    pub event: PointerEvent,
    pub process_time_ms: f64,
}

impl TimedPointerEvent {
    pub fn new(event: PointerEvent, process_time_ms: f64) -> Self {
        Self {
            event,
            process_time_ms,
        }
    }
}
