//! Pointer input and host preferences
//!
//! Defines the pointer event types, the injected host capabilities
//! (`InputSource`, `MotionPreference`) and the `TrackerChannel` that drives a
//! cursor tracker from a live input source.

pub mod channel;
pub mod source;
pub mod types;

pub use channel::TrackerChannel;
pub use source::{
    ChannelInputSource, InputSource, MotionPreference, PointerSender, StaticPreference,
    WatchedPreference,
};
pub use types::{PointerEvent, TimedPointerEvent};
