//! Cooperative scheduling primitives
//!
//! Everything here runs on one logical thread of control: a debounced
//! logical-clock timer and a fixed-tick frame clock with a one-shot
//! cancellation handle.

pub mod debounce;
pub mod frame_loop;

pub use debounce::Debounce;
pub use frame_loop::{
    cancel_pair, CancelHandle, CancelSignal, FrameClock, FrameTick, DEFAULT_FRAME_INTERVAL,
};
