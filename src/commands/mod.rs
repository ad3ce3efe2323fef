//! Command handlers
//!
//! Offline entry points used by the `motion-replay` binary: pointer log
//! replays and transition previews.

pub mod processing;
pub mod transitions;
