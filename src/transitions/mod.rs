//! Page transitions
//!
//! A closed registry of three-phase keyframe descriptors and the presence
//! controller that plays them when the navigation key changes.

pub mod easing;
pub mod presence;
pub mod registry;
pub mod variant;

pub use easing::{Easing, Timing};
pub use presence::{
    Layer, OverlayFrame, PresenceConfig, PresenceController, PresenceEvent, PresenceFrame,
    Departure, PresenceMode, PresenceState,
};
pub use registry::{overlay_sweep, reduced_motion_variant, variant, OVERLAY_DELAY_MS};
pub use variant::{Keyframe, Phase, TransitionType, TransitionVariant};
