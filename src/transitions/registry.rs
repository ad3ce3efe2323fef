//! Constant transition descriptors
//!
//! Every descriptor is a `const`; lookups hand out `'static` references and
//! never allocate.

use crate::transitions::easing::{Easing, Timing};
use crate::transitions::variant::{Keyframe, TransitionType, TransitionVariant};

/// Delay of the overlay sweep relative to the primary transition
pub const OVERLAY_DELAY_MS: u64 = 100;

const EXPO_OUT: Easing = Easing::CubicBezier {
    x1: 0.16,
    y1: 1.0,
    x2: 0.3,
    y2: 1.0,
};

const SNAP: Easing = Easing::CubicBezier {
    x1: 0.7,
    y1: 0.0,
    x2: 0.84,
    y2: 0.0,
};

const FADE: TransitionVariant = TransitionVariant {
    initial: Keyframe {
        opacity: Some(0.0),
        ..Keyframe::EMPTY
    },
    animate: Keyframe {
        opacity: Some(1.0),
        transition: Some(Timing::tween(400, Easing::EaseOut)),
        ..Keyframe::EMPTY
    },
    exit: Keyframe {
        opacity: Some(0.0),
        transition: Some(Timing::tween(300, Easing::EaseIn)),
        ..Keyframe::EMPTY
    },
};

const SLIDE_UP: TransitionVariant = TransitionVariant {
    initial: Keyframe {
        opacity: Some(0.0),
        y: Some(40.0),
        ..Keyframe::EMPTY
    },
    animate: Keyframe {
        opacity: Some(1.0),
        y: Some(0.0),
        transition: Some(Timing::tween(500, EXPO_OUT)),
        ..Keyframe::EMPTY
    },
    exit: Keyframe {
        opacity: Some(0.0),
        y: Some(-40.0),
        transition: Some(Timing::tween(350, Easing::EaseIn)),
        ..Keyframe::EMPTY
    },
};

const SLIDE_LEFT: TransitionVariant = TransitionVariant {
    initial: Keyframe {
        opacity: Some(0.0),
        x: Some(80.0),
        ..Keyframe::EMPTY
    },
    animate: Keyframe {
        opacity: Some(1.0),
        x: Some(0.0),
        transition: Some(Timing::tween(500, EXPO_OUT)),
        ..Keyframe::EMPTY
    },
    exit: Keyframe {
        opacity: Some(0.0),
        x: Some(-80.0),
        transition: Some(Timing::tween(350, Easing::EaseIn)),
        ..Keyframe::EMPTY
    },
};

const SCALE: TransitionVariant = TransitionVariant {
    initial: Keyframe {
        opacity: Some(0.0),
        scale: Some(0.92),
        ..Keyframe::EMPTY
    },
    animate: Keyframe {
        opacity: Some(1.0),
        scale: Some(1.0),
        transition: Some(Timing::tween(450, Easing::EaseOut)),
        ..Keyframe::EMPTY
    },
    exit: Keyframe {
        opacity: Some(0.0),
        scale: Some(1.04),
        transition: Some(Timing::tween(300, Easing::EaseIn)),
        ..Keyframe::EMPTY
    },
};

const GLITCH: TransitionVariant = TransitionVariant {
    initial: Keyframe {
        opacity: Some(0.0),
        x: Some(-12.0),
        skew_x: Some(8.0),
        clip_path: Some("inset(0 0 100% 0)"),
        ..Keyframe::EMPTY
    },
    animate: Keyframe {
        opacity: Some(1.0),
        x: Some(0.0),
        skew_x: Some(0.0),
        clip_path: Some("inset(0 0 0% 0)"),
        transition: Some(Timing::tween(450, SNAP)),
        ..Keyframe::EMPTY
    },
    exit: Keyframe {
        opacity: Some(0.0),
        x: Some(12.0),
        skew_x: Some(-8.0),
        clip_path: Some("inset(100% 0 0 0)"),
        transition: Some(Timing::tween(250, SNAP)),
        ..Keyframe::EMPTY
    },
};

const HUD_PANEL: TransitionVariant = TransitionVariant {
    initial: Keyframe {
        opacity: Some(0.0),
        scale: Some(0.96),
        blur: Some(8.0),
        clip_path: Some("inset(50% 0 50% 0)"),
        ..Keyframe::EMPTY
    },
    animate: Keyframe {
        opacity: Some(1.0),
        scale: Some(1.0),
        blur: Some(0.0),
        clip_path: Some("inset(0% 0 0% 0)"),
        transition: Some(Timing::tween(600, EXPO_OUT).with_delay(50)),
        ..Keyframe::EMPTY
    },
    exit: Keyframe {
        opacity: Some(0.0),
        scale: Some(0.98),
        blur: Some(6.0),
        clip_path: Some("inset(50% 0 50% 0)"),
        transition: Some(Timing::tween(350, Easing::EaseInOut)),
        ..Keyframe::EMPTY
    },
};

const CURTAIN: TransitionVariant = TransitionVariant {
    initial: Keyframe {
        clip_path: Some("inset(0 0 0 100%)"),
        ..Keyframe::EMPTY
    },
    animate: Keyframe {
        clip_path: Some("inset(0 0 0 0%)"),
        transition: Some(Timing::tween(700, Easing::EaseInOut)),
        ..Keyframe::EMPTY
    },
    exit: Keyframe {
        clip_path: Some("inset(0 100% 0 0)"),
        transition: Some(Timing::tween(500, Easing::EaseInOut)),
        ..Keyframe::EMPTY
    },
};

const REDUCED_MOTION: TransitionVariant = TransitionVariant {
    initial: Keyframe {
        opacity: Some(0.0),
        scale: Some(0.98),
        ..Keyframe::EMPTY
    },
    animate: Keyframe {
        opacity: Some(1.0),
        scale: Some(1.0),
        transition: Some(Timing::tween(200, Easing::Linear)),
        ..Keyframe::EMPTY
    },
    exit: Keyframe {
        opacity: Some(0.0),
        scale: Some(0.98),
        transition: Some(Timing::tween(150, Easing::Linear)),
        ..Keyframe::EMPTY
    },
};

const OVERLAY_SWEEP: TransitionVariant = TransitionVariant {
    initial: Keyframe {
        clip_path: Some("inset(0 100% 0 0)"),
        ..Keyframe::EMPTY
    },
    animate: Keyframe {
        clip_path: Some("inset(0 0% 0 0)"),
        transition: Some(Timing::tween(400, EXPO_OUT).with_delay(OVERLAY_DELAY_MS)),
        ..Keyframe::EMPTY
    },
    exit: Keyframe {
        clip_path: Some("inset(0 0 0 100%)"),
        transition: Some(Timing::tween(400, Easing::EaseIn)),
        ..Keyframe::EMPTY
    },
};

/// Look up the descriptor for a transition type
pub fn variant(kind: TransitionType) -> &'static TransitionVariant {
    match kind {
        TransitionType::Fade => &FADE,
        TransitionType::SlideUp => &SLIDE_UP,
        TransitionType::SlideLeft => &SLIDE_LEFT,
        TransitionType::Scale => &SCALE,
        TransitionType::Glitch => &GLITCH,
        TransitionType::HudPanel => &HUD_PANEL,
        TransitionType::Curtain => &CURTAIN,
    }
}

/// Fade/scale fallback used when the user prefers reduced motion
pub fn reduced_motion_variant() -> &'static TransitionVariant {
    &REDUCED_MOTION
}

/// Full-screen sweep played over the page on navigation
pub fn overlay_sweep() -> &'static TransitionVariant {
    &OVERLAY_SWEEP
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glitch_and_hud_panel_lookup() {
        let glitch = variant(TransitionType::Glitch);
        assert_eq!(glitch.initial.skew_x, Some(8.0));
        assert_eq!(glitch.animate.clip_path, Some("inset(0 0 0% 0)"));

        let hud = variant(TransitionType::HudPanel);
        assert_eq!(hud.initial.blur, Some(8.0));
        assert_eq!(hud.enter_duration_ms(), 650.0);
    }

    #[test]
    fn test_lookup_is_pure() {
        for kind in TransitionType::ALL {
            let first = variant(kind);
            let second = variant(kind);
            assert!(std::ptr::eq(first, second));
            assert_eq!(first, second);
        }
    }

    #[test]
    fn test_every_variant_settles_at_full_opacity_or_open_clip() {
        for kind in TransitionType::ALL {
            let v = variant(kind);
            assert!(v.initial.transition.is_none(), "{} initial is untimed", kind);
            assert!(v.animate.transition.is_some(), "{} animate is timed", kind);
            assert!(v.exit.transition.is_some(), "{} exit is timed", kind);
            assert!(v.animate.opacity.unwrap_or(1.0) == 1.0);
        }
    }

    #[test]
    fn test_reduced_motion_only_fades_and_scales() {
        let v = reduced_motion_variant();
        for frame in [v.initial, v.animate, v.exit] {
            assert!(frame.x.is_none() && frame.y.is_none());
            assert!(frame.clip_path.is_none() && frame.skew_x.is_none());
            assert!(frame.opacity.is_some() && frame.scale.is_some());
        }
    }

    #[test]
    fn test_overlay_is_delayed() {
        let timing = overlay_sweep().animate.transition.unwrap();
        assert_eq!(timing.delay_ms, OVERLAY_DELAY_MS);
        assert_eq!(OVERLAY_DELAY_MS, 100);
    }
}
