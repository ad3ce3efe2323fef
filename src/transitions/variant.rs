//! Keyframe descriptors and the closed set of transition identifiers

use crate::error::MotionError;
use crate::transitions::easing::Timing;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Visual property bag for one phase of a transition
///
/// Unset properties are left to the renderer's defaults and are omitted from
/// the serialized form.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Keyframe {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skew_x: Option<f64>,
    /// Blur radius in pixels
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blur: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clip_path: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transition: Option<Timing>,
}

impl Keyframe {
    pub const EMPTY: Keyframe = Keyframe {
        opacity: None,
        x: None,
        y: None,
        scale: None,
        rotate: None,
        skew_x: None,
        blur: None,
        clip_path: None,
        transition: None,
    };

    /// Time the phase takes to settle, zero when untimed
    pub fn total_ms(&self) -> f64 {
        self.transition.map(|t| t.total_ms()).unwrap_or(0.0)
    }

    /// Eased progress through this phase, 1.0 when untimed
    pub fn progress(&self, elapsed_ms: f64) -> f64 {
        self.transition
            .map(|t| t.progress(elapsed_ms))
            .unwrap_or(1.0)
    }
}

/// Three-phase animation descriptor
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitionVariant {
    /// Appearance before mount
    pub initial: Keyframe,
    /// Settled appearance
    pub animate: Keyframe,
    /// Appearance before unmount
    pub exit: Keyframe,
}

impl TransitionVariant {
    pub fn enter_duration_ms(&self) -> f64 {
        self.animate.total_ms()
    }

    pub fn exit_duration_ms(&self) -> f64 {
        self.exit.total_ms()
    }
}

/// Phase a rendered layer is in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Phase {
    Initial,
    Animate,
    Exit,
}

/// Supported page transitions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TransitionType {
    #[default]
    Fade,
    SlideUp,
    SlideLeft,
    Scale,
    Glitch,
    HudPanel,
    Curtain,
}

impl TransitionType {
    pub const ALL: [TransitionType; 7] = [
        TransitionType::Fade,
        TransitionType::SlideUp,
        TransitionType::SlideLeft,
        TransitionType::Scale,
        TransitionType::Glitch,
        TransitionType::HudPanel,
        TransitionType::Curtain,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TransitionType::Fade => "fade",
            TransitionType::SlideUp => "slideUp",
            TransitionType::SlideLeft => "slideLeft",
            TransitionType::Scale => "scale",
            TransitionType::Glitch => "glitch",
            TransitionType::HudPanel => "hudPanel",
            TransitionType::Curtain => "curtain",
        }
    }
}

impl fmt::Display for TransitionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransitionType {
    type Err = MotionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TransitionType::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| MotionError::UnknownTransition(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_identifiers() {
        assert_eq!("glitch".parse::<TransitionType>().unwrap(), TransitionType::Glitch);
        assert_eq!("hudPanel".parse::<TransitionType>().unwrap(), TransitionType::HudPanel);
        for kind in TransitionType::ALL {
            assert_eq!(kind.as_str().parse::<TransitionType>().unwrap(), kind);
        }
    }

    #[test]
    fn test_parse_unknown_identifier() {
        assert!(matches!(
            "spin".parse::<TransitionType>(),
            Err(MotionError::UnknownTransition(name)) if name == "spin"
        ));
    }

    #[test]
    fn test_serde_names_match_display() {
        for kind in TransitionType::ALL {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind));
        }
    }

    #[test]
    fn test_empty_keyframe_serializes_to_empty_object() {
        assert_eq!(serde_json::to_string(&Keyframe::EMPTY).unwrap(), "{}");
    }
}
