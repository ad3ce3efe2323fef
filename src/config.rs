//! Motion configuration file
//!
//! A single JSON document with a `tracker` and a `presence` section. Every
//! field is optional and falls back to its default.

use crate::error::MotionResult;
use crate::processing::cursor_tracker::TrackerConfig;
use crate::transitions::presence::PresenceConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable the CLI reads the config path from
pub const CONFIG_ENV_VAR: &str = "PORTFOLIO_MOTION_CONFIG";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MotionConfig {
    pub tracker: TrackerConfig,
    pub presence: PresenceConfig,
}

impl MotionConfig {
    /// Parse and validate a JSON config
    pub fn from_json_str(json: &str) -> MotionResult<Self> {
        let config: MotionConfig = serde_json::from_str(json)?;
        config.tracker.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file
    pub fn load(path: &Path) -> MotionResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&content)?;
        tracing::info!(
            "Loaded motion config from {} (transition={})",
            path.display(),
            config.presence.transition_type
        );
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MotionError;
    use crate::transitions::{PresenceMode, TransitionType};
    use std::io::Write;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = MotionConfig::from_json_str("{}").unwrap();
        assert_eq!(config, MotionConfig::default());
        assert!(config.tracker.enabled);
        assert_eq!(config.tracker.ring_smoothing, 0.5);
        assert_eq!(config.tracker.glow_smoothing, 0.12);
    }

    #[test]
    fn test_partial_sections() {
        let config = MotionConfig::from_json_str(
            r#"{
                "tracker": { "glowSmoothing": 0.2 },
                "presence": { "transitionType": "hudPanel", "mode": "sync", "className": "shell" }
            }"#,
        )
        .unwrap();

        assert_eq!(config.tracker.glow_smoothing, 0.2);
        assert_eq!(config.tracker.ring_max_distance, 16.0);
        assert_eq!(config.presence.transition_type, TransitionType::HudPanel);
        assert_eq!(config.presence.mode, PresenceMode::Sync);
        assert_eq!(config.presence.class_name.as_deref(), Some("shell"));
        assert!(config.presence.show_overlay);
    }

    #[test]
    fn test_invalid_smoothing_rejected() {
        let err = MotionConfig::from_json_str(r#"{ "tracker": { "ringSmoothing": -0.1 } }"#)
            .unwrap_err();
        assert!(matches!(err, MotionError::InvalidConfig(_)));
    }

    #[test]
    fn test_unknown_transition_rejected() {
        let err = MotionConfig::from_json_str(r#"{ "presence": { "transitionType": "spin" } }"#)
            .unwrap_err();
        assert!(matches!(err, MotionError::Json(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "presence": {{ "transitionType": "glitch" }} }}"#).unwrap();

        let config = MotionConfig::load(file.path()).unwrap();
        assert_eq!(config.presence.transition_type, TransitionType::Glitch);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = MotionConfig::load(&dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, MotionError::Io(_)));
    }
}
