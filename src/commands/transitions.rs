//! Transition preview commands

use crate::input::source::StaticPreference;
use crate::transitions::presence::{PresenceConfig, PresenceController, PresenceFrame, PresenceState};
use crate::transitions::registry;
use crate::transitions::variant::{TransitionType, TransitionVariant};
use serde::Serialize;

/// Upper bound on preview length so a stuck sequence cannot loop forever
const MAX_PREVIEW_FRAMES: usize = 10_000;

/// Descriptor as the front end would receive it
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitionDescription {
    pub requested: TransitionType,
    pub reduced_motion: bool,
    pub variant: &'static TransitionVariant,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overlay: Option<&'static TransitionVariant>,
}

/// Describe the variant and overlay a presence layer would play
pub fn describe_transition(
    kind: TransitionType,
    show_overlay: bool,
    reduced_motion: bool,
) -> TransitionDescription {
    let (variant, overlay) = if reduced_motion {
        (registry::reduced_motion_variant(), None)
    } else {
        (
            registry::variant(kind),
            show_overlay.then(registry::overlay_sweep),
        )
    };

    TransitionDescription {
        requested: kind,
        reduced_motion,
        variant,
        overlay,
    }
}

/// Simulate navigating through `routes` in order
///
/// The first route is mounted; each following route is navigated to once the
/// previous transition has settled. Returns one frame per output tick.
pub fn preview_navigation(
    config: PresenceConfig,
    routes: &[String],
    reduced_motion: bool,
    output_fps: f64,
) -> anyhow::Result<Vec<PresenceFrame>> {
    anyhow::ensure!(
        output_fps.is_finite() && output_fps > 0.0,
        "output fps must be positive, got {}",
        output_fps
    );
    let Some((first, rest)) = routes.split_first() else {
        return Ok(vec![]);
    };

    let frame_ms = 1000.0 / output_fps;
    let mut presence =
        PresenceController::mount(config, first.as_str(), &StaticPreference(Some(reduced_motion)), 0.0);
    let mut pending = rest.iter();
    let mut frames = Vec::new();
    let mut now = 0.0;

    let mut frame = presence.tick(now);
    loop {
        let settled = frame.state == PresenceState::Idle && frame.overlay.is_none();
        frames.push(frame);

        if settled {
            match pending.next() {
                Some(route) => {
                    presence.navigate(route.as_str(), now);
                }
                None => break,
            }
        }

        anyhow::ensure!(
            frames.len() < MAX_PREVIEW_FRAMES,
            "navigation preview did not settle within {} frames",
            MAX_PREVIEW_FRAMES
        );

        now += frame_ms;
        frame = presence.tick(now);
    }

    tracing::info!("Previewed {} routes in {} frames", routes.len(), frames.len());
    Ok(frames)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transitions::presence::PresenceEvent;

    fn routes(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_describe_glitch() {
        let description = describe_transition(TransitionType::Glitch, true, false);
        assert!(std::ptr::eq(
            description.variant,
            registry::variant(TransitionType::Glitch)
        ));
        assert!(description.overlay.is_some());
    }

    #[test]
    fn test_describe_reduced_motion() {
        let description = describe_transition(TransitionType::HudPanel, true, true);
        assert!(std::ptr::eq(
            description.variant,
            registry::reduced_motion_variant()
        ));
        assert!(description.overlay.is_none());

        let json = serde_json::to_value(&description).unwrap();
        assert_eq!(json["requested"], "hudPanel");
        assert!(json.get("overlay").is_none());
    }

    #[test]
    fn test_preview_emits_completion_for_every_route() {
        let frames = preview_navigation(
            PresenceConfig::default(),
            &routes(&["/", "/projects", "/blog"]),
            false,
            60.0,
        )
        .unwrap();

        let entered: Vec<_> = frames
            .iter()
            .flat_map(|f| f.events.iter())
            .filter_map(|e| match e {
                PresenceEvent::EnterComplete { key } => Some(key.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(entered, vec!["/projects", "/blog"]);
        assert_eq!(frames.last().unwrap().state, PresenceState::Idle);
    }

    #[test]
    fn test_preview_with_reduced_motion_never_sweeps() {
        let frames =
            preview_navigation(PresenceConfig::default(), &routes(&["/", "/about"]), true, 30.0)
                .unwrap();
        assert!(frames.iter().all(|f| f.overlay.is_none()));
    }

    #[test]
    fn test_preview_without_routes() {
        assert!(preview_navigation(PresenceConfig::default(), &[], false, 60.0)
            .unwrap()
            .is_empty());
    }
}
