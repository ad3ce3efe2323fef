//! Navigation-keyed presence controller
//!
//! Sequences the exit of the old page and the entrance of the new one each
//! time the navigation key changes, plays the overlay sweep alongside, and
//! falls back to a plain fade/scale when the user prefers reduced motion.

use crate::input::source::{MotionPreference, WatchedPreference};
use crate::transitions::registry;
use crate::transitions::variant::{Phase, TransitionType, TransitionVariant};
use serde::{Deserialize, Serialize};

/// How exit and enter phases are ordered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PresenceMode {
    /// Old content fully exits before new content starts entering
    #[default]
    Wait,
    /// Exit and enter run at the same time
    Sync,
}

/// Presentation layer configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PresenceConfig {
    pub transition_type: TransitionType,
    pub show_overlay: bool,
    pub class_name: Option<String>,
    pub mode: PresenceMode,
    /// Play the enter phase for the content present at mount
    pub animate_on_mount: bool,
}

impl Default for PresenceConfig {
    fn default() -> Self {
        Self {
            transition_type: TransitionType::default(),
            show_overlay: true,
            class_name: None,
            mode: PresenceMode::default(),
            animate_on_mount: false,
        }
    }
}

/// Where the controller is in the current navigation transition
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum PresenceState {
    Idle,
    Exiting {
        leaving: String,
        started_ms: f64,
    },
    Entering {
        started_ms: f64,
    },
    /// Sync mode: every key in `leaving` exits while the current key enters
    Overlapping {
        leaving: Vec<Departure>,
        started_ms: f64,
    },
}

/// Content still playing its exit phase in sync mode
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Departure {
    pub key: String,
    pub started_ms: f64,
}

/// Completion notifications for the layout
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum PresenceEvent {
    ExitComplete { key: String },
    EnterComplete { key: String },
}

/// One rendered piece of content
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Layer {
    pub key: String,
    pub phase: Phase,
    /// Eased progress from the previous phase toward `phase`
    pub progress: f64,
}

/// Overlay sweep state at a given time
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverlayFrame {
    pub phase: Phase,
    pub progress: f64,
}

/// Everything the layout needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PresenceFrame {
    pub time_ms: f64,
    pub state: PresenceState,
    pub layers: Vec<Layer>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overlay: Option<OverlayFrame>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub events: Vec<PresenceEvent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
}

/// Presence controller keyed by a navigation token
#[derive(Debug, Clone)]
pub struct PresenceController {
    config: PresenceConfig,
    reduced_motion: bool,
    current: String,
    state: PresenceState,
    navigated_at_ms: Option<f64>,
}

impl PresenceController {
    /// Mount with the content for `key`
    ///
    /// The reduced-motion preference is read once here; later changes arrive
    /// through [`set_reduced_motion`](Self::set_reduced_motion) or
    /// [`follow_preference`](Self::follow_preference). A host that cannot
    /// answer the query gets the configured variant.
    pub fn mount(
        config: PresenceConfig,
        key: impl Into<String>,
        preference: &dyn MotionPreference,
        now_ms: f64,
    ) -> Self {
        let reduced_motion = preference.prefers_reduced_motion().unwrap_or(false);
        let state = if config.animate_on_mount {
            PresenceState::Entering { started_ms: now_ms }
        } else {
            PresenceState::Idle
        };

        tracing::debug!(
            "Presence mounted (transition={}, reduced_motion={})",
            config.transition_type,
            reduced_motion
        );

        Self {
            config,
            reduced_motion,
            current: key.into(),
            state,
            navigated_at_ms: None,
        }
    }

    pub fn config(&self) -> &PresenceConfig {
        &self.config
    }

    pub fn current_key(&self) -> &str {
        &self.current
    }

    pub fn state(&self) -> &PresenceState {
        &self.state
    }

    pub fn reduced_motion(&self) -> bool {
        self.reduced_motion
    }

    /// Apply a reduced-motion preference change
    pub fn set_reduced_motion(&mut self, reduced_motion: bool) {
        if self.reduced_motion != reduced_motion {
            tracing::debug!("Reduced motion preference changed to {}", reduced_motion);
            self.reduced_motion = reduced_motion;
        }
    }

    /// Wait for the host to change its reduced-motion preference and apply it
    ///
    /// Returns false once the host side of the subscription is gone. Hosts run
    /// this alongside their frame loop, e.g. as a `tokio::select!` arm.
    pub async fn follow_preference(&mut self, preference: &mut WatchedPreference) -> bool {
        match preference.changed().await {
            Some(reduced_motion) => {
                self.set_reduced_motion(reduced_motion);
                true
            }
            None => {
                tracing::debug!("Reduced motion subscription closed");
                false
            }
        }
    }

    /// Variant actually played, after the reduced-motion override
    pub fn effective_variant(&self) -> &'static TransitionVariant {
        if self.reduced_motion {
            registry::reduced_motion_variant()
        } else {
            registry::variant(self.config.transition_type)
        }
    }

    pub fn overlay_enabled(&self) -> bool {
        self.config.show_overlay && !self.reduced_motion
    }

    /// Switch to the content for `key`
    ///
    /// Returns false when `key` is already current.
    pub fn navigate(&mut self, key: impl Into<String>, now_ms: f64) -> bool {
        let key = key.into();
        if key == self.current {
            return false;
        }

        let previous = std::mem::replace(&mut self.current, key);
        self.navigated_at_ms = Some(now_ms);

        self.state = match (self.config.mode, &self.state) {
            // Old content is still leaving; the new key just replaces the pending one
            (PresenceMode::Wait, PresenceState::Exiting { leaving, started_ms }) => {
                PresenceState::Exiting {
                    leaving: leaving.clone(),
                    started_ms: *started_ms,
                }
            }
            (PresenceMode::Wait, _) => PresenceState::Exiting {
                leaving: previous,
                started_ms: now_ms,
            },
            (PresenceMode::Sync, state) => {
                // Content already on its way out keeps its own exit timing
                let mut leaving = match state {
                    PresenceState::Overlapping { leaving, .. } => leaving.clone(),
                    _ => Vec::new(),
                };
                leaving.push(Departure {
                    key: previous,
                    started_ms: now_ms,
                });
                PresenceState::Overlapping {
                    leaving,
                    started_ms: now_ms,
                }
            }
        };

        tracing::debug!("Navigating to {} ({:?})", self.current, self.config.mode);
        true
    }

    /// Advance the state machine to `now_ms` and describe the frame
    pub fn tick(&mut self, now_ms: f64) -> PresenceFrame {
        let variant = self.effective_variant();
        let exit_ms = variant.exit_duration_ms();
        let enter_ms = variant.enter_duration_ms();
        let mut events = Vec::new();

        if let PresenceState::Exiting {
            leaving,
            started_ms,
        } = &self.state
        {
            if now_ms - started_ms >= exit_ms {
                events.push(PresenceEvent::ExitComplete {
                    key: leaving.clone(),
                });
                self.state = PresenceState::Entering {
                    started_ms: started_ms + exit_ms,
                };
            }
        }

        if let PresenceState::Overlapping {
            leaving,
            started_ms,
        } = &mut self.state
        {
            leaving.retain(|departure| {
                if now_ms - departure.started_ms >= exit_ms {
                    events.push(PresenceEvent::ExitComplete {
                        key: departure.key.clone(),
                    });
                    false
                } else {
                    true
                }
            });
            if leaving.is_empty() && now_ms - *started_ms >= enter_ms {
                events.push(PresenceEvent::EnterComplete {
                    key: self.current.clone(),
                });
                self.state = PresenceState::Idle;
            }
        }

        if let PresenceState::Entering { started_ms } = &self.state {
            if now_ms - started_ms >= enter_ms {
                events.push(PresenceEvent::EnterComplete {
                    key: self.current.clone(),
                });
                self.state = PresenceState::Idle;
            }
        }

        PresenceFrame {
            time_ms: now_ms,
            state: self.state.clone(),
            layers: self.layers(variant, now_ms),
            overlay: self.overlay_at(now_ms),
            events,
            class_name: self.config.class_name.clone(),
        }
    }

    fn layers(&self, variant: &TransitionVariant, now_ms: f64) -> Vec<Layer> {
        let settled = Layer {
            key: self.current.clone(),
            phase: Phase::Animate,
            progress: 1.0,
        };

        match &self.state {
            PresenceState::Idle => vec![settled],
            // Wait mode: the incoming content is not rendered until the exit finishes
            PresenceState::Exiting {
                leaving,
                started_ms,
            } => vec![Layer {
                key: leaving.clone(),
                phase: Phase::Exit,
                progress: variant.exit.progress(now_ms - started_ms),
            }],
            PresenceState::Entering { started_ms } => vec![Layer {
                progress: variant.animate.progress(now_ms - started_ms),
                ..settled
            }],
            PresenceState::Overlapping {
                leaving,
                started_ms,
            } => leaving
                .iter()
                .map(|departure| Layer {
                    key: departure.key.clone(),
                    phase: Phase::Exit,
                    progress: variant.exit.progress(now_ms - departure.started_ms),
                })
                .chain(std::iter::once(Layer {
                    progress: variant.animate.progress(now_ms - started_ms),
                    ..settled
                }))
                .collect(),
        }
    }

    fn overlay_at(&self, now_ms: f64) -> Option<OverlayFrame> {
        if !self.overlay_enabled() {
            return None;
        }

        let sweep = registry::overlay_sweep();
        let elapsed = now_ms - self.navigated_at_ms?;
        let cover_ms = sweep.enter_duration_ms();

        if elapsed < 0.0 {
            None
        } else if elapsed < cover_ms {
            Some(OverlayFrame {
                phase: Phase::Animate,
                progress: sweep.animate.progress(elapsed),
            })
        } else if elapsed < cover_ms + sweep.exit_duration_ms() {
            Some(OverlayFrame {
                phase: Phase::Exit,
                progress: sweep.exit.progress(elapsed - cover_ms),
            })
        } else {
            None
        }
    }
}
