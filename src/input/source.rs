//! Host capabilities injected into the motion components
//!
//! Pointer listeners and the reduced-motion media query are process-wide host
//! state. They reach the tracker and the presence controller only through the
//! traits below, so tests can substitute scripted sources.

use crate::error::{MotionError, MotionResult};
use crate::input::types::PointerEvent;
use async_trait::async_trait;
use tokio::sync::{mpsc, watch};

/// A stream of pointer events with an explicit listener lifecycle
#[async_trait]
pub trait InputSource: Send {
    /// Attach listeners to the host
    async fn attach(&mut self) -> MotionResult<()>;

    /// Wait for the next event; `None` once the source is exhausted
    async fn next_event(&mut self) -> Option<PointerEvent>;

    /// Remove listeners; no events are delivered afterwards
    async fn detach(&mut self);
}

/// Sender half of a [`ChannelInputSource`]
#[derive(Debug, Clone)]
pub struct PointerSender {
    tx: mpsc::UnboundedSender<PointerEvent>,
}

impl PointerSender {
    /// Push an event; fails once the source has been detached
    pub fn send(&self, event: PointerEvent) -> MotionResult<()> {
        self.tx
            .send(event)
            .map_err(|_| MotionError::InputSource("input source detached".to_string()))
    }
}

/// Input source fed through an unbounded tokio channel
#[derive(Debug)]
pub struct ChannelInputSource {
    rx: mpsc::UnboundedReceiver<PointerEvent>,
    attached: bool,
}

impl ChannelInputSource {
    pub fn new() -> (PointerSender, Self) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            PointerSender { tx },
            Self {
                rx,
                attached: false,
            },
        )
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }
}

#[async_trait]
impl InputSource for ChannelInputSource {
    async fn attach(&mut self) -> MotionResult<()> {
        if self.attached {
            return Err(MotionError::InputSource("listeners already attached".to_string()));
        }
        self.attached = true;
        tracing::debug!("Pointer listeners attached");
        Ok(())
    }

    async fn next_event(&mut self) -> Option<PointerEvent> {
        if !self.attached {
            return None;
        }
        self.rx.recv().await
    }

    async fn detach(&mut self) {
        if self.attached {
            self.attached = false;
            self.rx.close();
            tracing::debug!("Pointer listeners detached");
        }
    }
}

/// Host reduced-motion preference
pub trait MotionPreference {
    /// `None` when the host cannot answer the query
    fn prefers_reduced_motion(&self) -> Option<bool>;
}

/// A preference fixed at construction
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticPreference(pub Option<bool>);

impl MotionPreference for StaticPreference {
    fn prefers_reduced_motion(&self) -> Option<bool> {
        self.0
    }
}

/// A preference that can change while mounted
#[derive(Debug, Clone)]
pub struct WatchedPreference {
    rx: watch::Receiver<bool>,
}

impl WatchedPreference {
    /// Create a preference and the sender the host updates it through
    pub fn new(initial: bool) -> (watch::Sender<bool>, Self) {
        let (tx, rx) = watch::channel(initial);
        (tx, Self { rx })
    }

    /// Wait for the next change and return the new value
    ///
    /// Returns `None` once the host side is gone.
    pub async fn changed(&mut self) -> Option<bool> {
        self.rx.changed().await.ok()?;
        Some(*self.rx.borrow_and_update())
    }
}

impl MotionPreference for WatchedPreference {
    fn prefers_reduced_motion(&self) -> Option<bool> {
        Some(*self.rx.borrow())
    }
}
