use crate::error::{MotionError, MotionResult};
use crate::input::source::InputSource;
use crate::processing::cursor_tracker::{CursorTracker, TrackerConfig, TrackerSnapshot};
use crate::scheduler::{cancel_pair, CancelHandle, CancelSignal, FrameClock, DEFAULT_FRAME_INTERVAL};
use parking_lot::Mutex as ParkingMutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

const CHANNEL_NAME: &str = "cursor";

/// Live driver for a [`CursorTracker`]
///
/// Owns the frame loop task that multiplexes pointer events, frame ticks and
/// the idle deadline, and publishes a snapshot after every change.
pub struct TrackerChannel {
    tracker: Arc<ParkingMutex<CursorTracker>>,
    is_running: Arc<AtomicBool>,
    frame_interval: Duration,
    snapshots: Arc<watch::Sender<TrackerSnapshot>>,

    cancel: Option<CancelHandle>,
    task: Option<JoinHandle<()>>,
}

impl TrackerChannel {
    pub fn new(config: TrackerConfig) -> MotionResult<Self> {
        Self::with_frame_interval(config, DEFAULT_FRAME_INTERVAL)
    }

    pub fn with_frame_interval(config: TrackerConfig, frame_interval: Duration) -> MotionResult<Self> {
        let tracker = CursorTracker::new(config)?;
        let (snapshots, _) = watch::channel(tracker.snapshot());

        Ok(Self {
            tracker: Arc::new(ParkingMutex::new(tracker)),
            is_running: Arc::new(AtomicBool::new(false)),
            frame_interval,
            snapshots: Arc::new(snapshots),
            cancel: None,
            task: None,
        })
    }

    pub fn is_running(&self) -> bool {
        self.is_running.load(Ordering::SeqCst)
    }

    /// Subscribe to published snapshots
    pub fn subscribe(&self) -> watch::Receiver<TrackerSnapshot> {
        self.snapshots.subscribe()
    }

    /// Current tracker state
    pub fn snapshot(&self) -> TrackerSnapshot {
        self.tracker.lock().snapshot()
    }

    /// Attach `source` and start the frame loop
    ///
    /// A disabled tracker never attaches listeners and starts nothing. A
    /// channel that has been stopped cannot be started again.
    pub async fn start<S>(&mut self, mut source: S) -> MotionResult<()>
    where
        S: InputSource + 'static,
    {
        if self.is_running() || self.task.is_some() {
            return Err(MotionError::AlreadyRunning);
        }

        {
            let tracker = self.tracker.lock();
            if tracker.is_torn_down() {
                return Err(MotionError::TornDown);
            }
            if !tracker.config().enabled {
                tracing::info!("Cursor tracker disabled, skipping start (channel={})", CHANNEL_NAME);
                return Ok(());
            }
        }

        source.attach().await?;

        let (cancel, signal) = cancel_pair();
        self.is_running.store(true, Ordering::SeqCst);

        let task = tokio::spawn(run_frame_loop(
            source,
            self.tracker.clone(),
            self.snapshots.clone(),
            self.is_running.clone(),
            FrameClock::new(self.frame_interval),
            signal,
        ));

        self.cancel = Some(cancel);
        self.task = Some(task);

        tracing::info!(
            "Cursor tracking started (channel={}, frame_interval={:?})",
            CHANNEL_NAME,
            self.frame_interval
        );
        Ok(())
    }

    /// Cancel the frame loop, detach the source and tear the tracker down
    ///
    /// Calling stop on a channel that is not running is a no-op.
    pub async fn stop(&mut self) -> MotionResult<()> {
        let Some(cancel) = self.cancel.take() else {
            return Ok(());
        };
        cancel.cancel();

        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                tracing::warn!("Cursor frame loop ended abnormally: {}", e);
            }
        }

        self.tracker.lock().teardown();
        self.is_running.store(false, Ordering::SeqCst);

        tracing::info!("Cursor tracking stopped (channel={})", CHANNEL_NAME);
        Ok(())
    }
}

impl Drop for TrackerChannel {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel.cancel();
        }
        self.tracker.lock().teardown();
    }
}

async fn run_frame_loop<S: InputSource>(
    mut source: S,
    tracker: Arc<ParkingMutex<CursorTracker>>,
    snapshots: Arc<watch::Sender<TrackerSnapshot>>,
    is_running: Arc<AtomicBool>,
    mut clock: FrameClock,
    mut signal: CancelSignal,
) {
    let mut source_open = true;
    let mut frames: u64 = 0;

    loop {
        let idle_at = tracker.lock().idle_deadline_ms().map(|ms| clock.instant_at(ms));
        let idle_sleep = async move {
            match idle_at {
                Some(at) => tokio::time::sleep_until(at).await,
                None => std::future::pending::<()>().await,
            }
        };

        tokio::select! {
            biased;

            _ = signal.cancelled() => break,

            event = source.next_event(), if source_open => match event {
                Some(event) => {
                    let now_ms = clock.now_ms();
                    let snapshot = {
                        let mut tracker = tracker.lock();
                        tracker.handle_event(event, now_ms);
                        tracker.snapshot()
                    };
                    snapshots.send_replace(snapshot);
                }
                None => {
                    tracing::debug!("Pointer input source exhausted");
                    source_open = false;
                }
            },

            _ = idle_sleep => {
                let now_ms = clock.now_ms();
                let snapshot = {
                    let mut tracker = tracker.lock();
                    tracker.advance_timers(now_ms);
                    tracker.snapshot()
                };
                snapshots.send_replace(snapshot);
            }

            tick = clock.next_frame() => {
                frames = tick.index;
                let snapshot = tracker.lock().tick(tick.now_ms);
                snapshots.send_replace(snapshot);
            }
        }
    }

    source.detach().await;
    is_running.store(false, Ordering::SeqCst);
    tracing::debug!("Cursor frame loop exited after {} frames", frames);
}
