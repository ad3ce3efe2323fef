//! Portfolio Motion - cursor trailing and page transitions for the portfolio site.
//!
//! This is the main library crate. It provides the cursor position tracker,
//! the transition variant registry with its presence controller, and the
//! offline commands used by the `motion-replay` binary.

pub mod commands;
pub mod config;
pub mod error;
pub mod input;
pub mod processing;
pub mod scheduler;
pub mod transitions;

pub use config::MotionConfig;
pub use error::{MotionError, MotionResult};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize tracing/logging
///
/// `RUST_LOG` overrides the default filter.
pub fn init_tracing() {
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "portfolio_motion=debug,motion_replay=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}
