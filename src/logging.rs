//! Console logging for hosts embedding the pipeline.
//!
//! The pipeline crates only emit `tracing` events. Hosts that do not install
//! their own subscriber can call [`install_tracing`] once at startup.

use std::sync::Once;

use tracing_subscriber::prelude::*;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

const DEFAULT_FILTER: &str = "info";

static TRACING_INSTALLED: Once = Once::new();

/// Installs a console subscriber (idempotent).
///
/// The filter comes from `RUST_LOG` and defaults to `info`. Use
/// `RUST_LOG=tideui_pipeline=trace` to follow every dirty-node decision.
/// Does nothing if another global subscriber is already set.
pub fn install_tracing() {
    TRACING_INSTALLED.call_once(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
        let console = fmt::layer()
            .with_target(true)
            .with_ansi(false)
            .with_filter(filter);

        if tracing_subscriber::registry()
            .with(console)
            .try_init()
            .is_err()
        {
            eprintln!("TideUI tracing subscriber failed to initialize");
        }
    });
}
