//! Diagnostic logging for the watchlog binary
//!
//! Diagnostics go to stderr; stdout is reserved for the usage message. The
//! audit trail itself is written by `LogSink`, not through tracing.
//!
//! `RUST_LOG` overrides the default filter:
//! ```bash
//! RUST_LOG=info watchlog /tmp/f
//! RUST_LOG=watchlog_watcher=debug watchlog /tmp/f 10
//! ```

use std::sync::Once;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Quiet unless something goes wrong
pub const DEFAULT_FILTER: &str = "warn";

static INIT: Once = Once::new();

/// Compact time format: HH:MM:SS.mmm
struct CompactTime;

impl FormatTime for CompactTime {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(w, "{}", chrono::Local::now().format("%H:%M:%S%.3f"))
    }
}

/// Install the stderr subscriber; later calls are no-ops
pub fn init() {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_timer(CompactTime)
            .with_filter(filter);

        tracing_subscriber::registry().with(fmt_layer).init();
    });
}
