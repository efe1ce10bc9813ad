//! Logging setup for the replay driver
//!
//! The library only emits `tracing` events. Useful targets:
//! - `cellgrid::coordinator` - edit-slot grants, evictions and releases
//! - `cellgrid::controller` - open, commit, cancel and fail-closed writes
//! - `cellgrid::overlay` - width pinning and resyncs
//!
//! stderr follows `RUST_LOG` (default `warn`); stdout is left to the JSON
//! event stream. A debug-level copy goes to `logs/cellgrid.log` under the
//! config directory, rotated daily.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

const LOG_FILE: &str = "cellgrid.log";

/// Install the stderr and log-file layers
///
/// Calling it again keeps the first subscriber.
pub fn init() {
    let stderr_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_filter(stderr_filter);

    let file_layer = crate::config_paths::ensure_logs_dir()
        .map(|dir| {
            fmt::layer()
                .with_writer(tracing_appender::rolling::daily(dir, LOG_FILE))
                .with_ansi(false)
                .with_target(true)
                .with_line_number(true)
                .with_filter(EnvFilter::new("debug"))
        })
        .map_err(|e| eprintln!("cellgrid: file logging disabled ({})", e))
        .ok();

    let _ = tracing_subscriber::registry()
        .with(stderr_layer)
        .with(file_layer)
        .try_init();
}
