//! Tracing initialization and configuration.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Initialize the Contour tracing/logging system.
///
/// Reads the `CONTOUR_LOG` environment variable for per-module log levels.
/// Format: `CONTOUR_LOG=contour_analysis::index=debug,contour_analysis=info`
///
/// Falls back to `contour=info` if `CONTOUR_LOG` is not set or is invalid.
/// Safe to call more than once.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env("CONTOUR_LOG")
            .unwrap_or_else(|_| EnvFilter::new("contour=info"));

        // A host may already own the global subscriber; keep theirs.
        let _ = tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true)
                    .with_writer(std::io::stderr),
            )
            .with(filter)
            .try_init();
    });
}
