//! Tracing initialization for the CLI.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Install the stderr subscriber.
///
/// `RECOLOR_LOG` takes per-module directives, e.g.
/// `RECOLOR_LOG=recolor_core::rewrite=debug,recolor_core::palette=warn`.
/// Without it the level is `info`, or `debug` when `verbose` is set.
pub fn init_tracing(verbose: bool) {
    INIT.call_once(|| {
        let default = if verbose {
            "recolor=debug,recolor_core=debug"
        } else {
            "recolor=info,recolor_core=info"
        };
        let filter = EnvFilter::try_from_env("RECOLOR_LOG").unwrap_or_else(|_| EnvFilter::new(default));

        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(verbose)
                    .without_time(),
            )
            .with(filter)
            .init();
    });
}
