//! Structured logging, controlled by `RUST_LOG`. Pure core, instrumented
//! shell: the engine, parsers, detector, and clusterer never log directly —
//! only the CLI boundary and the engine's phase-level spans do.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the global tracing subscriber. `verbosity` is the CLI's
/// repeated `-v` count: 0 → warnings and errors only, 1 → info, 2+ → debug.
/// Explicitly setting `RUST_LOG` always wins over `verbosity`.
pub fn init_tracing(verbosity: u8, quiet: bool) {
    let default_level = if quiet {
        "error"
    } else {
        match verbosity {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}
