use std::io::{IsTerminal, stderr};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_DIRECTIVE: &str = "refresh_probe=warn";
const VERBOSE_DIRECTIVE: &str = "refresh_probe=debug";

/// Initialize logging on stderr, leaving stdout to the probe output.
pub fn init_logging(verbose: bool) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(stderr)
                .with_ansi(stderr().is_terminal())
                .with_target(false),
        )
        .with(log_filter(std::env::var("RUST_LOG").ok().as_deref(), verbose))
        .init();
}

/// Builds the event filter.
///
/// `RUST_LOG` replaces the warn-only default entirely. `verbose` raises the crate to debug
/// on top of whichever of the two is in effect.
fn log_filter(rust_log: Option<&str>, verbose: bool) -> EnvFilter {
    let filter = match rust_log.filter(|s| !s.trim().is_empty()) {
        Some(directives) => EnvFilter::builder().parse_lossy(directives),
        None => EnvFilter::new(DEFAULT_DIRECTIVE),
    };

    if verbose {
        filter.add_directive(VERBOSE_DIRECTIVE.parse().expect("Invalid log directive"))
    } else {
        filter
    }
}
