use tracing_subscriber::{fmt, EnvFilter};

/// Install the stderr logger. `RUST_LOG` wins over the verbosity flag.
///
/// The subscriber's `tracing-log` bridge picks up the `log` records emitted
/// by the FlowMart crates.
pub fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    // A second init (e.g. from tests) keeps the first subscriber
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .compact()
        .try_init();
}
