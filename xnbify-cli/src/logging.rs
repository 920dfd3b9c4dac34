//! Logging setup.

use tracing_subscriber::EnvFilter;

/// Default filter when neither `RUST_LOG` nor the config file set one.
const DEFAULT_LEVEL: &str = "info";

/// Install the global `tracing` subscriber, writing to stderr.
///
/// `--verbose` forces `debug`; otherwise `RUST_LOG` wins over the config
/// file's `[logging] level`.
pub fn init(verbose: bool, config_level: Option<&str>) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(config_level.unwrap_or(DEFAULT_LEVEL)))
    };

    // Ignore the error if a subscriber is already installed (tests)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
