//! Tracing subscriber setup for the CLI

use tracing_subscriber::layer::SubscriberExt as _;
use tracing_subscriber::util::SubscriberInitExt as _;
use tracing_subscriber::EnvFilter;

/// Environment variable overriding the log filter
pub const LOG_ENV: &str = "PLANAR_LOG";

/// Install a compact stderr logger.
///
/// `PLANAR_LOG` takes precedence; otherwise `verbose` selects debug and
/// `quiet` drops to warnings only.
pub fn init_tracing(verbose: bool, quiet: bool) {
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .compact();

    // A second init (e.g. from tests) is not an error worth reporting.
    let _ = tracing_subscriber::registry()
        .with(build_env_filter(verbose, quiet))
        .with(fmt_layer)
        .try_init();
}

fn build_env_filter(verbose: bool, quiet: bool) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_env(LOG_ENV) {
        return filter;
    }
    EnvFilter::new(default_level(verbose, quiet))
}

fn default_level(verbose: bool, quiet: bool) -> &'static str {
    if verbose {
        "debug"
    } else if quiet {
        "warn"
    } else {
        "info"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_level() {
        assert_eq!(default_level(false, false), "info");
        assert_eq!(default_level(true, false), "debug");
        assert_eq!(default_level(false, true), "warn");
        assert_eq!(default_level(true, true), "debug");
    }
}
