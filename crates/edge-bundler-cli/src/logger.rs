//! Logging setup for the CLI.
//!
//! The library emits `tracing` events at every pipeline step; this module
//! installs the subscriber that prints them.
//!
//! ```rust,no_run
//! use edge_bundler_cli::logger::init_logger;
//!
//! init_logger(false, false, false);
//! tracing::info!("Starting build");
//! ```

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const VERBOSE_FILTER: &str = "edge_bundler=debug,edge_bundler_cli=debug";
const QUIET_FILTER: &str = "edge_bundler=error,edge_bundler_cli=error";
const DEFAULT_FILTER: &str = "edge_bundler=info,edge_bundler_cli=info";

/// Initialize the tracing subscriber.
///
/// The filter is picked in this order:
/// 1. `--verbose`: DEBUG for edge-bundler crates
/// 2. `--quiet`: ERROR only
/// 3. `RUST_LOG`
/// 4. INFO for edge-bundler crates
///
/// Call once, at startup.
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool) {
    init_logger_with_filter(select_filter(verbose, quiet), no_color);
}

/// Initialize the tracing subscriber with an explicit filter.
pub fn init_logger_with_filter(filter: EnvFilter, no_color: bool) {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color && crate::ui::should_use_color())
        .without_time()
        .compact();

    // A subscriber may already be installed when running inside tests.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}

fn select_filter(verbose: bool, quiet: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new(VERBOSE_FILTER)
    } else if quiet {
        EnvFilter::new(QUIET_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_verbose_filter_wins() {
        let filter = select_filter(true, false);
        assert!(filter.to_string().contains("edge_bundler=debug"));
    }

    #[test]
    #[serial]
    fn test_quiet_filter_ignores_rust_log() {
        unsafe {
            std::env::set_var("RUST_LOG", "trace");
        }
        let filter = select_filter(false, true);
        unsafe {
            std::env::remove_var("RUST_LOG");
        }
        assert!(filter.to_string().contains("edge_bundler=error"));
    }

    #[test]
    #[serial]
    fn test_default_filter_without_rust_log() {
        unsafe {
            std::env::remove_var("RUST_LOG");
        }
        let filter = select_filter(false, false);
        assert!(filter.to_string().contains("edge_bundler=info"));
    }
}
