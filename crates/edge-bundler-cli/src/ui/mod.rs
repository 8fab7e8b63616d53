//! Terminal output: status messages, a spinner, and size/duration formatting.
//!
//! Everything goes to stderr so stdout stays clean for `schema`.
//!
//! ```no_run
//! use edge_bundler_cli::ui;
//!
//! ui::init(false, false);
//! let spinner = ui::Spinner::new("Bundling edge handlers...");
//! spinner.finish("Bundled 3 handlers");
//! ui::success("Wrote .edge/handlers/manifest.json");
//! ```

mod format;
mod messages;
mod spinner;

use std::sync::atomic::{AtomicBool, Ordering};

pub use format::{format_duration, format_size, print_bundle_summary};
pub use messages::{error, info, success, warning};
pub use spinner::Spinner;

static COLOR: AtomicBool = AtomicBool::new(true);
static QUIET: AtomicBool = AtomicBool::new(false);

/// Check if running in a CI environment.
pub fn is_ci() -> bool {
    std::env::var("CI").is_ok()
        || std::env::var("GITHUB_ACTIONS").is_ok()
        || std::env::var("GITLAB_CI").is_ok()
        || std::env::var("CIRCLECI").is_ok()
}

/// Check if color output should be enabled.
///
/// `NO_COLOR` disables colors, `FORCE_COLOR` enables them even without a
/// terminal; otherwise colors follow whether stderr is a terminal.
pub fn should_use_color() -> bool {
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    if std::env::var("FORCE_COLOR").is_ok() {
        return true;
    }

    console::user_attended_stderr()
}

/// Apply the global `--no-color` and `--quiet` flags. Call once from `main`.
pub fn init(no_color: bool, quiet: bool) {
    COLOR.store(!no_color && should_use_color(), Ordering::Relaxed);
    QUIET.store(quiet, Ordering::Relaxed);
}

pub(crate) fn colors_enabled() -> bool {
    COLOR.load(Ordering::Relaxed)
}

pub(crate) fn is_quiet() -> bool {
    QUIET.load(Ordering::Relaxed)
}
