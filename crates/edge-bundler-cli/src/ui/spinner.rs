//! Spinner shown while Rolldown runs.

use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use std::time::Duration;

/// Spinner for the bundling step.
///
/// Hidden in quiet mode, in CI, and when stderr is not a terminal.
pub struct Spinner {
    pb: ProgressBar,
}

impl Spinner {
    pub fn new(message: &str) -> Self {
        if super::is_quiet() || super::is_ci() || !console::user_attended_stderr() {
            return Self {
                pb: ProgressBar::hidden(),
            };
        }

        let pb = ProgressBar::new_spinner();
        let style = ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["◐", "◓", "◑", "◒"]);
        pb.set_style(style);
        pb.set_message(message.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));

        Self { pb }
    }

    pub fn set_message(&self, message: &str) {
        self.pb.set_message(message.to_string());
    }

    /// Finish with a green checkmark.
    pub fn finish(&self, message: &str) {
        if self.pb.is_hidden() {
            super::success(message);
        } else {
            self.pb
                .finish_with_message(format!("{} {}", "✓".green(), message));
        }
    }

    /// Finish with a red X. The error itself is reported by `main`.
    pub fn fail(&self, message: &str) {
        if self.pb.is_hidden() {
            return;
        }
        self.pb
            .finish_with_message(format!("{} {}", "✗".red(), message));
    }
}
