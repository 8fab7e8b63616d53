//! Formatting utilities for sizes, durations, and the build summary.

use console::Term;
use edge_bundler::BundleManifest;
use owo_colors::OwoColorize;
use std::path::Path;
use std::time::Duration;

/// Format file size in human-readable format.
///
/// ```
/// use edge_bundler_cli::ui::format_size;
///
/// assert_eq!(format_size(0), "0 B");
/// assert_eq!(format_size(500), "500 B");
/// assert_eq!(format_size(1024), "1.00 KB");
/// assert_eq!(format_size(1_048_576), "1.00 MB");
/// ```
pub fn format_size(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB"];

    if bytes == 0 {
        return "0 B".to_string();
    }

    let mut size = bytes as f64;
    let mut unit_idx = 0;

    while size >= 1024.0 && unit_idx < UNITS.len() - 1 {
        size /= 1024.0;
        unit_idx += 1;
    }

    if unit_idx == 0 {
        format!("{} {}", size as u64, UNITS[unit_idx])
    } else {
        format!("{:.2} {}", size, UNITS[unit_idx])
    }
}

/// Format duration in human-readable format.
///
/// ```
/// use std::time::Duration;
/// use edge_bundler_cli::ui::format_duration;
///
/// assert_eq!(format_duration(Duration::from_millis(50)), "50ms");
/// assert_eq!(format_duration(Duration::from_millis(1500)), "1.50s");
/// ```
pub fn format_duration(duration: Duration) -> String {
    let total_ms = duration.as_millis();

    if total_ms < 1000 {
        format!("{}ms", total_ms)
    } else if total_ms < 60_000 {
        format!("{:.2}s", duration.as_secs_f64())
    } else {
        let secs = duration.as_secs();
        format!("{}m {}s", secs / 60, secs % 60)
    }
}

/// Print the handlers, hash, and size of a bundle to stderr.
///
/// `out_dir` is `None` when nothing was written.
pub fn print_bundle_summary(manifest: &BundleManifest, out_dir: Option<&Path>, duration: Duration) {
    if super::is_quiet() {
        return;
    }

    let width = (Term::stderr().size().1 as usize).min(80);
    let color = super::colors_enabled();

    if color {
        eprintln!("\n{}", "Edge Bundle".bold().underline());
    } else {
        eprintln!("\nEdge Bundle");
    }
    eprintln!("{}", "─".repeat(width));

    for handler in &manifest.handlers {
        if color {
            eprintln!("  {} {}", "▸".blue(), handler.bright_white().bold());
        } else {
            eprintln!("  ▸ {}", handler);
        }
    }
    if manifest.handlers.is_empty() {
        eprintln!("  (no handlers)");
    }

    eprintln!("{}", "─".repeat(width));

    let location = match out_dir {
        Some(dir) => dir.join(&manifest.sha_sum).display().to_string(),
        None => format!("{} (not written)", manifest.sha_sum),
    };
    let size = format_size(manifest.content_length);
    let time = format_duration(duration);
    if color {
        eprintln!(
            "  {} {} {} in {}",
            "Bundle:".bold(),
            location,
            size.green(),
            time.green()
        );
    } else {
        eprintln!("  Bundle: {} {} in {}", location, size, time);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(0), "0 B");
        assert_eq!(format_size(1023), "1023 B");
        assert_eq!(format_size(1536), "1.50 KB");
        assert_eq!(format_size(1_572_864), "1.50 MB");
        assert_eq!(format_size(2_147_483_648), "2.00 GB");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_millis(0)), "0ms");
        assert_eq!(format_duration(Duration::from_millis(999)), "999ms");
        assert_eq!(format_duration(Duration::from_millis(1000)), "1.00s");
        assert_eq!(format_duration(Duration::from_secs(90)), "1m 30s");
    }

    #[test]
    fn test_print_bundle_summary() {
        let manifest =
            BundleManifest::for_bundle("(function(){})();", vec!["example.js".to_string()]);
        print_bundle_summary(
            &manifest,
            Some(Path::new(".edge/handlers")),
            Duration::from_millis(120),
        );
        print_bundle_summary(&manifest, None, Duration::from_millis(5));
    }
}
