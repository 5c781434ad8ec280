//! Separator line scanner
//!
//! Finds horizontal separator bands (the thin gray rules a terminal UI draws
//! above and below its input box) in a screenshot that has already been
//! decoded into an RGB pixel grid.

pub mod analysis;
pub mod bounds;
pub mod detection;
pub mod paths;
pub mod preview;

pub use bounds::{Bounds, BoundsEdges, InputArea, PairSelection};
pub use detection::{DetectError, DetectionConfig, LineRegion, PixelGrid, ScanDirection, ScanRange};

use chrono::Local;
use std::fs::OpenOptions;
use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};

static LOG_ENABLED: AtomicBool = AtomicBool::new(true);

/// Enables or disables [`log`] output for the whole process.
pub fn set_log_enabled(enabled: bool) {
    LOG_ENABLED.store(enabled, Ordering::Relaxed);
}

/// Whether [`log`] currently writes anything. Check before formatting
/// messages on hot paths.
pub fn log_enabled() -> bool {
    LOG_ENABLED.load(Ordering::Relaxed)
}

/// Logs a message to both console and log file with timestamp.
pub fn log(msg: &str) {
    if !log_enabled() {
        return;
    }
    let timestamp = Local::now().format("%H:%M:%S%.3f");
    let line = format!("[{}] {}\n", timestamp, msg);
    print!("{}", line);
    let log_path = paths::get_logs_dir().join("detection.log");
    if let Ok(mut file) = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
    {
        let _ = file.write_all(line.as_bytes());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_disabled_flag() {
        set_log_enabled(false);
        assert!(!log_enabled());
        // No output and no file write while disabled
        log("ignored");
    }
}
