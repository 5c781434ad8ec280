//! JSON export for detection reports.

use super::report::DetectionReport;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Export a report to a JSON file.
///
/// The output is pretty-printed for human readability.
pub fn export_to_json(report: &DetectionReport, output_path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(report).context(format!(
        "Failed to serialize detection report ({} lines)",
        report.lines.len()
    ))?;

    let mut file = File::create(output_path).context(format!(
        "Failed to create detection report: {}",
        output_path.display()
    ))?;

    file.write_all(json.as_bytes()).context(format!(
        "Failed to write detection report: {}",
        output_path.display()
    ))?;

    Ok(())
}
