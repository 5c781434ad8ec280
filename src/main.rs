//! Separator Scan
//!
//! Command-line front end: decodes a screenshot, finds the separator lines
//! and optionally the input area between them.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use separator_scan::analysis::{export_to_json, DetectionReport};
use separator_scan::bounds::{detect_input_area, select_pair_with, PairSelection};
use separator_scan::detection::{
    detect_lines, DetectionConfig, GroupingPolicy, PixelGrid, ScanDirection,
};
use separator_scan::{log, paths, preview, set_log_enabled};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PolicyArg {
    Contiguous,
    Nearest,
}

impl From<PolicyArg> for GroupingPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Contiguous => GroupingPolicy::Contiguous,
            PolicyArg::Nearest => GroupingPolicy::Nearest,
        }
    }
}

#[derive(Parser, Debug)]
#[command(version, about = "Find horizontal separator lines in a terminal screenshot")]
struct Args {
    /// Screenshot to scan
    image: Option<PathBuf>,

    /// Detection config (JSON). Defaults to detection_config.json next to the executable
    #[arg(long)]
    config: Option<PathBuf>,

    /// Grouping policy, overrides the config
    #[arg(long, value_enum)]
    policy: Option<PolicyArg>,

    /// Scan from the bottom of the image upward
    #[arg(long)]
    bottom_up: bool,

    /// Stop after this many lines
    #[arg(long)]
    max_lines: Option<usize>,

    /// Search for the input area bounded by two lines
    #[arg(long)]
    bounds: bool,

    /// Write the report as JSON
    #[arg(long)]
    json: Option<PathBuf>,

    /// Write an annotated copy of the image
    #[arg(long)]
    preview: Option<PathBuf>,

    /// Write the default config to this path and exit
    #[arg(long)]
    write_default_config: Option<PathBuf>,

    /// Suppress log output
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    set_log_enabled(!args.quiet);

    if let Some(path) = &args.write_default_config {
        DetectionConfig::save_default(path)
            .context(format!("Failed to write config: {}", path.display()))?;
        println!("Default config written to {}", path.display());
        return Ok(());
    }

    // Logging is best effort, a missing log directory only loses the file copy
    if let Err(e) = paths::ensure_directories() {
        eprintln!("Warning: failed to create log directory: {}", e);
    }

    let image_path = args
        .image
        .clone()
        .context("No image given. Usage: separator-scan <IMAGE>")?;

    let config_path = args
        .config
        .clone()
        .unwrap_or_else(paths::get_default_config_path);
    let mut config = DetectionConfig::load(&config_path);
    apply_overrides(&mut config, &args);
    config.validate()?;

    log(&format!("Loading: {}", image_path.display()));
    let screenshot = image::open(&image_path)
        .context(format!("Failed to open image: {}", image_path.display()))?
        .to_rgb8();
    let (width, height) = screenshot.dimensions();
    log(&format!("Image size: {}x{}", width, height));

    let lines = detect_lines(&screenshot, &config);
    let mut report = DetectionReport::new(width, height, config.clone(), lines);

    if args.bounds {
        report = attach_bounds(report, &screenshot, &config);
    }

    for line in report.describe() {
        println!("{}", line);
    }

    if let Some(path) = &args.json {
        export_to_json(&report, path)?;
        log(&format!("Report JSON saved: {}", path.display()));
    }

    if let Some(path) = &args.preview {
        let annotated = preview::render_preview(&screenshot, &report.lines, report.bounds.as_ref());
        preview::save_preview(&annotated, path)?;
        log(&format!("Preview saved: {}", path.display()));
    }

    Ok(())
}

/// Runs the input area search, falling back to the closest pair of scanned
/// lines whose spacing fits the area limits.
fn attach_bounds<G: PixelGrid + ?Sized>(
    report: DetectionReport,
    grid: &G,
    config: &DetectionConfig,
) -> DetectionReport {
    let area = detect_input_area(grid, &config.area, config);
    let report = report.with_input_area(area);
    if report.bounds.is_some() {
        return report;
    }

    let bounds = select_pair_with(
        &report.lines,
        PairSelection::Constrained {
            min_height: config.area.min_line_separation,
            max_height: config.area.max_area_height,
        },
        config.area.edges,
    );
    report.with_bounds(bounds)
}

fn apply_overrides(config: &mut DetectionConfig, args: &Args) {
    if let Some(policy) = args.policy {
        config.grouping.policy = policy.into();
    }
    if args.bottom_up {
        config.scan.direction = ScanDirection::BottomUp;
    }
    if args.max_lines.is_some() {
        config.grouping.max_lines = args.max_lines;
    }
}
