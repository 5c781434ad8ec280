//! Detection reports.
//!
//! This module provides:
//! - A serializable summary of one scan (`DetectionReport`)
//! - Human-readable line listings for the console
//! - JSON export of reports

pub mod export;
pub mod report;

pub use export::export_to_json;
pub use report::DetectionReport;
