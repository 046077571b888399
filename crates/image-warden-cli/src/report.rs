// crates/image-warden-cli/src/report.rs
// ============================================================================
// Module: Batch Report Output
// Description: JSON report persistence and human-readable batch summary.
// Purpose: Render one batch run for machines and for operators.
// Dependencies: image-warden-core, serde_json, time
// ============================================================================

//! ## Overview
//! Each batch run produces two artifacts: a timestamped JSON report written
//! into the output directory, and a text summary rendered to stdout. The JSON
//! report carries the full per-record detail; the summary carries counts and
//! the non-compliant roster.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt::Write as _;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

use image_warden_core::BatchResult;
use image_warden_core::ComplianceStatus;
use image_warden_core::RecordReport;
use thiserror::Error;
use time::OffsetDateTime;
use time::macros::format_description;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Report output errors.
#[derive(Debug, Error)]
pub enum ReportError {
    /// The report could not be serialized.
    #[error("report serialization failed: {0}")]
    Serialize(String),
    /// The report file could not be written.
    #[error("report write failed: {0}")]
    Write(String),
}

// ============================================================================
// SECTION: JSON Report
// ============================================================================

/// Writes the batch result as a timestamped JSON report file.
///
/// Returns the path of the written report.
///
/// # Errors
///
/// Returns [`ReportError`] when serialization or the filesystem write fails.
pub fn write_json_report(result: &BatchResult, output_dir: &Path) -> Result<PathBuf, ReportError> {
    let timestamp = OffsetDateTime::now_utc()
        .format(format_description!(
            "[year][month][day]_[hour][minute][second]"
        ))
        .map_err(|err| ReportError::Write(err.to_string()))?;
    let path = output_dir.join(format!("report_{timestamp}.json"));

    let body = serde_json::to_vec_pretty(result)
        .map_err(|err| ReportError::Serialize(err.to_string()))?;
    fs::create_dir_all(output_dir).map_err(|err| ReportError::Write(err.to_string()))?;
    fs::write(&path, body).map_err(|err| ReportError::Write(err.to_string()))?;
    Ok(path)
}

// ============================================================================
// SECTION: Text Summary
// ============================================================================

/// Renders the operator-facing batch summary.
#[must_use]
pub fn render_summary(result: &BatchResult) -> String {
    let summary = &result.summary;
    let mode = if summary.live_mode { "live" } else { "dry-run" };
    let evaluated = summary.compliant + summary.non_compliant + summary.unknown;

    let mut text = String::new();
    let _ = writeln!(text, "batch audit complete ({mode}, branch {})", summary.branch);
    let _ = writeln!(text, "  records reported:  {}", summary.total_reported);
    let _ = writeln!(text, "  rejected:          {}", summary.rejected);
    let _ = writeln!(text, "  compliant:         {}", summary.compliant);
    let _ = writeln!(text, "  non-compliant:     {}", summary.non_compliant);
    let _ = writeln!(text, "  unknown:           {}", summary.unknown);
    let _ = writeln!(text, "  triggered:         {}", summary.triggered);
    let _ = writeln!(text, "  trigger failures:  {}", summary.trigger_failed);
    if evaluated > 0 {
        let rate = summary.compliant * 100 / evaluated;
        let _ = writeln!(text, "  compliance rate:   {rate}%");
    }

    let mut actionable = Vec::new();
    for report in &result.records {
        if let RecordReport::Evaluated {
            record, ..
        } = report
        {
            if record.verdict.status != ComplianceStatus::Compliant {
                actionable.push(record);
            }
        }
    }
    if !actionable.is_empty() {
        let _ = writeln!(text, "  needing attention:");
        for record in actionable {
            let latest = record.verdict.latest_version.as_deref().unwrap_or("?");
            let _ = writeln!(
                text,
                "    {} [{}] {} -> {} ({})",
                record.descriptor.service_name,
                record.descriptor.stream_key,
                record.descriptor.current_version,
                latest,
                record.verdict.staleness_label(),
            );
        }
    }
    text
}

// ============================================================================
// SECTION: Tests
// ============================================================================
