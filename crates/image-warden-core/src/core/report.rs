// crates/image-warden-core/src/core/report.rs
// ============================================================================
// Module: Image Warden Batch Reports
// Description: Ordered per-record reports and batch summary counts.
// Purpose: Expose the batch result as a stable, serializable value.
// Dependencies: crate::core, serde
// ============================================================================

//! ## Overview
//! The batch result preserves input order: one entry per reported record,
//! where rejected records (normalization failures) appear as a distinct
//! category alongside fully evaluated records. Admission-filtered records are
//! excluded from the report entirely by design. Summary counts are derived by
//! the batch coordinator.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::core::descriptor::DeploymentDescriptor;
use crate::core::outcome::NormalizeError;
use crate::core::outcome::PlatformValidationResult;
use crate::core::outcome::RemediationOutcome;
use crate::core::verdict::ComplianceStatus;
use crate::core::verdict::ComplianceVerdict;

// ============================================================================
// SECTION: Per-Record Reports
// ============================================================================

/// Full pipeline outcome for one admitted descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluatedRecord {
    /// Canonical descriptor for the record.
    pub descriptor: DeploymentDescriptor,
    /// Platform liveness validation result.
    pub validation: PlatformValidationResult,
    /// Compliance verdict.
    pub verdict: ComplianceVerdict,
    /// Remediation decision outcome.
    pub remediation: RemediationOutcome,
}

/// One reported record, in input order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RecordReport {
    /// The record failed normalization and was excluded from later stages.
    Rejected {
        /// Index of the record in the batch input.
        input_index: usize,
        /// Terminal normalization failure.
        error: NormalizeError,
    },
    /// The record was admitted and evaluated through every stage.
    Evaluated {
        /// Index of the record in the batch input.
        input_index: usize,
        /// Full pipeline outcome.
        record: EvaluatedRecord,
    },
}

// ============================================================================
// SECTION: Batch Summary
// ============================================================================

/// Aggregate counts derived from the per-record reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSummary {
    /// Total reported records (admitted plus rejected).
    pub total_reported: usize,
    /// Records rejected during normalization.
    pub rejected: usize,
    /// Descriptors with a `Compliant` verdict.
    pub compliant: usize,
    /// Descriptors with a `NonCompliant` verdict.
    pub non_compliant: usize,
    /// Descriptors with an `Unknown` verdict.
    pub unknown: usize,
    /// Remediation triggers accepted by the collaborator.
    pub triggered: usize,
    /// Remediation triggers attempted but failed.
    pub trigger_failed: usize,
    /// Whether live mode was enabled for this run.
    pub live_mode: bool,
    /// Branch supplied to the remediation trigger.
    pub branch: String,
}

impl BatchSummary {
    /// Derives summary counts from per-record reports and run metadata.
    #[must_use]
    pub fn from_reports(reports: &[RecordReport], live_mode: bool, branch: String) -> Self {
        let mut summary = Self {
            total_reported: reports.len(),
            rejected: 0,
            compliant: 0,
            non_compliant: 0,
            unknown: 0,
            triggered: 0,
            trigger_failed: 0,
            live_mode,
            branch,
        };
        for report in reports {
            match report {
                RecordReport::Rejected {
                    ..
                } => summary.rejected += 1,
                RecordReport::Evaluated {
                    record, ..
                } => {
                    match record.verdict.status {
                        ComplianceStatus::Compliant => summary.compliant += 1,
                        ComplianceStatus::NonCompliant => summary.non_compliant += 1,
                        ComplianceStatus::Unknown => summary.unknown += 1,
                    }
                    if record.remediation.attempted {
                        if record.remediation.succeeded {
                            summary.triggered += 1;
                        } else {
                            summary.trigger_failed += 1;
                        }
                    }
                }
            }
        }
        summary
    }
}

// ============================================================================
// SECTION: Batch Result
// ============================================================================

/// Final result of one batch run, consumed by reporting.
///
/// # Invariants
/// - `records` preserves batch input order.
/// - Entities are created fresh per batch run and never shared across runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchResult {
    /// Per-record reports in input order.
    pub records: Vec<RecordReport>,
    /// Aggregate summary counts.
    pub summary: BatchSummary,
}
