// crates/image-warden-core/src/core/verdict.rs
// ============================================================================
// Module: Image Warden Compliance Verdicts
// Description: Staleness classification for one deployment descriptor.
// Purpose: Provide a deterministic, reportable compliance verdict.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! A compliance verdict classifies one descriptor's current base-image
//! version against its resolved stream history. `Unknown` covers both
//! unresolvable streams and versions absent from the known history; it is
//! treated as maximally stale for dispatch purposes while remaining
//! distinguishable from `NonCompliant` in every report.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Compliance Status
// ============================================================================

/// Compliance status of one deployment descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplianceStatus {
    /// Current version is the latest known version of its stream.
    Compliant,
    /// Current version is present in the stream history but behind latest.
    NonCompliant,
    /// Stream could not be resolved, or the current version is absent from
    /// the known history.
    Unknown,
}

// ============================================================================
// SECTION: Compliance Verdict
// ============================================================================

/// Deterministic staleness classification for one descriptor.
///
/// # Invariants
/// - `staleness_rank` is `Some` exactly when `status` is `Compliant` (rank 0)
///   or `NonCompliant` (rank >= 1); `Unknown` carries no rank.
/// - `latest_version` is `Some` whenever the stream history was resolvable;
///   an `Unknown` verdict with `latest_version: None` therefore signals a
///   resolution failure, while `Unknown` with `Some` signals a current
///   version absent from the resolved history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceVerdict {
    /// Compliance status.
    pub status: ComplianceStatus,
    /// 0-based distance from the latest version, when meaningful.
    pub staleness_rank: Option<usize>,
    /// Latest known version of the descriptor's stream, when resolvable.
    pub latest_version: Option<String>,
}

impl ComplianceVerdict {
    /// Returns the verdict for a descriptor whose stream history could not
    /// be resolved.
    #[must_use]
    pub const fn unresolved() -> Self {
        Self {
            status: ComplianceStatus::Unknown,
            staleness_rank: None,
            latest_version: None,
        }
    }

    /// Returns true when the verdict permits remediation dispatch.
    ///
    /// `Unknown` is actionable: an unrecognized current version is itself a
    /// drift signal. The verdict status stays `Unknown` for reporting.
    #[must_use]
    pub const fn requires_remediation(&self) -> bool {
        !matches!(self.status, ComplianceStatus::Compliant)
    }

    /// Returns the staleness label surfaced in reports (`N`, `N-<rank>`, or
    /// `unknown`).
    #[must_use]
    pub fn staleness_label(&self) -> String {
        match (self.status, self.staleness_rank) {
            (ComplianceStatus::Compliant, _) => "N".to_string(),
            (ComplianceStatus::NonCompliant, Some(rank)) => format!("N-{rank}"),
            _ => "unknown".to_string(),
        }
    }
}
