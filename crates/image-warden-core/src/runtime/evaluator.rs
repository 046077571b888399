// crates/image-warden-core/src/runtime/evaluator.rs
// ============================================================================
// Module: Image Warden Compliance Evaluator
// Description: Pure staleness classification within one stream.
// Purpose: Compare the deployed version against the ranked stream history.
// Dependencies: crate::core
// ============================================================================

//! ## Overview
//! Evaluation is a pure function with no side effects and no I/O. The
//! deployed version is located in the resolved history by exact string match,
//! restricted to the descriptor's own stream: a version string from a
//! different stream is never compared, and such a mismatch yields `Unknown`.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::descriptor::DeploymentDescriptor;
use crate::core::verdict::ComplianceStatus;
use crate::core::verdict::ComplianceVerdict;
use crate::core::versions::VersionRecord;

// ============================================================================
// SECTION: Evaluation
// ============================================================================

/// Evaluates a descriptor's compliance against a resolved version record.
///
/// Rank 0 yields `Compliant`; rank >= 1 yields `NonCompliant` with that
/// staleness rank; a version absent from the history yields `Unknown`
/// (maximally stale, still actionable downstream). A record from a different
/// stream yields `Unknown` without any comparison.
#[must_use]
pub fn evaluate(descriptor: &DeploymentDescriptor, record: &VersionRecord) -> ComplianceVerdict {
    if record.stream_id != descriptor.stream_key {
        return ComplianceVerdict::unresolved();
    }

    let latest_version = record.latest().map(ToString::to_string);
    match record.rank_of(&descriptor.current_version) {
        Some(0) => ComplianceVerdict {
            status: ComplianceStatus::Compliant,
            staleness_rank: Some(0),
            latest_version,
        },
        Some(rank) => ComplianceVerdict {
            status: ComplianceStatus::NonCompliant,
            staleness_rank: Some(rank),
            latest_version,
        },
        None => ComplianceVerdict {
            status: ComplianceStatus::Unknown,
            staleness_rank: None,
            latest_version,
        },
    }
}
