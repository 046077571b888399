// crates/image-warden-core/src/core/outcome.rs
// ============================================================================
// Module: Image Warden Stage Outcomes
// Description: Per-record outcomes for validation, normalization, dispatch.
// Purpose: Keep every per-record failure distinguishable for reporting.
// Dependencies: crate::core::identifiers, serde, thiserror
// ============================================================================

//! ## Overview
//! Every pipeline stage records its outcome per descriptor. No per-record
//! failure escalates to abort the batch; outcomes are accumulated into the
//! batch result so that nothing is swallowed except admission skips.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::core::identifiers::PipelineRef;

// ============================================================================
// SECTION: Normalization Errors
// ============================================================================

/// Per-record terminal normalization failure.
///
/// # Invariants
/// - Variants are stable for programmatic handling and report serialization.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NormalizeError {
    /// A required descriptor field is missing or empty.
    #[error("required field missing: {field}")]
    FieldMissing {
        /// Name of the missing descriptor field.
        field: String,
    },
    /// The platform kind value does not map to a known platform.
    #[error("unknown platform kind: {value}")]
    UnknownPlatform {
        /// Raw platform value from the record.
        value: String,
    },
}

// ============================================================================
// SECTION: Platform Validation
// ============================================================================

/// Reason a descriptor's deployment was not confirmed live.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LivenessReason {
    /// The platform has no deployment matching the descriptor.
    NotFound,
    /// The deployment exists but currently has zero instances.
    NoRunningInstances,
    /// The platform collaborator could not be reached; treated identically to
    /// "not live" so that remediation never targets an unconfirmed service.
    Unreachable {
        /// Transport or auth failure detail.
        detail: String,
    },
}

/// Result of the platform liveness check for one descriptor.
///
/// # Invariants
/// - Created once per descriptor per batch run; never mutated.
/// - `reason` is `Some` exactly when `is_live` is false.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformValidationResult {
    /// True when the deployment was confirmed live on its platform.
    pub is_live: bool,
    /// Reason the deployment is not considered live, when applicable.
    pub reason: Option<LivenessReason>,
}

impl PlatformValidationResult {
    /// Returns a confirmed-live result.
    #[must_use]
    pub const fn live() -> Self {
        Self {
            is_live: true,
            reason: None,
        }
    }

    /// Returns a not-live result with the given reason.
    #[must_use]
    pub const fn not_live(reason: LivenessReason) -> Self {
        Self {
            is_live: false,
            reason: Some(reason),
        }
    }
}

// ============================================================================
// SECTION: Remediation Outcomes
// ============================================================================

/// Reason a remediation dispatch was skipped or failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RemediationReason {
    /// The verdict does not require remediation.
    Compliant,
    /// The deployment was not confirmed live on its platform.
    NotLive,
    /// Live mode is disabled; the trigger would otherwise have fired.
    DryRun,
    /// The trigger collaborator rejected or failed the request.
    TriggerFailed {
        /// Failure cause reported by the collaborator.
        cause: String,
    },
}

/// Recorded outcome of the remediation decision for one descriptor.
///
/// # Invariants
/// - At most one trigger attempt per descriptor per batch run.
/// - `pipeline_ref` is `Some` only for successful attempts.
/// - `reason` is `None` only for successful attempts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemediationOutcome {
    /// True when the trigger collaborator was invoked.
    pub attempted: bool,
    /// True when the collaborator accepted the trigger.
    pub succeeded: bool,
    /// Opaque pipeline reference returned by the collaborator.
    pub pipeline_ref: Option<PipelineRef>,
    /// Skip or failure cause, when the dispatch did not succeed.
    pub reason: Option<RemediationReason>,
}

impl RemediationOutcome {
    /// Returns an outcome for a gated (not attempted) dispatch.
    #[must_use]
    pub const fn skipped(reason: RemediationReason) -> Self {
        Self {
            attempted: false,
            succeeded: false,
            pipeline_ref: None,
            reason: Some(reason),
        }
    }

    /// Returns an outcome for a successful trigger.
    #[must_use]
    pub const fn triggered(pipeline_ref: PipelineRef) -> Self {
        Self {
            attempted: true,
            succeeded: true,
            pipeline_ref: Some(pipeline_ref),
            reason: None,
        }
    }

    /// Returns an outcome for an attempted trigger the collaborator failed.
    #[must_use]
    pub const fn failed(cause: String) -> Self {
        Self {
            attempted: true,
            succeeded: false,
            pipeline_ref: None,
            reason: Some(RemediationReason::TriggerFailed {
                cause,
            }),
        }
    }
}
