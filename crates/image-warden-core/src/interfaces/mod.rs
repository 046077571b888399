// crates/image-warden-core/src/interfaces/mod.rs
// ============================================================================
// Module: Image Warden Interfaces
// Description: Backend-agnostic collaborator interfaces for the pipeline.
// Purpose: Define the contract surfaces the core runtime depends on.
// Dependencies: crate::core
// ============================================================================

//! ## Overview
//! Interfaces define how Image Warden integrates with external collaborators
//! (telemetry source, platform lookups, version authority, remediation
//! trigger) without embedding backend-specific details. Implementations make
//! a single attempt per call; the core mandates no retries or backoff, and
//! unreachable collaborators must surface as errors rather than fabricated
//! results so the pipeline can fail closed.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::core::identifiers::PipelineRef;
use crate::core::identifiers::StreamKey;
use crate::core::record::RawRecord;

// ============================================================================
// SECTION: Telemetry Source
// ============================================================================

/// Telemetry source errors.
///
/// Structural input failure is the only batch-fatal condition in the system.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The telemetry input could not be read.
    #[error("telemetry read error: {0}")]
    Io(String),
    /// The telemetry input is not structurally parseable.
    #[error("telemetry parse error: {0}")]
    Parse(String),
    /// The telemetry input exceeds the configured size limit.
    #[error("telemetry input too large: {0} bytes")]
    TooLarge(usize),
}

/// Source of raw attribute-bag records for one batch run.
pub trait RecordSource {
    /// Yields the batch's raw records in source order.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] when the input cannot be read or parsed.
    fn records(&self) -> Result<Vec<RawRecord>, SourceError>;
}

// ============================================================================
// SECTION: Platform Lookups
// ============================================================================

/// Platform lookup errors.
///
/// Unreachability (network or auth failure) is deliberately distinct from a
/// "not found" result, which is reported through the status types below.
#[derive(Debug, Error)]
pub enum LookupError {
    /// The platform collaborator could not be reached.
    #[error("platform unreachable: {detail}")]
    Unreachable {
        /// Transport or auth failure detail.
        detail: String,
    },
}

/// Platform-A deployment status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentStatus {
    /// True when a deployment object was found.
    pub found: bool,
    /// Current instance count; zero instances means not live, not missing.
    pub instance_count: u64,
}

/// Read-only lookup against the platform-A (container platform) backend.
pub trait PlatformALookup {
    /// Looks up a deployment named `profile_name` within `namespace`.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError`] when the backend cannot be reached.
    fn lookup(&self, namespace: &str, profile_name: &str)
    -> Result<DeploymentStatus, LookupError>;
}

/// Identity of a platform-B service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceIdentity {
    /// Service name.
    pub service_name: String,
    /// Deployment region.
    pub region: String,
}

/// Platform-B service status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceStatus {
    /// True when a matching service was found.
    pub found: bool,
    /// Desired task count; zero means not live.
    pub desired_count: u64,
}

/// Read-only lookup against the platform-B (cloud) backend.
pub trait PlatformBLookup {
    /// Looks up a service by identity.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError`] when the backend cannot be reached.
    fn lookup(&self, identity: &ServiceIdentity) -> Result<ServiceStatus, LookupError>;
}

// ============================================================================
// SECTION: Version Authority
// ============================================================================

/// Version authority errors.
#[derive(Debug, Error)]
pub enum AuthorityError {
    /// The authority has no knowledge of the stream.
    #[error("stream not found: {stream}")]
    StreamNotFound {
        /// Stream key that was queried.
        stream: String,
    },
    /// The authority could not be reached.
    #[error("version authority unavailable: {detail}")]
    Unavailable {
        /// Transport failure detail.
        detail: String,
    },
}

/// One version listing returned by the authority.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionListing {
    /// Version string as published.
    pub version: String,
    /// Recency indicator in unix milliseconds, when the authority provides
    /// one; listings without an indicator sort oldest.
    pub made_live_millis: Option<i64>,
}

/// Read-only version history lookup against the compliance source of truth.
pub trait VersionAuthority {
    /// Returns the version listings for a stream key.
    ///
    /// Ordering is assumed descending by recency but is not relied upon; the
    /// resolver re-sorts by the recency indicator before assigning ranks.
    ///
    /// # Errors
    ///
    /// Returns [`AuthorityError`] when the stream is unknown or the authority
    /// is unreachable.
    fn versions(&self, stream: &StreamKey) -> Result<Vec<VersionListing>, AuthorityError>;
}

// ============================================================================
// SECTION: Remediation Trigger
// ============================================================================

/// Remediation trigger errors.
#[derive(Debug, Error)]
pub enum TriggerError {
    /// The collaborator rejected the trigger request.
    #[error("trigger rejected with status {status}")]
    Rejected {
        /// HTTP status code returned by the collaborator.
        status: u16,
    },
    /// The collaborator could not be reached.
    #[error("trigger transport error: {detail}")]
    Transport {
        /// Transport failure detail.
        detail: String,
    },
}

/// Deterministic parameter set for one remediation trigger call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerRequest {
    /// Remediation target project path.
    pub project_path: String,
    /// Branch the rebuild pipeline runs against.
    pub branch: String,
    /// Pipeline variables.
    pub variables: BTreeMap<String, String>,
}

/// Receipt returned by an accepted trigger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerReceipt {
    /// Opaque pipeline reference.
    pub pipeline_ref: PipelineRef,
}

/// Write-side collaborator that starts a rebuild pipeline.
///
/// The collaborator does not guarantee idempotency; the dispatcher enforces
/// at most one call per descriptor per batch run.
pub trait RemediationTrigger {
    /// Triggers one rebuild pipeline.
    ///
    /// # Errors
    ///
    /// Returns [`TriggerError`] when the collaborator rejects the request or
    /// cannot be reached.
    fn trigger(&self, request: &TriggerRequest) -> Result<TriggerReceipt, TriggerError>;
}
