// crates/image-warden-core/src/core/mod.rs
// ============================================================================
// Module: Image Warden Core Types
// Description: Canonical descriptor, verdict, and batch report structures.
// Purpose: Provide stable, serializable types for compliance evaluation.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Core types define the canonical deployment descriptor extracted from
//! telemetry, the ranked version history of a base-image stream, the
//! compliance verdict, and the per-record and batch-level report structures.
//! These types are the canonical source of truth for any derived report
//! surfaces (JSON files, summaries).

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod descriptor;
pub mod identifiers;
pub mod outcome;
pub mod record;
pub mod report;
pub mod verdict;
pub mod versions;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use descriptor::DeploymentDescriptor;
pub use descriptor::PlatformKind;
pub use identifiers::PipelineRef;
pub use identifiers::StreamKey;
pub use outcome::LivenessReason;
pub use outcome::NormalizeError;
pub use outcome::PlatformValidationResult;
pub use outcome::RemediationOutcome;
pub use outcome::RemediationReason;
pub use record::RawRecord;
pub use report::BatchResult;
pub use report::BatchSummary;
pub use report::EvaluatedRecord;
pub use report::RecordReport;
pub use verdict::ComplianceStatus;
pub use verdict::ComplianceVerdict;
pub use versions::VersionEntry;
pub use versions::VersionRecord;
