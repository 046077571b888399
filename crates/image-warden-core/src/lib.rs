// crates/image-warden-core/src/lib.rs
// ============================================================================
// Module: Image Warden Core Library
// Description: Public API surface for the Image Warden core.
// Purpose: Expose core types, collaborator interfaces, and runtime helpers.
// Dependencies: crate::{core, interfaces, runtime}
// ============================================================================

//! ## Overview
//! Image Warden core implements the compliance evaluation and remediation
//! decision pipeline: descriptor normalization, platform liveness validation,
//! base-image version resolution, staleness classification, and gated
//! remediation dispatch. It is backend-agnostic and integrates with platform
//! and catalog collaborators through explicit interfaces rather than
//! embedding HTTP clients.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod interfaces;
pub mod runtime;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use crate::core::*;

pub use interfaces::AuthorityError;
pub use interfaces::DeploymentStatus;
pub use interfaces::LookupError;
pub use interfaces::PlatformALookup;
pub use interfaces::PlatformBLookup;
pub use interfaces::RecordSource;
pub use interfaces::RemediationTrigger;
pub use interfaces::ServiceIdentity;
pub use interfaces::ServiceStatus;
pub use interfaces::SourceError;
pub use interfaces::TriggerError;
pub use interfaces::TriggerReceipt;
pub use interfaces::TriggerRequest;
pub use interfaces::VersionAuthority;
pub use interfaces::VersionListing;
pub use runtime::Admission;
pub use runtime::BatchCoordinator;
pub use runtime::FilterReason;
pub use runtime::PlatformValidator;
pub use runtime::RemediationDispatcher;
pub use runtime::ResolutionError;
pub use runtime::StreamCache;
pub use runtime::VersionResolver;
pub use runtime::evaluate;
pub use runtime::normalize;
