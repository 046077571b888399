// crates/image-warden-core/src/runtime/mod.rs
// ============================================================================
// Module: Image Warden Runtime
// Description: Pipeline stages from normalization through batch coordination.
// Purpose: Execute the compliance evaluation and remediation decision path.
// Dependencies: crate::{core, interfaces}
// ============================================================================

//! ## Overview
//! The runtime sequences the pipeline stages over one batch of raw records:
//! normalize, validate platform liveness, resolve version history, evaluate
//! compliance, and dispatch remediation. Execution is single-threaded and
//! deterministic; output order equals input order.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod coordinator;
pub mod dispatcher;
pub mod evaluator;
pub mod normalizer;
pub mod resolver;
pub mod validator;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use coordinator::BatchCoordinator;
pub use dispatcher::RemediationDispatcher;
pub use evaluator::evaluate;
pub use normalizer::Admission;
pub use normalizer::FilterReason;
pub use normalizer::normalize;
pub use resolver::ResolutionError;
pub use resolver::StreamCache;
pub use resolver::VersionResolver;
pub use validator::PlatformValidator;
