// crates/image-warden-providers/src/lib.rs
// ============================================================================
// Module: Image Warden Providers Library
// Description: HTTP collaborator implementations for the core interfaces.
// Purpose: Expose telemetry, platform, authority, and trigger clients.
// Dependencies: image-warden-core, reqwest, serde_json
// ============================================================================

//! ## Overview
//! Providers implement the core collaborator interfaces over blocking HTTP
//! clients with explicit timeouts and bounded reads. Every client makes a
//! single attempt per call; retry policy is deliberately absent because a
//! failed call is a terminal outcome for that descriptor's stage.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod authority;
pub mod aws;
pub mod bcp;
mod client;
pub mod telemetry;
pub mod trigger;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use authority::ImageCatalogClient;
pub use authority::ImageCatalogConfig;
pub use aws::AwsLookupConfig;
pub use aws::AwsServiceLookup;
pub use bcp::BcpDeploymentLookup;
pub use bcp::BcpLookupConfig;
pub use telemetry::OtlpFileSource;
pub use trigger::PipelineTriggerClient;
pub use trigger::PipelineTriggerConfig;
