// crates/image-warden-core/src/runtime/validator.rs
// ============================================================================
// Module: Image Warden Platform Validator
// Description: Liveness confirmation against the descriptor's platform.
// Purpose: Gate remediation on deployments that are confirmed live.
// Dependencies: crate::{core, interfaces}
// ============================================================================

//! ## Overview
//! The platform validator dispatches on the descriptor's platform kind and
//! confirms the deployment is currently live via the matching read-only
//! lookup collaborator. Collaborator unreachability is distinguished from
//! "not found" but both block remediation: no remediation ever targets a
//! service that cannot be confirmed live. A single lookup attempt is made per
//! descriptor per batch run.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::descriptor::DeploymentDescriptor;
use crate::core::descriptor::PlatformKind;
use crate::core::outcome::LivenessReason;
use crate::core::outcome::PlatformValidationResult;
use crate::interfaces::LookupError;
use crate::interfaces::PlatformALookup;
use crate::interfaces::PlatformBLookup;
use crate::interfaces::ServiceIdentity;

// ============================================================================
// SECTION: Platform Validator
// ============================================================================

/// Validator polymorphic over the closed set of platform kinds.
pub struct PlatformValidator<A, B> {
    /// Platform-A lookup collaborator.
    platform_a: A,
    /// Platform-B lookup collaborator.
    platform_b: B,
    /// Fixed namespace for platform-A deployment lookups.
    namespace: String,
}

impl<A, B> PlatformValidator<A, B>
where
    A: PlatformALookup,
    B: PlatformBLookup,
{
    /// Creates a validator over both platform backends.
    #[must_use]
    pub const fn new(platform_a: A, platform_b: B, namespace: String) -> Self {
        Self {
            platform_a,
            platform_b,
            namespace,
        }
    }

    /// Confirms whether the descriptor's deployment is currently live on its
    /// declared platform.
    #[must_use]
    pub fn validate(&self, descriptor: &DeploymentDescriptor) -> PlatformValidationResult {
        match descriptor.platform_kind {
            PlatformKind::Bcp => self.validate_platform_a(descriptor),
            PlatformKind::Aws => self.validate_platform_b(descriptor),
        }
    }

    /// Validates a platform-A deployment by namespace and profile name.
    fn validate_platform_a(
        &self,
        descriptor: &DeploymentDescriptor,
    ) -> PlatformValidationResult {
        match self.platform_a.lookup(&self.namespace, &descriptor.profile_name) {
            Ok(status) if !status.found => {
                PlatformValidationResult::not_live(LivenessReason::NotFound)
            }
            Ok(status) if status.instance_count == 0 => {
                PlatformValidationResult::not_live(LivenessReason::NoRunningInstances)
            }
            Ok(_) => PlatformValidationResult::live(),
            Err(LookupError::Unreachable {
                detail,
            }) => PlatformValidationResult::not_live(LivenessReason::Unreachable {
                detail,
            }),
        }
    }

    /// Validates a platform-B service by service name and region.
    fn validate_platform_b(
        &self,
        descriptor: &DeploymentDescriptor,
    ) -> PlatformValidationResult {
        let identity = ServiceIdentity {
            service_name: descriptor.service_name.clone(),
            region: descriptor.region.clone(),
        };
        match self.platform_b.lookup(&identity) {
            Ok(status) if !status.found => {
                PlatformValidationResult::not_live(LivenessReason::NotFound)
            }
            Ok(status) if status.desired_count == 0 => {
                PlatformValidationResult::not_live(LivenessReason::NoRunningInstances)
            }
            Ok(_) => PlatformValidationResult::live(),
            Err(LookupError::Unreachable {
                detail,
            }) => PlatformValidationResult::not_live(LivenessReason::Unreachable {
                detail,
            }),
        }
    }
}
