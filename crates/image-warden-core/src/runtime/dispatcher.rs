// crates/image-warden-core/src/runtime/dispatcher.rs
// ============================================================================
// Module: Image Warden Remediation Dispatcher
// Description: Precondition-gated, at-most-once remediation triggering.
// Purpose: Invoke the rebuild pipeline exactly once per actionable verdict.
// Dependencies: crate::{core, interfaces}
// ============================================================================

//! ## Overview
//! The dispatcher gates every trigger behind three preconditions: the verdict
//! must require remediation (`NonCompliant` or `Unknown` — the latter is a
//! deliberate policy choice, since an unrecognized version is itself drift),
//! the deployment must be confirmed live, and live mode must be enabled. On a
//! gate pass the trigger collaborator is invoked exactly once; failures are
//! recorded and never abort the batch.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use crate::core::descriptor::DeploymentDescriptor;
use crate::core::outcome::PlatformValidationResult;
use crate::core::outcome::RemediationOutcome;
use crate::core::outcome::RemediationReason;
use crate::core::verdict::ComplianceVerdict;
use crate::interfaces::RemediationTrigger;
use crate::interfaces::TriggerRequest;

// ============================================================================
// SECTION: Trigger Variables
// ============================================================================

/// Pipeline variable marking the run as a base-image upgrade.
const UPGRADE_VARIABLE: &str = "BASE_IMAGE_UPGRADE";
/// Pipeline variable carrying the upgrade target version.
const TARGET_TAG_VARIABLE: &str = "TARGET_TAG";

// ============================================================================
// SECTION: Remediation Dispatcher
// ============================================================================

/// Gated dispatcher over the remediation trigger collaborator.
pub struct RemediationDispatcher<T> {
    /// Remediation trigger collaborator.
    trigger: T,
    /// Whether triggers may actually fire.
    live_mode: bool,
    /// Branch the rebuild pipeline runs against.
    branch: String,
}

impl<T> RemediationDispatcher<T>
where
    T: RemediationTrigger,
{
    /// Creates a dispatcher with the given run mode and branch.
    #[must_use]
    pub const fn new(trigger: T, live_mode: bool, branch: String) -> Self {
        Self {
            trigger,
            live_mode,
            branch,
        }
    }

    /// Returns whether live mode is enabled.
    #[must_use]
    pub const fn live_mode(&self) -> bool {
        self.live_mode
    }

    /// Returns the configured branch.
    #[must_use]
    pub fn branch(&self) -> &str {
        &self.branch
    }

    /// Decides and, when permitted, performs the remediation dispatch for one
    /// descriptor.
    ///
    /// Gate order: verdict, liveness, live mode. A dry-run outcome means the
    /// trigger would otherwise have fired.
    #[must_use]
    pub fn dispatch(
        &self,
        descriptor: &DeploymentDescriptor,
        validation: &PlatformValidationResult,
        verdict: &ComplianceVerdict,
    ) -> RemediationOutcome {
        if !verdict.requires_remediation() {
            return RemediationOutcome::skipped(RemediationReason::Compliant);
        }
        if !validation.is_live {
            return RemediationOutcome::skipped(RemediationReason::NotLive);
        }
        if !self.live_mode {
            return RemediationOutcome::skipped(RemediationReason::DryRun);
        }

        let request = TriggerRequest {
            project_path: descriptor.project_path.clone(),
            branch: self.branch.clone(),
            variables: trigger_variables(verdict),
        };
        match self.trigger.trigger(&request) {
            Ok(receipt) => RemediationOutcome::triggered(receipt.pipeline_ref),
            Err(error) => RemediationOutcome::failed(error.to_string()),
        }
    }
}

/// Builds the deterministic variable set for one trigger call.
///
/// `TARGET_TAG` is omitted when the stream's latest version is unresolvable;
/// the rebuild pipeline then resolves its own latest.
fn trigger_variables(verdict: &ComplianceVerdict) -> BTreeMap<String, String> {
    let mut variables = BTreeMap::new();
    variables.insert(UPGRADE_VARIABLE.to_string(), "true".to_string());
    if let Some(latest) = &verdict.latest_version {
        variables.insert(TARGET_TAG_VARIABLE.to_string(), latest.clone());
    }
    variables
}
