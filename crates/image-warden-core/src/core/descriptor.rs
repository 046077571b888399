// crates/image-warden-core/src/core/descriptor.rs
// ============================================================================
// Module: Image Warden Deployment Descriptors
// Description: Canonical deployment descriptor and platform kind.
// Purpose: Represent one validated deployed service instance.
// Dependencies: crate::core::identifiers, serde
// ============================================================================

//! ## Overview
//! A deployment descriptor is the canonical, validated representation of one
//! deployed service instance extracted from telemetry. Descriptors are
//! created by the normalizer and immutable thereafter; all string fields are
//! non-empty by construction.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::core::identifiers::StreamKey;

// ============================================================================
// SECTION: Platform Kind
// ============================================================================

/// Target runtime platform of a deployment.
///
/// The set of platform kinds is closed; dispatch over it is exhaustive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlatformKind {
    /// Container platform deployments, validated by namespace and profile.
    Bcp,
    /// Cloud services, validated by service name and region.
    Aws,
}

impl PlatformKind {
    /// Parses a platform kind from its telemetry value.
    ///
    /// Returns `None` for any value outside the known mapping; callers treat
    /// that as a per-record validation failure.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "bcp" => Some(Self::Bcp),
            "aws" => Some(Self::Aws),
            _ => None,
        }
    }

    /// Returns the canonical string form of the platform kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bcp => "bcp",
            Self::Aws => "aws",
        }
    }
}

// ============================================================================
// SECTION: Deployment Descriptor
// ============================================================================

/// Canonical, validated representation of one deployed service instance.
///
/// # Invariants
/// - All string fields are non-empty.
/// - `stream_key` is derived from `image_label` (`.` replaced by `-`) and
///   cached here for the version resolver; it is not the image label itself.
/// - Descriptors are immutable after normalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentDescriptor {
    /// Service name reported by telemetry.
    pub service_name: String,
    /// Profile name used as the platform-A lookup key.
    pub profile_name: String,
    /// Deployment region.
    pub region: String,
    /// Raw base-image label (e.g. `rhel8.java21`).
    pub image_label: String,
    /// Remediation target project path.
    pub project_path: String,
    /// Base-image version currently deployed.
    pub current_version: String,
    /// Target runtime platform.
    pub platform_kind: PlatformKind,
    /// Stream lookup key derived from `image_label`.
    pub stream_key: StreamKey,
}
