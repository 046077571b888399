// crates/image-warden-providers/src/bcp.rs
// ============================================================================
// Module: BCP Deployment Lookup
// Description: Platform-A liveness lookup against the container platform API.
// Purpose: Confirm a named deployment exists with running instances.
// Dependencies: image-warden-core, reqwest, serde
// ============================================================================

//! ## Overview
//! The BCP lookup issues a single bearer-token GET against the container
//! platform's deployments API. HTTP 404 maps to "not found"; any transport,
//! auth, or unexpected-status failure maps to unreachability, which the
//! validator treats as not live (fail closed).

// ============================================================================
// SECTION: Imports
// ============================================================================

use image_warden_core::DeploymentStatus;
use image_warden_core::LookupError;
use image_warden_core::PlatformALookup;
use reqwest::StatusCode;
use reqwest::blocking::Client;
use serde::Deserialize;

use crate::client::build_client;
use crate::client::join_endpoint;

// ============================================================================
// SECTION: Configuration
// ============================================================================

/// Configuration for the BCP deployment lookup.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BcpLookupConfig {
    /// Platform API endpoint.
    pub endpoint: String,
    /// Bearer token for API access.
    pub token: String,
    /// Request timeout in milliseconds.
    pub timeout_ms: u64,
}

// ============================================================================
// SECTION: Response Shape
// ============================================================================

/// Deployment object subset returned by the platform.
#[derive(Debug, Default, Deserialize)]
struct DeploymentBody {
    /// Declared deployment spec.
    #[serde(default)]
    spec: DeploymentSpecBody,
    /// Observed deployment status.
    #[serde(default)]
    status: DeploymentStatusBody,
}

/// Declared replica count.
#[derive(Debug, Default, Deserialize)]
struct DeploymentSpecBody {
    /// Desired replicas.
    #[serde(default)]
    replicas: Option<u64>,
}

/// Observed replica counts.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DeploymentStatusBody {
    /// Replicas currently available.
    #[serde(default)]
    available_replicas: Option<u64>,
}

// ============================================================================
// SECTION: Lookup Implementation
// ============================================================================

/// Platform-A lookup client over the container platform API.
pub struct BcpDeploymentLookup {
    /// Client configuration.
    config: BcpLookupConfig,
    /// Blocking HTTP client.
    client: Client,
}

impl BcpDeploymentLookup {
    /// Creates a new lookup client.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError`] when the HTTP client cannot be created.
    pub fn new(config: BcpLookupConfig) -> Result<Self, LookupError> {
        let client = build_client(config.timeout_ms).map_err(|detail| LookupError::Unreachable {
            detail,
        })?;
        Ok(Self {
            config,
            client,
        })
    }
}

impl PlatformALookup for BcpDeploymentLookup {
    fn lookup(
        &self,
        namespace: &str,
        profile_name: &str,
    ) -> Result<DeploymentStatus, LookupError> {
        let url = join_endpoint(
            &self.config.endpoint,
            &format!("apis/apps/v1/namespaces/{namespace}/deployments/{profile_name}"),
        );
        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.config.token)
            .send()
            .map_err(|err| LookupError::Unreachable {
                detail: err.to_string(),
            })?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(DeploymentStatus {
                found: false,
                instance_count: 0,
            });
        }
        if !response.status().is_success() {
            tracing::warn!(status = response.status().as_u16(), %url, "bcp lookup failed");
            return Err(LookupError::Unreachable {
                detail: format!("unexpected status {}", response.status().as_u16()),
            });
        }

        let body: DeploymentBody = response.json().map_err(|err| LookupError::Unreachable {
            detail: err.to_string(),
        })?;
        let instance_count =
            body.status.available_replicas.or(body.spec.replicas).unwrap_or(0);
        Ok(DeploymentStatus {
            found: true,
            instance_count,
        })
    }
}
