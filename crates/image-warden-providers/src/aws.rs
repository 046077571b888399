// crates/image-warden-providers/src/aws.rs
// ============================================================================
// Module: AWS Service Lookup
// Description: Platform-B liveness lookup against the container service API.
// Purpose: Confirm a named service exists with a nonzero desired count.
// Dependencies: image-warden-core, reqwest, serde
// ============================================================================

//! ## Overview
//! The AWS lookup resolves a service by cluster, region, and service name
//! through the service gateway. HTTP 404 maps to "not found"; any transport
//! or unexpected-status failure maps to unreachability, which the validator
//! treats as not live (fail closed).

// ============================================================================
// SECTION: Imports
// ============================================================================

use image_warden_core::LookupError;
use image_warden_core::PlatformBLookup;
use image_warden_core::ServiceIdentity;
use image_warden_core::ServiceStatus;
use reqwest::StatusCode;
use reqwest::blocking::Client;
use serde::Deserialize;

use crate::client::build_client;
use crate::client::join_endpoint;

// ============================================================================
// SECTION: Configuration
// ============================================================================

/// Configuration for the AWS service lookup.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AwsLookupConfig {
    /// Service gateway endpoint.
    pub endpoint: String,
    /// Bearer token for gateway access.
    pub token: String,
    /// Cluster the audited services run in.
    pub cluster: String,
    /// Request timeout in milliseconds.
    pub timeout_ms: u64,
}

// ============================================================================
// SECTION: Response Shape
// ============================================================================

/// Service object subset returned by the gateway.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ServiceBody {
    /// Declared instance count for the service.
    #[serde(default)]
    desired_count: Option<u64>,
}

// ============================================================================
// SECTION: Lookup Implementation
// ============================================================================

/// Platform-B lookup client over the service gateway.
pub struct AwsServiceLookup {
    /// Client configuration.
    config: AwsLookupConfig,
    /// Blocking HTTP client.
    client: Client,
}

impl AwsServiceLookup {
    /// Creates a new lookup client.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError`] when the HTTP client cannot be created.
    pub fn new(config: AwsLookupConfig) -> Result<Self, LookupError> {
        let client = build_client(config.timeout_ms).map_err(|detail| LookupError::Unreachable {
            detail,
        })?;
        Ok(Self {
            config,
            client,
        })
    }
}

impl PlatformBLookup for AwsServiceLookup {
    fn lookup(&self, identity: &ServiceIdentity) -> Result<ServiceStatus, LookupError> {
        let url = join_endpoint(
            &self.config.endpoint,
            &format!(
                "clusters/{}/regions/{}/services/{}",
                self.config.cluster, identity.region, identity.service_name
            ),
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
            return Ok(ServiceStatus {
                found: false,
                desired_count: 0,
            });
        }
        if !response.status().is_success() {
            tracing::warn!(status = response.status().as_u16(), %url, "aws lookup failed");
            return Err(LookupError::Unreachable {
                detail: format!("unexpected status {}", response.status().as_u16()),
            });
        }

        let body: ServiceBody = response.json().map_err(|err| LookupError::Unreachable {
            detail: err.to_string(),
        })?;
        Ok(ServiceStatus {
            found: true,
            desired_count: body.desired_count.unwrap_or(0),
        })
    }
}
