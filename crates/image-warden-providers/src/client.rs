// crates/image-warden-providers/src/client.rs
// ============================================================================
// Module: Shared HTTP Client Construction
// Description: Blocking reqwest client builder shared by all providers.
// Purpose: Centralize timeout and redirect policy for collaborator calls.
// Dependencies: reqwest
// ============================================================================

//! ## Overview
//! All providers issue synchronous blocking calls with a per-client timeout
//! covering the full request lifecycle. Redirects are not followed; a
//! collaborator that redirects is treated as unreachable.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::redirect::Policy;

// ============================================================================
// SECTION: Client Construction
// ============================================================================

/// User agent sent on all outbound collaborator requests.
const USER_AGENT: &str = "image-warden/0.1";

/// Builds the blocking client used by a provider.
pub(crate) fn build_client(timeout_ms: u64) -> Result<Client, String> {
    Client::builder()
        .timeout(Duration::from_millis(timeout_ms))
        .redirect(Policy::none())
        .user_agent(USER_AGENT)
        .build()
        .map_err(|err| err.to_string())
}

/// Joins a base endpoint and a path without doubling separators.
pub(crate) fn join_endpoint(endpoint: &str, path: &str) -> String {
    format!("{}/{}", endpoint.trim_end_matches('/'), path.trim_start_matches('/'))
}
