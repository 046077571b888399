// crates/image-warden-providers/tests/platform_lookup_unit.rs
// ============================================================================
// Module: Platform Lookup Unit Tests
// Description: BCP and AWS liveness lookups against a local HTTP server.
// Purpose: Pin down 404 handling, replica extraction, and fail-closed
//          classification of unexpected statuses.
// ============================================================================

//! ## Overview
//! Runs both platform lookup clients against a local `tiny_http` server.
//! HTTP 404 must map to "not found" (a normal result); any other non-success
//! status and any transport failure must surface as unreachability so the
//! validator fails closed.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use std::thread;

use image_warden_core::LookupError;
use image_warden_core::PlatformALookup;
use image_warden_core::PlatformBLookup;
use image_warden_core::ServiceIdentity;
use image_warden_providers::AwsLookupConfig;
use image_warden_providers::AwsServiceLookup;
use image_warden_providers::BcpDeploymentLookup;
use image_warden_providers::BcpLookupConfig;
use tiny_http::Response;
use tiny_http::Server;
use tiny_http::StatusCode;

// ============================================================================
// SECTION: Test Harness
// ============================================================================

/// Serves one scripted response and returns the endpoint URL.
fn one_shot_server(status: u16, body: &str) -> (String, thread::JoinHandle<Option<String>>) {
    let server = Server::http("127.0.0.1:0").unwrap();
    let addr = server.server_addr().to_ip().unwrap();
    let url = format!("http://{addr}");
    let body = body.to_string();

    let handle = thread::spawn(move || {
        server.recv().ok().map(|request| {
            let requested = request.url().to_string();
            let response = Response::from_string(body).with_status_code(StatusCode(status));
            let _ = request.respond(response);
            requested
        })
    });
    (url, handle)
}

/// BCP lookup client against the given endpoint.
fn bcp_lookup(endpoint: &str) -> BcpDeploymentLookup {
    BcpDeploymentLookup::new(BcpLookupConfig {
        endpoint: endpoint.to_string(),
        token: "test-token".to_string(),
        timeout_ms: 5000,
    })
    .unwrap()
}

/// AWS lookup client against the given endpoint.
fn aws_lookup(endpoint: &str) -> AwsServiceLookup {
    AwsServiceLookup::new(AwsLookupConfig {
        endpoint: endpoint.to_string(),
        token: "test-token".to_string(),
        cluster: "prod-cluster".to_string(),
        timeout_ms: 5000,
    })
    .unwrap()
}

// ============================================================================
// SECTION: BCP Lookup
// ============================================================================

#[test]
fn bcp_live_deployment_reports_available_replicas() {
    let (url, handle) =
        one_shot_server(200, r#"{"spec":{"replicas":3},"status":{"availableReplicas":2}}"#);
    let lookup = bcp_lookup(&url);

    let status = lookup.lookup("base-images", "billing-prod").unwrap();
    assert!(status.found);
    assert_eq!(status.instance_count, 2);

    let requested = handle.join().unwrap().unwrap();
    assert!(requested.contains("/apis/apps/v1/namespaces/base-images/deployments/billing-prod"));
}

#[test]
fn bcp_missing_status_falls_back_to_spec_replicas() {
    let (url, handle) = one_shot_server(200, r#"{"spec":{"replicas":3},"status":{}}"#);
    let lookup = bcp_lookup(&url);

    let status = lookup.lookup("base-images", "billing-prod").unwrap();
    assert!(status.found);
    assert_eq!(status.instance_count, 3);
    handle.join().unwrap();
}

#[test]
fn bcp_not_found_is_a_normal_result() {
    let (url, handle) = one_shot_server(404, r#"{"kind":"Status","code":404}"#);
    let lookup = bcp_lookup(&url);

    let status = lookup.lookup("base-images", "missing").unwrap();
    assert!(!status.found);
    assert_eq!(status.instance_count, 0);
    handle.join().unwrap();
}

#[test]
fn bcp_server_error_is_unreachable() {
    let (url, handle) = one_shot_server(500, "internal error");
    let lookup = bcp_lookup(&url);

    match lookup.lookup("base-images", "billing-prod") {
        Err(LookupError::Unreachable {
            detail,
        }) => assert!(detail.contains("500")),
        other => panic!("expected unreachable, got {other:?}"),
    }
    handle.join().unwrap();
}

#[test]
fn bcp_unresponsive_endpoint_is_unreachable() {
    // Nothing listens on this port; connection must fail, not hang.
    let lookup = BcpDeploymentLookup::new(BcpLookupConfig {
        endpoint: "http://127.0.0.1:9".to_string(),
        token: "test-token".to_string(),
        timeout_ms: 500,
    })
    .unwrap();
    assert!(matches!(
        lookup.lookup("base-images", "billing-prod"),
        Err(LookupError::Unreachable { .. })
    ));
}

// ============================================================================
// SECTION: AWS Lookup
// ============================================================================

#[test]
fn aws_live_service_reports_desired_count() {
    let (url, handle) = one_shot_server(200, r#"{"desiredCount":4}"#);
    let lookup = aws_lookup(&url);
    let identity = ServiceIdentity {
        service_name: "billing".to_string(),
        region: "us-west-2".to_string(),
    };

    let status = lookup.lookup(&identity).unwrap();
    assert!(status.found);
    assert_eq!(status.desired_count, 4);

    let requested = handle.join().unwrap().unwrap();
    assert!(requested.contains("/clusters/prod-cluster/regions/us-west-2/services/billing"));
}

#[test]
fn aws_zero_desired_count_is_found_but_not_live_material() {
    let (url, handle) = one_shot_server(200, r#"{"desiredCount":0}"#);
    let lookup = aws_lookup(&url);
    let identity = ServiceIdentity {
        service_name: "billing".to_string(),
        region: "us-west-2".to_string(),
    };

    let status = lookup.lookup(&identity).unwrap();
    assert!(status.found);
    assert_eq!(status.desired_count, 0);
    handle.join().unwrap();
}

#[test]
fn aws_not_found_is_a_normal_result() {
    let (url, handle) = one_shot_server(404, r#"{"message":"service not found"}"#);
    let lookup = aws_lookup(&url);
    let identity = ServiceIdentity {
        service_name: "ghost".to_string(),
        region: "us-west-2".to_string(),
    };

    let status = lookup.lookup(&identity).unwrap();
    assert!(!status.found);
    handle.join().unwrap();
}

#[test]
fn aws_auth_failure_is_unreachable() {
    let (url, handle) = one_shot_server(401, "unauthorized");
    let lookup = aws_lookup(&url);
    let identity = ServiceIdentity {
        service_name: "billing".to_string(),
        region: "us-west-2".to_string(),
    };

    assert!(matches!(lookup.lookup(&identity), Err(LookupError::Unreachable { .. })));
    handle.join().unwrap();
}
