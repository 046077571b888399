//! Evaluator property-based tests.
//!
//! ## Purpose
//! Exercise the staleness classifier with randomized histories and versions
//! to prove classification invariants hold for arbitrary inputs, not just
//! the enumerated decision table.
//!
//! ## What is covered
//! - Rank 0 always classifies `Compliant`; any other rank `NonCompliant`.
//! - A version absent from the history is never `Compliant` or ranked.
//! - Cross-stream records always yield `Unknown` regardless of contents.
//!
//! ## What is intentionally out of scope
//! - Resolver caching (covered by `resolver_unit`).
//! - Dispatch gating (covered by `dispatcher_unit`).
// crates/image-warden-core/tests/proptest_evaluator.rs
// ============================================================================
// Module: Evaluator Property-Based Tests
// Description: Randomized staleness classification invariants.
// Purpose: Ensure rank, status, and cross-stream guarantees hold generally.
// ============================================================================

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    reason = "Test-only assertions and helpers are permitted."
)]

use image_warden_core::ComplianceStatus;
use image_warden_core::DeploymentDescriptor;
use image_warden_core::PlatformKind;
use image_warden_core::StreamKey;
use image_warden_core::VersionRecord;
use image_warden_core::evaluate;
use proptest::prelude::*;

// ============================================================================
// SECTION: Generators
// ============================================================================

/// Version string shaped like the catalog publishes them.
fn version_strategy() -> impl Strategy<Value = String> {
    ("[0-9]{1,2}", "[0-9]{1,3}").prop_map(|(major, minor)| format!("{major}.{minor}"))
}

/// Unique latest-first history of 1 to 16 versions.
fn history_strategy() -> impl Strategy<Value = Vec<String>> {
    proptest::collection::btree_set(version_strategy(), 1..16)
        .prop_map(|set| set.into_iter().collect())
}

/// Descriptor on the given stream with the given current version.
fn descriptor(stream: &str, current_version: &str) -> DeploymentDescriptor {
    DeploymentDescriptor {
        service_name: "svc".to_string(),
        profile_name: "svc-prod".to_string(),
        region: "bcp-east-1".to_string(),
        image_label: stream.to_string(),
        project_path: "group/svc".to_string(),
        current_version: current_version.to_string(),
        platform_kind: PlatformKind::Bcp,
        stream_key: StreamKey::new(stream),
    }
}

// ============================================================================
// SECTION: Properties
// ============================================================================

proptest! {
    #[test]
    fn present_version_gets_its_exact_rank(
        history in history_strategy(),
        index in 0usize..16,
    ) {
        let rank = index % history.len();
        let current = history[rank].clone();
        let record =
            VersionRecord::from_ordered_versions(StreamKey::new("stream-a"), history.clone());

        let verdict = evaluate(&descriptor("stream-a", &current), &record);
        prop_assert_eq!(verdict.staleness_rank, Some(rank));
        if rank == 0 {
            prop_assert_eq!(verdict.status, ComplianceStatus::Compliant);
        } else {
            prop_assert_eq!(verdict.status, ComplianceStatus::NonCompliant);
        }
        prop_assert_eq!(verdict.latest_version.as_deref(), Some(history[0].as_str()));
    }

    #[test]
    fn absent_version_is_never_compliant_or_ranked(
        history in history_strategy(),
        current in version_strategy(),
    ) {
        prop_assume!(!history.contains(&current));
        let record =
            VersionRecord::from_ordered_versions(StreamKey::new("stream-a"), history);

        let verdict = evaluate(&descriptor("stream-a", &current), &record);
        prop_assert_eq!(verdict.status, ComplianceStatus::Unknown);
        prop_assert_eq!(verdict.staleness_rank, None);
        prop_assert!(verdict.requires_remediation());
    }

    #[test]
    fn cross_stream_records_always_yield_unknown(
        history in history_strategy(),
        index in 0usize..16,
    ) {
        // Even an exact version match must not be compared across streams.
        let current = history[index % history.len()].clone();
        let record =
            VersionRecord::from_ordered_versions(StreamKey::new("stream-b"), history);

        let verdict = evaluate(&descriptor("stream-a", &current), &record);
        prop_assert_eq!(verdict.status, ComplianceStatus::Unknown);
        prop_assert_eq!(verdict.staleness_rank, None);
        prop_assert_eq!(verdict.latest_version, None);
    }
}
