// crates/image-warden-core/tests/report_shape_unit.rs
// ============================================================================
// Module: Report Shape Unit Tests
// Description: Serialized form of batch reports and summaries.
// Purpose: Pin the JSON wire shape consumed by downstream report tooling.
// ============================================================================

//! ## Overview
//! Downstream tooling parses the JSON batch report, so the tag names, enum
//! casing, and field presence are a contract. These tests pin that contract
//! for both report variants and the summary block.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use image_warden_core::BatchResult;
use image_warden_core::BatchSummary;
use image_warden_core::ComplianceStatus;
use image_warden_core::ComplianceVerdict;
use image_warden_core::DeploymentDescriptor;
use image_warden_core::EvaluatedRecord;
use image_warden_core::NormalizeError;
use image_warden_core::PlatformKind;
use image_warden_core::PlatformValidationResult;
use image_warden_core::RecordReport;
use image_warden_core::RemediationOutcome;
use image_warden_core::RemediationReason;
use image_warden_core::StreamKey;
use serde_json::Value;
use serde_json::json;

// ============================================================================
// SECTION: Fixtures
// ============================================================================

/// Evaluated record with a dry-run skip.
fn evaluated_report() -> RecordReport {
    RecordReport::Evaluated {
        input_index: 3,
        record: EvaluatedRecord {
            descriptor: DeploymentDescriptor {
                service_name: "billing".to_string(),
                profile_name: "billing-prod".to_string(),
                region: "bcp-east-1".to_string(),
                image_label: "rhel8.java21".to_string(),
                project_path: "platform/billing".to_string(),
                current_version: "1.2".to_string(),
                platform_kind: PlatformKind::Bcp,
                stream_key: StreamKey::from_image_label("rhel8.java21"),
            },
            validation: PlatformValidationResult::live(),
            verdict: ComplianceVerdict {
                status: ComplianceStatus::NonCompliant,
                staleness_rank: Some(2),
                latest_version: Some("1.4".to_string()),
            },
            remediation: RemediationOutcome::skipped(RemediationReason::DryRun),
        },
    }
}

// ============================================================================
// SECTION: Wire Shape
// ============================================================================

#[test]
fn evaluated_records_are_tagged_and_snake_cased() {
    let value = serde_json::to_value(evaluated_report()).unwrap();

    assert_eq!(value["outcome"], "evaluated");
    assert_eq!(value["input_index"], 3);
    assert_eq!(value["record"]["descriptor"]["platform_kind"], "bcp");
    assert_eq!(value["record"]["descriptor"]["stream_key"], "rhel8-java21");
    assert_eq!(value["record"]["verdict"]["status"], "non_compliant");
    assert_eq!(value["record"]["remediation"]["reason"], json!({"kind": "dry_run"}));
}

#[test]
fn rejected_records_carry_the_error_kind() {
    let report = RecordReport::Rejected {
        input_index: 0,
        error: NormalizeError::FieldMissing {
            field: "image_label".to_string(),
        },
    };
    let value = serde_json::to_value(report).unwrap();

    assert_eq!(value["outcome"], "rejected");
    assert_eq!(value["error"]["kind"], "field_missing");
    assert_eq!(value["error"]["field"], "image_label");
}

#[test]
fn batch_result_round_trips_through_json() {
    let records = vec![evaluated_report()];
    let summary = BatchSummary::from_reports(&records, false, "main".to_string());
    let result = BatchResult {
        records,
        summary,
    };

    let encoded = serde_json::to_string(&result).unwrap();
    let decoded: BatchResult = serde_json::from_str(&encoded).unwrap();
    assert_eq!(decoded, result);

    let value: Value = serde_json::from_str(&encoded).unwrap();
    assert_eq!(value["summary"]["non_compliant"], 1);
    assert_eq!(value["summary"]["live_mode"], false);
    assert_eq!(value["summary"]["branch"], "main");
}
