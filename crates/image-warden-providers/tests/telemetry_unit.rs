// crates/image-warden-providers/tests/telemetry_unit.rs
// ============================================================================
// Module: Telemetry Source Unit Tests
// Description: OTLP trace-export parsing into raw attribute records.
// Purpose: Pin down scope separation, value stringification, size limits,
//          and the batch-fatal parse failure.
// ============================================================================

//! ## Overview
//! Feeds real OTLP-shaped JSON documents through the file source and asserts
//! one record per span, distinct attribute scopes, stringified non-string
//! values, the size limit, and the error classification for unreadable or
//! unparseable inputs.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use std::io::Write;

use image_warden_core::RecordSource;
use image_warden_core::SourceError;
use image_warden_providers::OtlpFileSource;
use tempfile::NamedTempFile;

// ============================================================================
// SECTION: Fixtures
// ============================================================================

/// OTLP export with one resource carrying two spans.
const TWO_SPAN_EXPORT: &str = r#"{
  "resourceSpans": [
    {
      "resource": {
        "attributes": [
          {"key": "service.name", "value": {"stringValue": "billing"}},
          {"key": "region.deployed", "value": {"stringValue": "bcp-east-1"}}
        ]
      },
      "scopeSpans": [
        {
          "spans": [
            {
              "attributes": [
                {"key": "job_name", "value": {"stringValue": "deploy-prod"}},
                {"key": "retry_count", "value": {"intValue": "3"}},
                {"key": "cached", "value": {"boolValue": true}}
              ]
            },
            {
              "attributes": [
                {"key": "job_name", "value": {"stringValue": "deploy-canary"}}
              ]
            }
          ]
        }
      ]
    }
  ]
}"#;

/// Writes a fixture document to a temporary file.
fn fixture(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

// ============================================================================
// SECTION: Record Extraction
// ============================================================================

#[test]
fn one_record_per_span_with_shared_resource_scope() {
    let file = fixture(TWO_SPAN_EXPORT);
    let source = OtlpFileSource::new(file.path());

    let records = source.records().unwrap();
    assert_eq!(records.len(), 2);
    for record in &records {
        assert_eq!(
            record.resource_attributes.get("service.name").map(String::as_str),
            Some("billing")
        );
    }
    assert_eq!(
        records[0].span_attributes.get("job_name").map(String::as_str),
        Some("deploy-prod")
    );
    assert_eq!(
        records[1].span_attributes.get("job_name").map(String::as_str),
        Some("deploy-canary")
    );
}

#[test]
fn scopes_stay_distinct_until_normalization() {
    let file = fixture(TWO_SPAN_EXPORT);
    let source = OtlpFileSource::new(file.path());

    let records = source.records().unwrap();
    assert!(records[0].resource_attributes.contains_key("region.deployed"));
    assert!(!records[0].span_attributes.contains_key("region.deployed"));
    assert!(!records[0].resource_attributes.contains_key("job_name"));
}

#[test]
fn non_string_values_are_stringified() {
    let file = fixture(TWO_SPAN_EXPORT);
    let source = OtlpFileSource::new(file.path());

    let records = source.records().unwrap();
    assert_eq!(records[0].span_attributes.get("retry_count").map(String::as_str), Some("3"));
    assert_eq!(records[0].span_attributes.get("cached").map(String::as_str), Some("true"));
}

#[test]
fn numeric_int_values_are_accepted() {
    let file = fixture(
        r#"{"resourceSpans":[{"resource":{"attributes":[]},"scopeSpans":[{"spans":[
            {"attributes":[{"key":"retry_count","value":{"intValue":7}}]}
        ]}]}]}"#,
    );
    let source = OtlpFileSource::new(file.path());

    let records = source.records().unwrap();
    assert_eq!(records[0].span_attributes.get("retry_count").map(String::as_str), Some("7"));
}

#[test]
fn empty_export_yields_no_records() {
    let file = fixture(r#"{"resourceSpans": []}"#);
    let source = OtlpFileSource::new(file.path());
    assert!(source.records().unwrap().is_empty());
}

// ============================================================================
// SECTION: Failure Classification
// ============================================================================

#[test]
fn malformed_json_is_a_parse_error() {
    let file = fixture("{ not json");
    let source = OtlpFileSource::new(file.path());
    assert!(matches!(source.records(), Err(SourceError::Parse(_))));
}

#[test]
fn missing_file_is_an_io_error_naming_the_path() {
    let source = OtlpFileSource::new("/nonexistent/telemetry.json");
    match source.records() {
        Err(SourceError::Io(detail)) => assert!(detail.contains("telemetry.json")),
        other => panic!("expected io error, got {other:?}"),
    }
}

#[test]
fn oversized_input_is_rejected() {
    let file = fixture(TWO_SPAN_EXPORT);
    let source = OtlpFileSource::with_max_bytes(file.path(), 16);
    assert!(matches!(source.records(), Err(SourceError::TooLarge(_))));
}
