// crates/image-warden-core/src/runtime/normalizer.rs
// ============================================================================
// Module: Image Warden Descriptor Normalizer
// Description: Admission filtering and canonical descriptor extraction.
// Purpose: Convert raw attribute bags into validated deployment descriptors.
// Dependencies: crate::core
// ============================================================================

//! ## Overview
//! The normalizer applies the admission filter before any field extraction,
//! then reads descriptor fields from the merged attribute namespace (span
//! scope wins over resource scope). Field lookups accept a small set of
//! candidate key spellings with a substring fallback, because telemetry
//! emitters are not consistent about attribute naming. Missing required
//! fields are terminal for the record, never for the batch.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use crate::core::descriptor::DeploymentDescriptor;
use crate::core::descriptor::PlatformKind;
use crate::core::identifiers::StreamKey;
use crate::core::outcome::NormalizeError;
use crate::core::record::RawRecord;

// ============================================================================
// SECTION: Attribute Keys
// ============================================================================

/// Candidate keys for the admission job-name field.
const JOB_NAME_KEYS: [&str; 2] = ["job_name", "ci_job_name"];
/// Candidate keys for the admission job-status field.
const JOB_STATUS_KEYS: [&str; 2] = ["job_status", "ci_job_status"];
/// Candidate keys for the service name.
const SERVICE_NAME_KEYS: [&str; 2] = ["service.name", "service_name"];
/// Candidate keys for the profile name.
const PROFILE_NAME_KEYS: [&str; 2] = ["profile.name", "profile_name"];
/// Candidate keys for the deployment region.
const REGION_KEYS: [&str; 2] = ["region.deployed", "region"];
/// Candidate keys for the base-image label.
const IMAGE_LABEL_KEYS: [&str; 3] = ["image.details", "image_details", "base_image"];
/// Candidate keys for the remediation project path.
const PROJECT_PATH_KEYS: [&str; 2] = ["project_path", "ci_project_path"];
/// Candidate keys for the deployed base-image version.
const CURRENT_VERSION_KEYS: [&str; 2] = ["base.image.version", "base_image_version"];
/// Candidate keys for the target platform.
const PLATFORM_KEYS: [&str; 2] = ["target_deployment", "platform"];

/// Fallback service name when telemetry does not report one.
const UNKNOWN_SERVICE_NAME: &str = "unknown";

// ============================================================================
// SECTION: Admission Outcome
// ============================================================================

/// Reason a record was excluded by the admission filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterReason {
    /// The job-name field does not contain `deploy`.
    NotDeployJob,
    /// The job-status field is not exactly `success`.
    JobNotSuccessful,
}

/// Outcome of normalizing one raw record.
#[derive(Debug, Clone, PartialEq)]
pub enum Admission {
    /// The record was admitted as a canonical descriptor.
    Admitted(DeploymentDescriptor),
    /// The record was dropped silently by the admission filter; it is
    /// excluded from the batch report entirely.
    Filtered(FilterReason),
    /// The record passed admission but failed field validation; it is
    /// excluded from later stages and reported.
    Rejected(NormalizeError),
}

// ============================================================================
// SECTION: Normalization
// ============================================================================

/// Normalizes one raw record into a canonical deployment descriptor.
///
/// The admission filter is applied before field extraction: the job-name
/// field must contain the substring `deploy` (case-sensitive) and the
/// job-status field must equal `success` exactly.
#[must_use]
pub fn normalize(record: &RawRecord) -> Admission {
    let attributes = record.merged();

    let job_name = find_attribute(&attributes, &JOB_NAME_KEYS).unwrap_or_default();
    if !job_name.contains("deploy") {
        return Admission::Filtered(FilterReason::NotDeployJob);
    }
    let job_status = find_attribute(&attributes, &JOB_STATUS_KEYS).unwrap_or_default();
    if job_status != "success" {
        return Admission::Filtered(FilterReason::JobNotSuccessful);
    }

    let image_label = match require_field(&attributes, &IMAGE_LABEL_KEYS, "image_label") {
        Ok(value) => value,
        Err(error) => return Admission::Rejected(error),
    };
    let region = match require_field(&attributes, &REGION_KEYS, "region") {
        Ok(value) => value,
        Err(error) => return Admission::Rejected(error),
    };
    let profile_name = match require_field(&attributes, &PROFILE_NAME_KEYS, "profile_name") {
        Ok(value) => value,
        Err(error) => return Admission::Rejected(error),
    };
    let project_path = match require_field(&attributes, &PROJECT_PATH_KEYS, "project_path") {
        Ok(value) => value,
        Err(error) => return Admission::Rejected(error),
    };
    let current_version =
        match require_field(&attributes, &CURRENT_VERSION_KEYS, "current_version") {
            Ok(value) => value,
            Err(error) => return Admission::Rejected(error),
        };
    let platform_kind = match extract_platform(&attributes, &region) {
        Ok(kind) => kind,
        Err(error) => return Admission::Rejected(error),
    };

    let service_name = find_attribute(&attributes, &SERVICE_NAME_KEYS)
        .filter(|value| !value.is_empty())
        .unwrap_or(UNKNOWN_SERVICE_NAME)
        .to_string();
    let stream_key = StreamKey::from_image_label(&image_label);

    Admission::Admitted(DeploymentDescriptor {
        service_name,
        profile_name,
        region,
        image_label,
        project_path,
        current_version,
        platform_kind,
        stream_key,
    })
}

// ============================================================================
// SECTION: Field Extraction Helpers
// ============================================================================

/// Finds an attribute by candidate keys: exact matches first, then keys
/// containing a candidate as a substring.
fn find_attribute<'a>(attributes: &BTreeMap<&str, &'a str>, candidates: &[&str]) -> Option<&'a str> {
    for candidate in candidates {
        if let Some(value) = attributes.get(candidate) {
            return Some(value);
        }
    }
    for candidate in candidates {
        for (key, value) in attributes {
            if key.contains(candidate) {
                return Some(value);
            }
        }
    }
    None
}

/// Extracts a required field, treating absence and emptiness identically.
fn require_field(
    attributes: &BTreeMap<&str, &str>,
    candidates: &[&str],
    field: &str,
) -> Result<String, NormalizeError> {
    match find_attribute(attributes, candidates) {
        Some(value) if !value.is_empty() => Ok(value.to_string()),
        _ => Err(NormalizeError::FieldMissing {
            field: field.to_string(),
        }),
    }
}

/// Resolves the platform kind from the platform attribute, falling back to
/// region-substring inference when the attribute is absent.
fn extract_platform(
    attributes: &BTreeMap<&str, &str>,
    region: &str,
) -> Result<PlatformKind, NormalizeError> {
    let value = match find_attribute(attributes, &PLATFORM_KEYS) {
        Some(value) if !value.is_empty() => value.to_ascii_lowercase(),
        _ => infer_platform_from_region(region).ok_or_else(|| NormalizeError::FieldMissing {
            field: "platform_kind".to_string(),
        })?,
    };
    PlatformKind::parse(&value).ok_or(NormalizeError::UnknownPlatform {
        value,
    })
}

/// Infers the platform value from region naming conventions.
fn infer_platform_from_region(region: &str) -> Option<String> {
    let lowered = region.to_ascii_lowercase();
    if lowered.contains("aws") {
        return Some("aws".to_string());
    }
    if lowered.contains("bcp") {
        return Some("bcp".to_string());
    }
    None
}
