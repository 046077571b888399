// crates/image-warden-core/src/core/record.rs
// ============================================================================
// Module: Image Warden Raw Records
// Description: Raw attribute-bag records extracted from telemetry.
// Purpose: Carry two-scope attribute maps into descriptor normalization.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Raw records preserve the two logically distinct attribute scopes of the
//! telemetry source (resource-level and span-level). The normalizer presents
//! a single merged namespace to callers, with span-level attributes taking
//! precedence over resource-level attributes on key collision.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Raw Records
// ============================================================================

/// Raw attribute-bag record emitted by the telemetry source.
///
/// # Invariants
/// - Both scopes map string keys to string values; non-string telemetry
///   values are stringified by the source.
/// - The record is immutable once constructed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRecord {
    /// Resource-level attributes (less specific scope).
    pub resource_attributes: BTreeMap<String, String>,
    /// Span-level attributes (more specific scope; wins on collision).
    pub span_attributes: BTreeMap<String, String>,
}

impl RawRecord {
    /// Creates a raw record from its two attribute scopes.
    #[must_use]
    pub const fn new(
        resource_attributes: BTreeMap<String, String>,
        span_attributes: BTreeMap<String, String>,
    ) -> Self {
        Self {
            resource_attributes,
            span_attributes,
        }
    }

    /// Returns the merged, scope-agnostic attribute namespace.
    ///
    /// Span-level attributes take precedence over resource-level attributes
    /// on key collision (most specific wins).
    #[must_use]
    pub fn merged(&self) -> BTreeMap<&str, &str> {
        let mut merged: BTreeMap<&str, &str> = BTreeMap::new();
        for (key, value) in &self.resource_attributes {
            merged.insert(key.as_str(), value.as_str());
        }
        for (key, value) in &self.span_attributes {
            merged.insert(key.as_str(), value.as_str());
        }
        merged
    }
}
