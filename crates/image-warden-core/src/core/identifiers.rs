// crates/image-warden-core/src/core/identifiers.rs
// ============================================================================
// Module: Image Warden Identifiers
// Description: Canonical opaque identifiers for streams and pipelines.
// Purpose: Provide strongly typed, serializable IDs with stable string forms.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! This module defines the string-based identifiers used throughout Image
//! Warden. Identifiers are opaque and serialize as strings. Validation is
//! handled at normalization or collaborator boundaries rather than within
//! these simple wrappers.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Identifier Types
// ============================================================================

/// Stream key identifying a base-image version family.
///
/// # Invariants
/// - Derived from an image label with every `.` replaced by `-`.
/// - Version comparisons are only meaningful within one stream key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StreamKey(String);

impl StreamKey {
    /// Creates a new stream key.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Derives the stream key from a raw image label (`rhel8.java21` becomes
    /// `rhel8-java21`).
    #[must_use]
    pub fn from_image_label(label: &str) -> Self {
        Self(label.replace('.', "-"))
    }

    /// Returns the key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StreamKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for StreamKey {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for StreamKey {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

/// Opaque pipeline reference returned by the remediation trigger collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PipelineRef(String);

impl PipelineRef {
    /// Creates a new pipeline reference.
    #[must_use]
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    /// Returns the reference as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PipelineRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for PipelineRef {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for PipelineRef {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}
