// crates/image-warden-core/src/core/versions.rs
// ============================================================================
// Module: Image Warden Version Records
// Description: Ranked base-image version history for one stream.
// Purpose: Provide deterministic staleness lookups within a stream.
// Dependencies: crate::core::identifiers, serde
// ============================================================================

//! ## Overview
//! A version record holds the ordered version history of one base-image
//! stream as resolved from the version authority. Rank 0 is the latest
//! version; increasing rank means older. Records are owned by the per-batch
//! stream cache and never shared across batch runs.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::core::identifiers::StreamKey;

// ============================================================================
// SECTION: Version Records
// ============================================================================

/// One version within a stream's ordered history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionEntry {
    /// Version string as published by the authority.
    pub version: String,
    /// 0-based distance from the latest version (0 = latest).
    pub published_rank: usize,
}

/// Ordered version history of one base-image stream.
///
/// # Invariants
/// - `entries` is ordered by rank; `entries[n].published_rank == n`.
/// - Lookups are restricted to this record's `stream_id`; cross-stream
///   comparison is disallowed by the evaluator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionRecord {
    /// Stream this history belongs to.
    pub stream_id: StreamKey,
    /// Versions ordered from latest (rank 0) to oldest.
    pub entries: Vec<VersionEntry>,
}

impl VersionRecord {
    /// Builds a record from versions already ordered latest-first, assigning
    /// ranks `0..n`.
    #[must_use]
    pub fn from_ordered_versions(stream_id: StreamKey, versions: Vec<String>) -> Self {
        let entries = versions
            .into_iter()
            .enumerate()
            .map(|(published_rank, version)| VersionEntry {
                version,
                published_rank,
            })
            .collect();
        Self {
            stream_id,
            entries,
        }
    }

    /// Returns the latest known version (rank 0), when any exist.
    #[must_use]
    pub fn latest(&self) -> Option<&str> {
        self.entries.first().map(|entry| entry.version.as_str())
    }

    /// Returns the rank of a version by exact string match, when present.
    #[must_use]
    pub fn rank_of(&self, version: &str) -> Option<usize> {
        self.entries
            .iter()
            .find(|entry| entry.version == version)
            .map(|entry| entry.published_rank)
    }
}
