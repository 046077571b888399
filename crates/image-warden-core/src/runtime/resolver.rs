// crates/image-warden-core/src/runtime/resolver.rs
// ============================================================================
// Module: Image Warden Version Resolver
// Description: Cached resolution of ranked stream version histories.
// Purpose: Query the version authority at most once per stream per batch.
// Dependencies: crate::{core, interfaces}
// ============================================================================

//! ## Overview
//! The resolver maps a stream key to its ranked version history via the
//! version authority. The per-stream cache is owned by the batch coordinator
//! and scoped to one batch run, keeping runs independent and testable.
//! Failures are cached too, so a batch issues at most one authority query per
//! distinct stream key regardless of outcome.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use thiserror::Error;

use crate::core::identifiers::StreamKey;
use crate::core::versions::VersionRecord;
use crate::interfaces::AuthorityError;
use crate::interfaces::VersionAuthority;
use crate::interfaces::VersionListing;

// ============================================================================
// SECTION: Resolution Errors
// ============================================================================

/// Per-record resolution failure; yields an `Unknown` verdict downstream and
/// is never batch-fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolutionError {
    /// The authority has no knowledge of the stream.
    #[error("stream not found: {stream}")]
    StreamNotFound {
        /// Stream key that was queried.
        stream: String,
    },
    /// The authority could not be reached.
    #[error("version authority unavailable: {detail}")]
    AuthorityUnavailable {
        /// Transport failure detail.
        detail: String,
    },
}

impl From<AuthorityError> for ResolutionError {
    fn from(error: AuthorityError) -> Self {
        match error {
            AuthorityError::StreamNotFound {
                stream,
            } => Self::StreamNotFound {
                stream,
            },
            AuthorityError::Unavailable {
                detail,
            } => Self::AuthorityUnavailable {
                detail,
            },
        }
    }
}

// ============================================================================
// SECTION: Stream Cache
// ============================================================================

/// Per-batch cache of resolution outcomes keyed by stream key.
///
/// # Invariants
/// - Owned by the batch coordinator; lifetime is exactly one batch run.
/// - Stores failures as well as successes (negative caching) to uphold the
///   at-most-one-query-per-stream invariant.
#[derive(Debug, Default)]
pub struct StreamCache {
    /// Cached resolution outcomes.
    entries: BTreeMap<StreamKey, Result<VersionRecord, ResolutionError>>,
}

impl StreamCache {
    /// Creates an empty cache.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Returns the number of cached streams.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when no streams are cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ============================================================================
// SECTION: Version Resolver
// ============================================================================

/// Cached, rank-assigning resolver over the version authority.
pub struct VersionResolver<V> {
    /// Version authority collaborator.
    authority: V,
}

impl<V> VersionResolver<V>
where
    V: VersionAuthority,
{
    /// Creates a resolver over the given authority.
    #[must_use]
    pub const fn new(authority: V) -> Self {
        Self {
            authority,
        }
    }

    /// Resolves the ranked version history for a stream key, consulting the
    /// cache first.
    ///
    /// # Errors
    ///
    /// Returns [`ResolutionError`] when the stream is unknown or the
    /// authority is unreachable; the outcome is cached either way.
    pub fn resolve(
        &self,
        cache: &mut StreamCache,
        stream: &StreamKey,
    ) -> Result<VersionRecord, ResolutionError> {
        if let Some(cached) = cache.entries.get(stream) {
            return cached.clone();
        }
        let outcome = self.query(stream);
        cache.entries.insert(stream.clone(), outcome.clone());
        outcome
    }

    /// Queries the authority and assigns ranks after re-sorting by recency.
    fn query(&self, stream: &StreamKey) -> Result<VersionRecord, ResolutionError> {
        let mut listings = self.authority.versions(stream)?;
        sort_by_recency(&mut listings);
        let versions = listings.into_iter().map(|listing| listing.version).collect();
        Ok(VersionRecord::from_ordered_versions(stream.clone(), versions))
    }
}

/// Sorts listings descending by recency indicator; listings without an
/// indicator sort oldest, and the authority's order is preserved for ties
/// (stable sort).
fn sort_by_recency(listings: &mut [VersionListing]) {
    listings.sort_by(|left, right| {
        let left_key = left.made_live_millis.unwrap_or(i64::MIN);
        let right_key = right.made_live_millis.unwrap_or(i64::MIN);
        right_key.cmp(&left_key)
    });
}
