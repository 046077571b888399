// crates/image-warden-core/tests/resolver_unit.rs
// ============================================================================
// Module: Resolver Unit Tests
// Description: Cached version resolution against a counting mock authority.
// Purpose: Prove the at-most-one-query-per-stream invariant, negative
//          caching, and recency-based rank assignment.
// ============================================================================

//! ## Overview
//! Uses a mock version authority with a shared call counter to verify the
//! resolver queries each distinct stream at most once per batch cache,
//! including when the first query fails. Also pins the re-sort by recency
//! indicator and the oldest placement of listings without one.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use image_warden_core::AuthorityError;
use image_warden_core::ResolutionError;
use image_warden_core::StreamCache;
use image_warden_core::StreamKey;
use image_warden_core::VersionAuthority;
use image_warden_core::VersionListing;
use image_warden_core::VersionResolver;

// ============================================================================
// SECTION: Mock Authority
// ============================================================================

/// Shared per-stream query counter.
type CallCounter = Rc<RefCell<BTreeMap<String, usize>>>;

/// Scripted authority that counts queries per stream.
struct CountingAuthority {
    /// Scripted outcome per stream key.
    outcomes: BTreeMap<String, Result<Vec<VersionListing>, String>>,
    /// Query count per stream key, shared with the test body.
    calls: CallCounter,
}

impl CountingAuthority {
    /// Creates an authority from scripted outcomes, returning the shared
    /// counter alongside it.
    fn new(outcomes: BTreeMap<String, Result<Vec<VersionListing>, String>>) -> (Self, CallCounter) {
        let calls: CallCounter = Rc::new(RefCell::new(BTreeMap::new()));
        let authority = Self {
            outcomes,
            calls: Rc::clone(&calls),
        };
        (authority, calls)
    }
}

impl VersionAuthority for CountingAuthority {
    fn versions(&self, stream: &StreamKey) -> Result<Vec<VersionListing>, AuthorityError> {
        *self.calls.borrow_mut().entry(stream.as_str().to_string()).or_insert(0) += 1;
        match self.outcomes.get(stream.as_str()) {
            Some(Ok(listings)) => Ok(listings.clone()),
            Some(Err(detail)) => Err(AuthorityError::Unavailable {
                detail: detail.clone(),
            }),
            None => Err(AuthorityError::StreamNotFound {
                stream: stream.as_str().to_string(),
            }),
        }
    }
}

/// Builds a listing with a recency indicator.
fn listing(version: &str, made_live_millis: Option<i64>) -> VersionListing {
    VersionListing {
        version: version.to_string(),
        made_live_millis,
    }
}

/// Reads the query count for one stream from the shared counter.
fn calls_for(calls: &CallCounter, stream: &str) -> usize {
    calls.borrow().get(stream).copied().unwrap_or(0)
}

// ============================================================================
// SECTION: Caching Invariants
// ============================================================================

#[test]
fn repeated_resolution_queries_the_authority_once() {
    let mut outcomes = BTreeMap::new();
    outcomes.insert(
        "rhel8-java21".to_string(),
        Ok(vec![listing("1.4", Some(400)), listing("1.3", Some(300))]),
    );
    let (authority, calls) = CountingAuthority::new(outcomes);
    let resolver = VersionResolver::new(authority);
    let mut cache = StreamCache::new();
    let stream = StreamKey::new("rhel8-java21");

    let first = resolver.resolve(&mut cache, &stream).unwrap();
    let second = resolver.resolve(&mut cache, &stream).unwrap();
    let third = resolver.resolve(&mut cache, &stream).unwrap();

    assert_eq!(first, second);
    assert_eq!(second, third);
    assert_eq!(calls_for(&calls, "rhel8-java21"), 1);
    assert_eq!(cache.len(), 1);
}

#[test]
fn failures_are_cached_and_not_retried() {
    let mut outcomes = BTreeMap::new();
    outcomes.insert("rhel8-java21".to_string(), Err("connection refused".to_string()));
    let (authority, calls) = CountingAuthority::new(outcomes);
    let resolver = VersionResolver::new(authority);
    let mut cache = StreamCache::new();
    let stream = StreamKey::new("rhel8-java21");

    let first = resolver.resolve(&mut cache, &stream);
    let second = resolver.resolve(&mut cache, &stream);

    assert!(matches!(first, Err(ResolutionError::AuthorityUnavailable { .. })));
    assert_eq!(first, second);
    assert_eq!(calls_for(&calls, "rhel8-java21"), 1);
}

#[test]
fn distinct_streams_are_resolved_independently() {
    let mut outcomes = BTreeMap::new();
    outcomes.insert("rhel8-java21".to_string(), Ok(vec![listing("1.4", Some(400))]));
    outcomes.insert("rhel9-python312".to_string(), Ok(vec![listing("2.1", Some(500))]));
    let (authority, calls) = CountingAuthority::new(outcomes);
    let resolver = VersionResolver::new(authority);
    let mut cache = StreamCache::new();

    let java = resolver.resolve(&mut cache, &StreamKey::new("rhel8-java21")).unwrap();
    let python = resolver.resolve(&mut cache, &StreamKey::new("rhel9-python312")).unwrap();

    assert_eq!(java.latest(), Some("1.4"));
    assert_eq!(python.latest(), Some("2.1"));
    assert_eq!(calls_for(&calls, "rhel8-java21"), 1);
    assert_eq!(calls_for(&calls, "rhel9-python312"), 1);
    assert_eq!(cache.len(), 2);
}

#[test]
fn unknown_stream_yields_stream_not_found() {
    let (authority, _calls) = CountingAuthority::new(BTreeMap::new());
    let resolver = VersionResolver::new(authority);
    let mut cache = StreamCache::new();

    let outcome = resolver.resolve(&mut cache, &StreamKey::new("rhel8-go122"));
    match outcome {
        Err(ResolutionError::StreamNotFound {
            stream,
        }) => assert_eq!(stream, "rhel8-go122"),
        other => panic!("expected stream-not-found, got {other:?}"),
    }
}

// ============================================================================
// SECTION: Rank Assignment
// ============================================================================

#[test]
fn listings_are_resorted_by_recency_before_ranking() {
    let mut outcomes = BTreeMap::new();
    // Authority returns oldest-first; the resolver must not trust that order.
    outcomes.insert(
        "rhel8-java21".to_string(),
        Ok(vec![
            listing("1.2", Some(200)),
            listing("1.4", Some(400)),
            listing("1.3", Some(300)),
        ]),
    );
    let (authority, _calls) = CountingAuthority::new(outcomes);
    let resolver = VersionResolver::new(authority);
    let mut cache = StreamCache::new();

    let record = resolver.resolve(&mut cache, &StreamKey::new("rhel8-java21")).unwrap();
    assert_eq!(record.latest(), Some("1.4"));
    assert_eq!(record.rank_of("1.4"), Some(0));
    assert_eq!(record.rank_of("1.3"), Some(1));
    assert_eq!(record.rank_of("1.2"), Some(2));
}

#[test]
fn listings_without_recency_sort_oldest() {
    let mut outcomes = BTreeMap::new();
    outcomes.insert(
        "rhel8-java21".to_string(),
        Ok(vec![listing("0.9-legacy", None), listing("1.4", Some(400))]),
    );
    let (authority, _calls) = CountingAuthority::new(outcomes);
    let resolver = VersionResolver::new(authority);
    let mut cache = StreamCache::new();

    let record = resolver.resolve(&mut cache, &StreamKey::new("rhel8-java21")).unwrap();
    assert_eq!(record.latest(), Some("1.4"));
    assert_eq!(record.rank_of("0.9-legacy"), Some(1));
}
