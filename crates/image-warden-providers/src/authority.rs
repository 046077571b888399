// crates/image-warden-providers/src/authority.rs
// ============================================================================
// Module: Image Catalog Authority
// Description: Version-history lookup against the vendor image catalog.
// Purpose: Resolve a stream's published versions ordered by go-live date.
// Dependencies: image-warden-core, reqwest, serde, time
// ============================================================================

//! ## Overview
//! The catalog client resolves a stream in two steps: a name search yields
//! the catalog image identifier, then a versions query yields the published
//! tags with their go-live dates. Stream keys map to catalog image names
//! through an explicit table; an unmapped stream is a resolution failure,
//! never a guess. Version entries without a tag are skipped; entries without
//! a parseable go-live date sort as oldest.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use image_warden_core::AuthorityError;
use image_warden_core::StreamKey;
use image_warden_core::VersionAuthority;
use image_warden_core::VersionListing;
use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::Value;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::client::build_client;
use crate::client::join_endpoint;

// ============================================================================
// SECTION: Configuration
// ============================================================================

/// Configuration for the image catalog client.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ImageCatalogConfig {
    /// Catalog API endpoint.
    pub endpoint: String,
    /// Request timeout in milliseconds.
    pub timeout_ms: u64,
    /// Stream key to catalog image name table.
    pub streams: BTreeMap<String, String>,
}

// ============================================================================
// SECTION: Response Shapes
// ============================================================================

/// Envelope for the image name search.
#[derive(Debug, Default, Deserialize)]
struct ImageSearchBody {
    /// Matched catalog images.
    #[serde(default)]
    data: Vec<ImageEntryBody>,
}

/// One catalog image entry.
#[derive(Debug, Default, Deserialize)]
struct ImageEntryBody {
    /// Catalog image identifier; numeric or string depending on API age.
    #[serde(default)]
    id: Option<Value>,
}

/// Envelope for the versions query.
#[derive(Debug, Default, Deserialize)]
struct VersionsBody {
    /// Published versions, newest first is not guaranteed.
    #[serde(default)]
    data: Vec<VersionEntryBody>,
}

/// One published version entry.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VersionEntryBody {
    /// Vendor tag name.
    #[serde(default)]
    red_hat_tag: Option<String>,
    /// Plain tag name used by older catalog revisions.
    #[serde(default)]
    tag: Option<String>,
    /// RFC 3339 go-live timestamp.
    #[serde(default)]
    made_live_date: Option<String>,
}

impl VersionEntryBody {
    /// Returns the tag, preferring the vendor field.
    fn tag(&self) -> Option<&str> {
        self.red_hat_tag.as_deref().or(self.tag.as_deref()).filter(|tag| !tag.is_empty())
    }
}

// ============================================================================
// SECTION: Catalog Client
// ============================================================================

/// Version authority backed by the vendor image catalog.
pub struct ImageCatalogClient {
    /// Client configuration.
    config: ImageCatalogConfig,
    /// Blocking HTTP client.
    client: Client,
}

impl ImageCatalogClient {
    /// Creates a new catalog client.
    ///
    /// # Errors
    ///
    /// Returns [`AuthorityError`] when the HTTP client cannot be created.
    pub fn new(config: ImageCatalogConfig) -> Result<Self, AuthorityError> {
        let client =
            build_client(config.timeout_ms).map_err(|detail| AuthorityError::Unavailable {
                detail,
            })?;
        Ok(Self {
            config,
            client,
        })
    }

    /// Resolves the catalog identifier for an image name.
    fn image_id(&self, image_name: &str, stream: &StreamKey) -> Result<String, AuthorityError> {
        let url = join_endpoint(&self.config.endpoint, "images");
        let response = self
            .client
            .get(&url)
            .query(&[("name", image_name)])
            .send()
            .map_err(|err| AuthorityError::Unavailable {
                detail: err.to_string(),
            })?;
        if !response.status().is_success() {
            return Err(AuthorityError::Unavailable {
                detail: format!("image search returned status {}", response.status().as_u16()),
            });
        }
        let body: ImageSearchBody = response.json().map_err(|err| AuthorityError::Unavailable {
            detail: err.to_string(),
        })?;
        body.data
            .first()
            .and_then(|entry| entry.id.as_ref())
            .map(stringify_id)
            .ok_or_else(|| AuthorityError::StreamNotFound {
                stream: stream.to_string(),
            })
    }
}

impl VersionAuthority for ImageCatalogClient {
    fn versions(&self, stream: &StreamKey) -> Result<Vec<VersionListing>, AuthorityError> {
        let image_name =
            self.config.streams.get(stream.as_str()).ok_or_else(|| {
                AuthorityError::StreamNotFound {
                    stream: stream.to_string(),
                }
            })?;
        let image_id = self.image_id(image_name, stream)?;

        let url = join_endpoint(&self.config.endpoint, &format!("images/{image_id}/versions"));
        let response = self.client.get(&url).send().map_err(|err| AuthorityError::Unavailable {
            detail: err.to_string(),
        })?;
        if !response.status().is_success() {
            return Err(AuthorityError::Unavailable {
                detail: format!("versions query returned status {}", response.status().as_u16()),
            });
        }
        let body: VersionsBody = response.json().map_err(|err| AuthorityError::Unavailable {
            detail: err.to_string(),
        })?;

        let mut listings = Vec::new();
        for entry in &body.data {
            let Some(tag) = entry.tag() else {
                continue;
            };
            listings.push(VersionListing {
                version: tag.to_string(),
                made_live_millis: entry.made_live_date.as_deref().and_then(parse_live_millis),
            });
        }
        tracing::debug!(stream = %stream, count = listings.len(), "catalog versions resolved");
        Ok(listings)
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Renders a catalog identifier as a path segment.
fn stringify_id(id: &Value) -> String {
    match id {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Parses an RFC 3339 timestamp into epoch milliseconds.
fn parse_live_millis(raw: &str) -> Option<i64> {
    OffsetDateTime::parse(raw, &Rfc3339)
        .ok()
        .map(|timestamp| timestamp.unix_timestamp().saturating_mul(1000))
}
