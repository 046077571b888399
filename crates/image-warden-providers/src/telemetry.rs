// crates/image-warden-providers/src/telemetry.rs
// ============================================================================
// Module: Telemetry File Source
// Description: OTLP trace-export JSON parsing into raw attribute records.
// Purpose: Yield one raw record per span with both attribute scopes intact.
// Dependencies: image-warden-core, serde, serde_json
// ============================================================================

//! ## Overview
//! The telemetry source reads an OTLP trace-export JSON document and yields
//! one raw record per span, pairing the span's attributes with its resource's
//! attributes. Scope merging and precedence are the normalizer's concern; the
//! source keeps the two scopes distinct. Non-string attribute values are
//! stringified. A hard size limit bounds the input read; structural parse
//! failure is the only batch-fatal input condition.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::io::Read;
use std::path::PathBuf;

use image_warden_core::RawRecord;
use image_warden_core::RecordSource;
use image_warden_core::SourceError;
use serde::Deserialize;
use serde_json::Value;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Default maximum telemetry input size in bytes.
pub const DEFAULT_MAX_TELEMETRY_BYTES: usize = 16 * 1024 * 1024;

// ============================================================================
// SECTION: OTLP Document Shape
// ============================================================================

/// Top-level OTLP trace-export document.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExportDocument {
    /// Resource spans in the export.
    #[serde(default)]
    resource_spans: Vec<ResourceSpanNode>,
}

/// One resource and its scoped spans.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResourceSpanNode {
    /// Resource-level attribute carrier.
    #[serde(default)]
    resource: ResourceNode,
    /// Scoped span groups under this resource.
    #[serde(default)]
    scope_spans: Vec<ScopeSpanNode>,
}

/// Resource-level attribute carrier.
#[derive(Debug, Default, Deserialize)]
struct ResourceNode {
    /// Resource attributes.
    #[serde(default)]
    attributes: Vec<KeyValueNode>,
}

/// One instrumentation scope's spans.
#[derive(Debug, Default, Deserialize)]
struct ScopeSpanNode {
    /// Spans emitted under this scope.
    #[serde(default)]
    spans: Vec<SpanNode>,
}

/// One span with its attributes.
#[derive(Debug, Default, Deserialize)]
struct SpanNode {
    /// Span attributes.
    #[serde(default)]
    attributes: Vec<KeyValueNode>,
}

/// OTLP key/value attribute pair.
#[derive(Debug, Default, Deserialize)]
struct KeyValueNode {
    /// Attribute key.
    #[serde(default)]
    key: String,
    /// Attribute value wrapper.
    #[serde(default)]
    value: AttributeValueNode,
}

/// OTLP attribute value wrapper; exactly one variant field is set.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AttributeValueNode {
    /// String value.
    string_value: Option<String>,
    /// Integer value; OTLP JSON encodes int64 as a string, so both string
    /// and number forms are accepted.
    int_value: Option<Value>,
    /// Boolean value.
    bool_value: Option<bool>,
    /// Double value.
    double_value: Option<f64>,
}

impl AttributeValueNode {
    /// Returns the value stringified, when any variant is present.
    fn as_string(&self) -> Option<String> {
        if let Some(value) = &self.string_value {
            return Some(value.clone());
        }
        if let Some(value) = &self.int_value {
            return match value {
                Value::String(text) => Some(text.clone()),
                Value::Number(number) => Some(number.to_string()),
                _ => None,
            };
        }
        if let Some(value) = self.bool_value {
            return Some(value.to_string());
        }
        if let Some(value) = self.double_value {
            return Some(value.to_string());
        }
        None
    }
}

// ============================================================================
// SECTION: File Source
// ============================================================================

/// File-backed telemetry source for one batch run.
#[derive(Debug, Clone)]
pub struct OtlpFileSource {
    /// Path to the OTLP trace-export JSON file.
    path: PathBuf,
    /// Maximum input size in bytes.
    max_bytes: usize,
}

impl OtlpFileSource {
    /// Creates a source with the default size limit.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            max_bytes: DEFAULT_MAX_TELEMETRY_BYTES,
        }
    }

    /// Creates a source with an explicit size limit.
    #[must_use]
    pub fn with_max_bytes(path: impl Into<PathBuf>, max_bytes: usize) -> Self {
        Self {
            path: path.into(),
            max_bytes,
        }
    }

    /// Reads the input file, enforcing the size limit.
    fn read_limited(&self) -> Result<Vec<u8>, SourceError> {
        let file = std::fs::File::open(&self.path).map_err(|err| {
            if err.kind() == ErrorKind::NotFound {
                SourceError::Io(format!("telemetry file not found: {}", self.path.display()))
            } else {
                SourceError::Io(err.to_string())
            }
        })?;
        let limit = u64::try_from(self.max_bytes)
            .map_err(|_| SourceError::TooLarge(self.max_bytes))?
            .saturating_add(1);
        let mut bytes = Vec::new();
        file.take(limit)
            .read_to_end(&mut bytes)
            .map_err(|err| SourceError::Io(err.to_string()))?;
        if bytes.len() > self.max_bytes {
            return Err(SourceError::TooLarge(bytes.len()));
        }
        Ok(bytes)
    }
}

impl RecordSource for OtlpFileSource {
    fn records(&self) -> Result<Vec<RawRecord>, SourceError> {
        let bytes = self.read_limited()?;
        let document: ExportDocument =
            serde_json::from_slice(&bytes).map_err(|err| SourceError::Parse(err.to_string()))?;

        let mut records = Vec::new();
        for resource_span in &document.resource_spans {
            let resource_attributes = attribute_map(&resource_span.resource.attributes);
            for scope_span in &resource_span.scope_spans {
                for span in &scope_span.spans {
                    let span_attributes = attribute_map(&span.attributes);
                    records.push(RawRecord::new(resource_attributes.clone(), span_attributes));
                }
            }
        }
        tracing::debug!(count = records.len(), "telemetry records extracted");
        Ok(records)
    }
}

/// Flattens OTLP attribute pairs into a string map, dropping valueless keys.
fn attribute_map(attributes: &[KeyValueNode]) -> BTreeMap<String, String> {
    let mut map = BTreeMap::new();
    for attribute in attributes {
        if attribute.key.is_empty() {
            continue;
        }
        if let Some(value) = attribute.value.as_string() {
            map.insert(attribute.key.clone(), value);
        }
    }
    map
}
