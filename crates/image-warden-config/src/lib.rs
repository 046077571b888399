// crates/image-warden-config/src/lib.rs
// ============================================================================
// Module: Image Warden Config Library
// Description: Canonical config model and validation for Image Warden.
// Purpose: Single source of truth for image-warden.toml semantics.
// Dependencies: serde, toml, url
// ============================================================================

//! ## Overview
//! `image-warden-config` defines the configuration model for the audit
//! pipeline. Loading is strict and fail-closed: size limits on the file,
//! bound checks on timeouts, and URL validation on every configured endpoint.
//! Config inputs are untrusted.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::*;
