// crates/folio-matrix-config/src/lib.rs
// ============================================================================
// Module: Folio Matrix Config Library
// Description: Canonical folio manifest model, validation, and examples.
// Purpose: Single source of truth for folio.toml semantics.
// Dependencies: folio-matrix-core, serde, toml
// ============================================================================

//! ## Overview
//! `folio-matrix-config` defines the canonical manifest model for a package's
//! build metadata. It provides strict, fail-closed loading and validation of
//! `folio.toml` plus deterministic derived artifacts: the expanded test plan,
//! the environment setup actions, and the effective build requirements.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod examples;
pub mod manifest;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use examples::manifest_toml_example;
pub use manifest::*;
