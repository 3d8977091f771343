// crates/folio-matrix-core/src/core/environment.rs
// ============================================================================
// Module: Folio Matrix Environment Actions
// Description: Environment setup actions applied on package activation.
// Purpose: Serializable prepend actions consumed by the package host.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! When the host activates an installed package it applies a short ordered
//! list of environment actions. Only prepends exist today (`PATH`,
//! `CMAKE_MODULE_PATH`, ...); the `{root}` placeholder inside values is
//! expanded by the host to the installed package root and passes through
//! here verbatim.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Environment Types
// ============================================================================

/// Prepend action on a path-like environment variable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvPrepend {
    /// Environment variable the value is prepended to.
    pub variable: String,
    /// Prepended value; `{root}` is a host-expanded placeholder.
    pub value: String,
}

impl EnvPrepend {
    /// Creates a new prepend action.
    #[must_use]
    pub fn new(variable: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            variable: variable.into(),
            value: value.into(),
        }
    }
}
