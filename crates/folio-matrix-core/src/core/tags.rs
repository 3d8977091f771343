// crates/folio-matrix-core/src/core/tags.rs
// ============================================================================
// Module: Folio Matrix Tags
// Description: Capability tag strings for build variants and requirements.
// Purpose: Provide a strongly typed tag with fail-closed content validation.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! A tag names one choice on a build axis (`os-rocky-9`, `opt_level-debug`,
//! `refplat-vfx2023.1`, `gcc-11.x`) or a capability requirement
//! (`cmake-3.23`, `cppunit`). Tags end up embedded in filesystem paths and
//! shell command strings, so their content is restricted to a safe character
//! set; validation happens at manifest and generator boundaries.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Maximum length of a tag string.
pub const MAX_TAG_LENGTH: usize = 128;

// ============================================================================
// SECTION: Tag Type
// ============================================================================

/// Capability tag identifying one build-axis choice or requirement.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tag(String);

impl Tag {
    /// Creates a new tag without validating its content.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    /// Returns the tag as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Validates the tag content against the safe character set.
    ///
    /// Tags become path components and shell-command fragments, so path
    /// separators, traversal sequences, whitespace, and shell metacharacters
    /// are all rejected.
    ///
    /// # Errors
    ///
    /// Returns a message describing the first violated constraint.
    pub fn validate(&self) -> Result<(), String> {
        if self.0.is_empty() {
            return Err("tag must be non-empty".to_string());
        }
        if self.0.len() > MAX_TAG_LENGTH {
            return Err(format!("tag exceeds {MAX_TAG_LENGTH} byte limit"));
        }
        if self.0 == "." || self.0 == ".." {
            return Err(format!("tag {} is a reserved path component", self.0));
        }
        if let Some(bad) = self.0.chars().find(|c| !is_safe_tag_char(*c)) {
            return Err(format!("tag {} contains unsupported character {bad:?}", self.0));
        }
        Ok(())
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for Tag {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Tag {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Returns true when the character is allowed inside a tag.
const fn is_safe_tag_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '+')
}
