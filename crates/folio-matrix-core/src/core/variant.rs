// crates/folio-matrix-core/src/core/variant.rs
// ============================================================================
// Module: Folio Matrix Variants
// Description: Ordered tag sequences identifying build configurations.
// Purpose: Preserve tag order for path construction and capability matching.
// Dependencies: crate::core::tags, serde
// ============================================================================

//! ## Overview
//! A variant is an ordered, non-empty sequence of tags naming one build
//! configuration (OS, optimization level, reference platform, compiler,
//! optional extras). Order is significant: it determines the on-disk build
//! path and the order of generated capability requirements.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::path::MAIN_SEPARATOR;

use serde::Deserialize;
use serde::Serialize;

use crate::core::tags::Tag;

// ============================================================================
// SECTION: Variant Type
// ============================================================================

/// Ordered tag sequence identifying one build configuration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Variant(Vec<Tag>);

impl Variant {
    /// Creates a variant from an ordered tag sequence.
    #[must_use]
    pub fn new(tags: impl IntoIterator<Item = Tag>) -> Self {
        Self(tags.into_iter().collect())
    }

    /// Returns the tags in declaration order.
    #[must_use]
    pub fn tags(&self) -> &[Tag] {
        &self.0
    }

    /// Returns the number of tags in the variant.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true when the variant holds no tags.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Joins the tags into a relative build path using the platform separator.
    #[must_use]
    pub fn build_path(&self) -> String {
        let mut path = String::new();
        for tag in &self.0 {
            if !path.is_empty() {
                path.push(MAIN_SEPARATOR);
            }
            path.push_str(tag.as_str());
        }
        path
    }

    /// Validates the variant structure and every tag it contains.
    ///
    /// # Errors
    ///
    /// Returns a message describing the first violated constraint.
    pub fn validate(&self) -> Result<(), String> {
        if self.0.is_empty() {
            return Err("variant must contain at least one tag".to_string());
        }
        for (index, tag) in self.0.iter().enumerate() {
            tag.validate().map_err(|err| format!("tag {index}: {err}"))?;
        }
        Ok(())
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, tag) in self.0.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            f.write_str(tag.as_str())?;
        }
        Ok(())
    }
}

impl From<Vec<Tag>> for Variant {
    fn from(tags: Vec<Tag>) -> Self {
        Self(tags)
    }
}

impl<const N: usize> From<[&str; N]> for Variant {
    fn from(tags: [&str; N]) -> Self {
        Self(tags.iter().map(|tag| Tag::new(*tag)).collect())
    }
}
