// crates/folio-matrix-core/src/core/plan.rs
// ============================================================================
// Module: Folio Matrix Test Plan
// Description: Deterministic expansion of a variant list into a test plan.
// Purpose: Produce the named test definitions consumed by the build host.
// Dependencies: crate::core::{tags, variant}, serde, thiserror
// ============================================================================

//! ## Overview
//! The test-plan generator expands an ordered variant list into one test
//! entry per variant. Entry `i` is named `variant<i>`, runs the test runner
//! inside `build/<joined variant path>`, and requires the bootstrap tag
//! followed by every tag of variant `i` in declaration order.
//!
//! Generation is a pure function: identical inputs always produce
//! structurally equal plans, and invalid inputs fail closed before any entry
//! is produced.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::path::MAIN_SEPARATOR;

use serde::Deserialize;
use serde::Serialize;
use serde::ser::SerializeMap;
use thiserror::Error;

use crate::core::tags::Tag;
use crate::core::variant::Variant;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Literal prefix of every generated test name.
const TEST_NAME_PREFIX: &str = "variant";
/// Relative directory holding the per-variant build trees.
const BUILD_TREE_DIR: &str = "build";
/// Test runner invoked inside each variant build tree.
const TEST_RUNNER: &str = "ctest";

// ============================================================================
// SECTION: Test Plan Types
// ============================================================================

/// Name of a generated test entry (`variant<i>`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TestName(String);

impl TestName {
    /// Derives the entry name for the variant at `index`.
    #[must_use]
    pub fn from_index(index: usize) -> Self {
        Self(format!("{TEST_NAME_PREFIX}{index}"))
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TestName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// One generated test definition.
///
/// The name doubles as the mapping key, so it is skipped when the entry is
/// serialized as a map value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TestPlanEntry {
    /// Unique entry name derived from the variant index.
    #[serde(skip)]
    pub name: TestName,
    /// Shell command the orchestrator runs for this entry.
    pub command: String,
    /// Capability tags required before the command may run: the bootstrap
    /// tag first, then every variant tag in declaration order.
    pub requires: Vec<Tag>,
}

/// Mapping from test name to test definition, in variant-list order.
///
/// Stored as an explicit insertion-ordered sequence of key/value records;
/// key uniqueness holds by construction because names derive from distinct
/// indices. Serializes as a JSON map keyed by entry name.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TestPlan {
    /// Entries in variant-list order.
    entries: Vec<TestPlanEntry>,
}

impl TestPlan {
    /// Returns the number of entries in the plan.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when the plan holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Looks up an entry by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&TestPlanEntry> {
        self.entries.iter().find(|entry| entry.name.as_str() == name)
    }

    /// Returns the entries in variant-list order.
    #[must_use]
    pub fn entries(&self) -> &[TestPlanEntry] {
        &self.entries
    }
}

impl Serialize for TestPlan {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(&entry.name, entry)?;
        }
        map.end()
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors produced by test-plan generation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanError {
    /// Generator preconditions were violated; no entries were produced.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

// ============================================================================
// SECTION: Generator
// ============================================================================

/// Expands an ordered variant list into a test plan.
///
/// `bootstrap` is the capability tag required by every generated entry (for
/// example the build-tool version). `jobs_expr` is a shell-evaluable
/// parallelism expression such as `$(nproc)`; it is host-supplied trusted
/// configuration and is embedded verbatim.
///
/// # Errors
///
/// Returns [`PlanError::InvalidInput`] when the variant list is empty, any
/// variant is empty or carries an unsafe tag, the bootstrap tag is unsafe,
/// or the jobs expression is blank.
pub fn generate_test_plan(
    variants: &[Variant],
    bootstrap: &Tag,
    jobs_expr: &str,
) -> Result<TestPlan, PlanError> {
    if variants.is_empty() {
        return Err(PlanError::InvalidInput("variant list must be non-empty".to_string()));
    }
    bootstrap
        .validate()
        .map_err(|err| PlanError::InvalidInput(format!("bootstrap tag: {err}")))?;
    if jobs_expr.trim().is_empty() {
        return Err(PlanError::InvalidInput("jobs expression must be non-empty".to_string()));
    }
    let mut entries = Vec::with_capacity(variants.len());
    for (index, variant) in variants.iter().enumerate() {
        variant
            .validate()
            .map_err(|err| PlanError::InvalidInput(format!("variants[{index}]: {err}")))?;
        let mut requires = Vec::with_capacity(variant.len() + 1);
        requires.push(bootstrap.clone());
        requires.extend(variant.tags().iter().cloned());
        entries.push(TestPlanEntry {
            name: TestName::from_index(index),
            command: variant_command(variant, jobs_expr),
            requires,
        });
    }
    Ok(TestPlan { entries })
}

/// Builds the shell command for one variant's build tree.
fn variant_command(variant: &Variant, jobs_expr: &str) -> String {
    format!(
        "cd {BUILD_TREE_DIR}{MAIN_SEPARATOR}{path}; {TEST_RUNNER} -j {jobs_expr}",
        path = variant.build_path()
    )
}
