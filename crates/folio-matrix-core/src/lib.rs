// crates/folio-matrix-core/src/lib.rs
// ============================================================================
// Module: Folio Matrix Core Library
// Description: Public API surface for the Folio Matrix core.
// Purpose: Expose tag, variant, environment, and test-plan types.
// Dependencies: crate::core
// ============================================================================

//! ## Overview
//! Folio Matrix core provides the build-variant domain model and the
//! deterministic variant-to-test-plan expansion consumed by package build
//! orchestration. Every operation is a pure function over explicit inputs:
//! no I/O, no ambient process state, no randomness.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use crate::core::environment::EnvPrepend;
pub use crate::core::plan::PlanError;
pub use crate::core::plan::TestName;
pub use crate::core::plan::TestPlan;
pub use crate::core::plan::TestPlanEntry;
pub use crate::core::plan::generate_test_plan;
pub use crate::core::tags::MAX_TAG_LENGTH;
pub use crate::core::tags::Tag;
pub use crate::core::variant::Variant;
