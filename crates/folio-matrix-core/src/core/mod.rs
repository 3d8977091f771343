// crates/folio-matrix-core/src/core/mod.rs
// ============================================================================
// Module: Folio Matrix Core Types
// Description: Canonical build-variant and test-plan structures.
// Purpose: Provide stable, serializable types for build orchestration hosts.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Core types model one package's build-variant matrix and the artifacts
//! derived from it: the expanded test plan and the environment setup actions.
//! These types are the canonical source of truth for any host-facing surface.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod environment;
pub mod plan;
pub mod tags;
pub mod variant;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use environment::EnvPrepend;
pub use plan::PlanError;
pub use plan::TestName;
pub use plan::TestPlan;
pub use plan::TestPlanEntry;
pub use plan::generate_test_plan;
pub use tags::MAX_TAG_LENGTH;
pub use tags::Tag;
pub use variant::Variant;
