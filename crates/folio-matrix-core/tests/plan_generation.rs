// crates/folio-matrix-core/tests/plan_generation.rs
// ============================================================================
// Module: Test-Plan Generation Tests
// Description: Validate deterministic variant-to-test-plan expansion.
// Purpose: Ensure naming, command, and requirement invariants hold.
// ============================================================================

//! Example-driven tests for test-plan generation.

use std::path::MAIN_SEPARATOR;

use folio_matrix_core::PlanError;
use folio_matrix_core::Tag;
use folio_matrix_core::TestPlan;
use folio_matrix_core::Variant;
use folio_matrix_core::generate_test_plan;

type TestResult = Result<(), String>;

/// Jobs expression used across tests.
const JOBS: &str = "$(nproc)";

fn bootstrap() -> Tag {
    Tag::new("cmake-3.23")
}

fn sample_variants() -> Vec<Variant> {
    vec![
        Variant::from(["os-rocky-9", "opt_level-optdebug", "refplat-vfx2023.1", "gcc-11.x"]),
        Variant::from(["os-rocky-9", "opt_level-debug", "refplat-vfx2023.1", "gcc-11.x"]),
        Variant::from([
            "os-rocky-9",
            "opt_level-optdebug",
            "refplat-vfx2023.1",
            "clang-17",
            "opencolorio-2",
        ]),
    ]
}

fn generate(variants: &[Variant]) -> Result<TestPlan, String> {
    generate_test_plan(variants, &bootstrap(), JOBS).map_err(|err| err.to_string())
}

fn assert_invalid(result: Result<TestPlan, PlanError>, needle: &str) -> TestResult {
    match result {
        Err(error) => {
            let message = error.to_string();
            if message.contains(needle) {
                Ok(())
            } else {
                Err(format!("error {message} did not contain {needle}"))
            }
        }
        Ok(_) => Err("expected generation to fail".to_string()),
    }
}

#[test]
fn generates_one_entry_per_variant() -> TestResult {
    let variants = sample_variants();
    let plan = generate(&variants)?;
    if plan.len() != variants.len() {
        return Err(format!("expected {} entries, got {}", variants.len(), plan.len()));
    }
    for index in 0 .. variants.len() {
        let name = format!("variant{index}");
        if plan.get(&name).is_none() {
            return Err(format!("missing entry {name}"));
        }
    }
    Ok(())
}

#[test]
fn single_variant_yields_variant0() -> TestResult {
    let variants = vec![Variant::from(["os-rocky-9", "gcc-11.x"])];
    let plan = generate(&variants)?;
    if plan.len() != 1 {
        return Err(format!("expected 1 entry, got {}", plan.len()));
    }
    plan.get("variant0").map(|_| ()).ok_or_else(|| "missing variant0".to_string())
}

#[test]
fn worked_example_matches_expected_entry() -> TestResult {
    let variants =
        vec![Variant::from(["os-rocky-9", "opt_level-optdebug", "refplat-vfx2023.1", "gcc-11.x"])];
    let plan = generate(&variants)?;
    let entry = plan.get("variant0").ok_or_else(|| "missing variant0".to_string())?;
    let sep = MAIN_SEPARATOR;
    let expected_command = format!(
        "cd build{sep}os-rocky-9{sep}opt_level-optdebug{sep}refplat-vfx2023.1{sep}gcc-11.x; \
         ctest -j $(nproc)"
    );
    if entry.command != expected_command {
        return Err(format!("command {} != {expected_command}", entry.command));
    }
    let expected_requires =
        ["cmake-3.23", "os-rocky-9", "opt_level-optdebug", "refplat-vfx2023.1", "gcc-11.x"];
    let actual: Vec<&str> = entry.requires.iter().map(Tag::as_str).collect();
    if actual != expected_requires {
        return Err(format!("requires {actual:?} != {expected_requires:?}"));
    }
    Ok(())
}

#[test]
fn requires_lists_bootstrap_then_variant_tags() -> TestResult {
    let variants = sample_variants();
    let plan = generate(&variants)?;
    for (index, variant) in variants.iter().enumerate() {
        let name = format!("variant{index}");
        let entry = plan.get(&name).ok_or_else(|| format!("missing {name}"))?;
        if entry.requires.len() != variant.len() + 1 {
            return Err(format!("{name}: unexpected requires length {}", entry.requires.len()));
        }
        if entry.requires[0] != bootstrap() {
            return Err(format!("{name}: bootstrap tag not first"));
        }
        if &entry.requires[1 ..] != variant.tags() {
            return Err(format!("{name}: variant tags out of order"));
        }
    }
    Ok(())
}

#[test]
fn commands_differ_only_in_path_segment() -> TestResult {
    let variants = sample_variants();
    let plan = generate(&variants)?;
    let sep = MAIN_SEPARATOR;
    let prefix = format!("cd build{sep}");
    let suffix = "; ctest -j $(nproc)";
    for (index, variant) in variants.iter().enumerate() {
        let name = format!("variant{index}");
        let entry = plan.get(&name).ok_or_else(|| format!("missing {name}"))?;
        let middle = entry
            .command
            .strip_prefix(&prefix)
            .and_then(|rest| rest.strip_suffix(suffix))
            .ok_or_else(|| format!("{name}: command {} has unexpected shape", entry.command))?;
        if middle != variant.build_path() {
            return Err(format!("{name}: path segment {middle} != {}", variant.build_path()));
        }
    }
    Ok(())
}

#[test]
fn generation_is_idempotent() -> TestResult {
    let variants = sample_variants();
    let first = generate(&variants)?;
    let second = generate(&variants)?;
    if first == second {
        Ok(())
    } else {
        Err("identical inputs produced different plans".to_string())
    }
}

#[test]
fn plan_serializes_as_name_keyed_map() -> TestResult {
    let variants = sample_variants();
    let plan = generate(&variants)?;
    let value = serde_json::to_value(&plan).map_err(|err| err.to_string())?;
    let object = value.as_object().ok_or_else(|| "plan did not serialize as a map".to_string())?;
    if object.len() != variants.len() {
        return Err(format!("expected {} keys, got {}", variants.len(), object.len()));
    }
    let entry = object.get("variant0").ok_or_else(|| "missing variant0 key".to_string())?;
    if entry.get("command").and_then(serde_json::Value::as_str).is_none() {
        return Err("variant0 entry missing command".to_string());
    }
    let requires = entry
        .get("requires")
        .and_then(serde_json::Value::as_array)
        .ok_or_else(|| "variant0 entry missing requires".to_string())?;
    if requires.first().and_then(serde_json::Value::as_str) != Some("cmake-3.23") {
        return Err("bootstrap tag not first in serialized requires".to_string());
    }
    Ok(())
}

#[test]
fn rejects_empty_variant_list() -> TestResult {
    assert_invalid(generate_test_plan(&[], &bootstrap(), JOBS), "variant list must be non-empty")
}

#[test]
fn rejects_empty_variant() -> TestResult {
    let variants = vec![Variant::from(["os-rocky-9"]), Variant::new(Vec::new())];
    assert_invalid(generate_test_plan(&variants, &bootstrap(), JOBS), "variants[1]")
}

#[test]
fn rejects_unsafe_tag() -> TestResult {
    let variants = vec![Variant::from(["os-rocky-9", "../escape"])];
    assert_invalid(generate_test_plan(&variants, &bootstrap(), JOBS), "unsupported character")
}

#[test]
fn rejects_unsafe_bootstrap_tag() -> TestResult {
    let variants = sample_variants();
    let bootstrap = Tag::new("cmake 3.23; rm");
    assert_invalid(generate_test_plan(&variants, &bootstrap, JOBS), "bootstrap tag")
}

#[test]
fn rejects_blank_jobs_expression() -> TestResult {
    let variants = sample_variants();
    assert_invalid(
        generate_test_plan(&variants, &bootstrap(), "  "),
        "jobs expression must be non-empty",
    )
}
