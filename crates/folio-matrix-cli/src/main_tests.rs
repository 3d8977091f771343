// crates/folio-matrix-cli/src/main_tests.rs
// ============================================================================
// Module: CLI Unit Tests
// Description: Argument parsing and command dispatch tests.
// Purpose: Ensure the CLI surface stays stable and artifacts are well-formed.
// ============================================================================

//! ## Overview
//! Unit tests for CLI argument parsing and file-backed command flows.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use std::fs;
use std::io::Write;

use clap::CommandFactory;
use clap::Parser;
use folio_matrix_config::manifest_toml_example;
use tempfile::NamedTempFile;
use tempfile::TempDir;

use crate::Cli;
use crate::Commands;
use crate::run;

#[test]
fn cli_definition_is_consistent() {
    Cli::command().debug_assert();
}

#[test]
fn parses_plan_with_manifest_and_output() {
    let cli = Cli::parse_from([
        "folio-matrix",
        "plan",
        "--manifest",
        "pkg/folio.toml",
        "--output",
        "plan.json",
    ]);
    match cli.command {
        Commands::Plan(args) => {
            assert_eq!(args.manifest.manifest.as_deref().unwrap().to_str(), Some("pkg/folio.toml"));
            assert_eq!(args.output.as_deref().unwrap().to_str(), Some("plan.json"));
        }
        other => panic!("unexpected command {other:?}"),
    }
}

#[test]
fn parses_validate_without_manifest_flag() {
    let cli = Cli::parse_from(["folio-matrix", "validate"]);
    match cli.command {
        Commands::Validate(args) => assert!(args.manifest.is_none()),
        other => panic!("unexpected command {other:?}"),
    }
}

#[test]
fn plan_command_writes_expected_json_artifact() {
    let mut manifest = NamedTempFile::new().unwrap();
    manifest.write_all(manifest_toml_example().as_bytes()).unwrap();
    let output_dir = TempDir::new().unwrap();
    let output = output_dir.path().join("plan.json");
    let cli = Cli::parse_from([
        "folio-matrix",
        "plan",
        "--manifest",
        manifest.path().to_str().unwrap(),
        "--output",
        output.to_str().unwrap(),
    ]);
    run(&cli).unwrap();
    let payload = fs::read_to_string(&output).unwrap();
    let value: serde_json::Value = serde_json::from_str(&payload).unwrap();
    let object = value.as_object().unwrap();
    assert_eq!(object.len(), 3);
    let entry = object.get("variant0").unwrap();
    assert!(entry.get("command").unwrap().as_str().unwrap().starts_with("cd build"));
    assert_eq!(
        entry.get("requires").unwrap().as_array().unwrap()[0].as_str(),
        Some("cmake-3.23")
    );
}

#[test]
fn plan_command_fails_on_missing_manifest() {
    let cli =
        Cli::parse_from(["folio-matrix", "plan", "--manifest", "no-such-dir/no-such-folio.toml"]);
    let error = run(&cli).unwrap_err();
    assert!(error.to_string().contains("manifest io error"));
}

#[test]
fn validate_command_rejects_malformed_manifest() {
    let mut manifest = NamedTempFile::new().unwrap();
    manifest.write_all(b"[package]\nname = \"x\"\n").unwrap();
    let cli = Cli::parse_from([
        "folio-matrix",
        "validate",
        "--manifest",
        manifest.path().to_str().unwrap(),
    ]);
    let error = run(&cli).unwrap_err();
    assert!(error.to_string().contains("manifest parse error"));
}
