// crates/folio-matrix-cli/src/main.rs
// ============================================================================
// Module: Folio Matrix CLI Entry Point
// Description: Command dispatcher for manifest validation and artifacts.
// Purpose: Expose test-plan, environment, and validation workflows locally.
// Dependencies: clap, folio-matrix-config, folio-matrix-core, serde_json.
// ============================================================================

//! ## Overview
//! The Folio Matrix CLI loads a folio manifest, validates it fail-closed,
//! and emits the deterministic artifacts the build host consumes: the
//! expanded test plan and the environment setup actions. All output is
//! written through explicit stdout/stderr helpers.

// ============================================================================
// SECTION: Modules
// ============================================================================

#[cfg(test)]
mod main_tests;

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Args;
use clap::Parser;
use clap::Subcommand;
use folio_matrix_config::FolioManifest;
use folio_matrix_config::ManifestError;
use folio_matrix_config::manifest_toml_example;
use folio_matrix_core::PlanError;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "folio-matrix", version, about = "Folio manifest and test-matrix tooling")]
struct Cli {
    /// Selected subcommand to execute.
    #[command(subcommand)]
    command: Commands,
}

/// Supported subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Expand the manifest's variant matrix into the test plan.
    Plan(PlanArgs),
    /// Emit the environment setup actions applied on package activation.
    Env(ManifestArgs),
    /// Load and validate a manifest.
    Validate(ManifestArgs),
    /// Print the canonical example manifest.
    Example,
}

/// Arguments selecting the manifest to load.
#[derive(Args, Debug)]
struct ManifestArgs {
    /// Manifest path (defaults to `FOLIO_MATRIX_MANIFEST`, then `folio.toml`).
    #[arg(long, value_name = "PATH")]
    manifest: Option<PathBuf>,
}

/// Arguments for test-plan emission.
#[derive(Args, Debug)]
struct PlanArgs {
    /// Manifest selection.
    #[command(flatten)]
    manifest: ManifestArgs,
    /// Write the plan JSON to this file instead of stdout.
    #[arg(long, value_name = "PATH")]
    output: Option<PathBuf>,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI failure carrying a user-facing message.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Message written to stderr before exiting.
    message: String,
}

impl CliError {
    /// Creates a new CLI error.
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<ManifestError> for CliError {
    fn from(error: ManifestError) -> Self {
        Self::new(error.to_string())
    }
}

impl From<PlanError> for CliError {
    fn from(error: PlanError) -> Self {
        Self::new(error.to_string())
    }
}

/// Result alias for CLI operations.
type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// Process entry point: parse arguments, dispatch, map errors to exit codes.
fn main() -> ExitCode {
    match run(&Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            // Stderr failure here leaves no channel to report on.
            let _ = write_stderr_line(&error.to_string());
            ExitCode::FAILURE
        }
    }
}

/// Dispatches the parsed command.
fn run(cli: &Cli) -> CliResult<()> {
    match &cli.command {
        Commands::Plan(args) => run_plan(args),
        Commands::Env(args) => run_env(args),
        Commands::Validate(args) => run_validate(args),
        Commands::Example => run_example(),
    }
}

// ============================================================================
// SECTION: Commands
// ============================================================================

/// Loads the manifest and emits the expanded test plan as JSON.
fn run_plan(args: &PlanArgs) -> CliResult<()> {
    let manifest = load_manifest(&args.manifest)?;
    let plan = manifest.test_plan()?;
    let json = to_pretty_json(&plan)?;
    match &args.output {
        Some(path) => write_output_file(path, &json),
        None => write_stdout_line(&json)
            .map_err(|err| CliError::new(format!("stdout write failed: {err}"))),
    }
}

/// Loads the manifest and emits the environment setup actions as JSON.
fn run_env(args: &ManifestArgs) -> CliResult<()> {
    let manifest = load_manifest(args)?;
    let json = to_pretty_json(&manifest.environment_setup())?;
    write_stdout_line(&json).map_err(|err| CliError::new(format!("stdout write failed: {err}")))
}

/// Loads and validates the manifest, reporting a short summary.
fn run_validate(args: &ManifestArgs) -> CliResult<()> {
    let manifest = load_manifest(args)?;
    let summary = format!(
        "manifest ok: {}-{} ({} variants, {} smoke)",
        manifest.package.name,
        manifest.package.version,
        manifest.matrix.variants.len(),
        manifest.smoke_variants().len()
    );
    write_stdout_line(&summary).map_err(|err| CliError::new(format!("stdout write failed: {err}")))
}

/// Prints the canonical example manifest.
fn run_example() -> CliResult<()> {
    write_stdout_bytes(manifest_toml_example().as_bytes())
        .map_err(|err| CliError::new(format!("stdout write failed: {err}")))
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Loads the manifest selected by the arguments.
fn load_manifest(args: &ManifestArgs) -> CliResult<FolioManifest> {
    Ok(FolioManifest::load(args.manifest.as_deref())?)
}

/// Serializes a value as pretty-printed JSON.
fn to_pretty_json<T: Serialize>(value: &T) -> CliResult<String> {
    serde_json::to_string_pretty(value)
        .map_err(|err| CliError::new(format!("serialization failed: {err}")))
}

/// Writes an artifact to the given output file.
fn write_output_file(path: &Path, content: &str) -> CliResult<()> {
    let mut payload = content.to_string();
    payload.push('\n');
    fs::write(path, payload)
        .map_err(|err| CliError::new(format!("write {} failed: {err}", path.display())))
}

/// Writes a line to stdout.
fn write_stdout_line(message: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}")
}

/// Writes raw bytes to stdout without adding a newline.
fn write_stdout_bytes(bytes: &[u8]) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    stdout.write_all(bytes)
}

/// Writes a line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}
