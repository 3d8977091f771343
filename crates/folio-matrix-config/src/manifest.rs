// crates/folio-matrix-config/src/manifest.rs
// ============================================================================
// Module: Folio Manifest
// Description: Manifest loading and validation for package build metadata.
// Purpose: Provide strict, fail-closed manifest parsing with hard limits.
// Dependencies: folio-matrix-core, serde, toml
// ============================================================================

//! ## Overview
//! The folio manifest (`folio.toml`) declares a package's identity, build
//! system, dependency requirements, and build-variant matrix. Loading is
//! strict and fail-closed: path and size limits are enforced before parsing,
//! unknown fields are rejected, and semantic validation runs before the
//! manifest is handed to callers. All derived artifacts (test plan,
//! environment setup, effective build requirements) are deterministic
//! functions of the validated manifest.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

use folio_matrix_core::EnvPrepend;
use folio_matrix_core::PlanError;
use folio_matrix_core::Tag;
use folio_matrix_core::TestPlan;
use folio_matrix_core::Variant;
use folio_matrix_core::generate_test_plan;
use serde::Deserialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default manifest filename when no path is specified.
const DEFAULT_MANIFEST_NAME: &str = "folio.toml";
/// Environment variable used to override the manifest path.
pub(crate) const MANIFEST_ENV_VAR: &str = "FOLIO_MATRIX_MANIFEST";
/// Maximum manifest file size in bytes.
pub(crate) const MAX_MANIFEST_FILE_SIZE: usize = 1024 * 1024;
/// Maximum length of a single path component.
pub(crate) const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
pub(crate) const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Maximum number of variants in the matrix.
pub(crate) const MAX_VARIANTS: usize = 128;
/// Maximum number of requirement entries per list.
pub(crate) const MAX_REQUIREMENTS: usize = 256;
/// Maximum number of author entries.
pub(crate) const MAX_AUTHORS: usize = 16;
/// Maximum length of free-text fields (description, help).
pub(crate) const MAX_TEXT_LENGTH: usize = 4096;
/// Supported manifest format version.
pub(crate) const SUPPORTED_CONFIG_VERSION: u32 = 0;
/// Install target passed to scons builds.
const SCONS_INSTALL_TARGET: &str = "@install";
/// Extra scons targets enabled by `scons.unittest_xml`.
const SCONS_UNITTEST_TARGETS: [&str; 2] = ["@run_all", "--unittest-xml"];

// ============================================================================
// SECTION: Manifest Types
// ============================================================================

/// Folio package build manifest.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FolioManifest {
    /// Package identity and authorship metadata.
    pub package: PackageConfig,
    /// Build-system selection.
    #[serde(default)]
    pub build: BuildConfig,
    /// Package and build-time requirements.
    #[serde(default)]
    pub requirements: RequirementsConfig,
    /// Build-variant matrix.
    pub matrix: MatrixConfig,
    /// Scons target configuration (scons builds only).
    #[serde(default)]
    pub scons: SconsConfig,
    /// Test-plan generation settings.
    #[serde(default)]
    pub tests: TestsConfig,
}

impl FolioManifest {
    /// Loads a manifest from disk using the default resolution rules.
    ///
    /// Resolution order: explicit `path`, then the `FOLIO_MATRIX_MANIFEST`
    /// environment variable, then `folio.toml` in the working directory.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError`] when loading or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ManifestError> {
        let resolved = resolve_path(path)?;
        validate_path(&resolved)?;
        let bytes = fs::read(&resolved).map_err(|err| ManifestError::Io(err.to_string()))?;
        if bytes.len() > MAX_MANIFEST_FILE_SIZE {
            return Err(ManifestError::Invalid("manifest file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ManifestError::Invalid("manifest file must be utf-8".to_string()))?;
        Self::from_toml(content)
    }

    /// Parses and validates a manifest from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError`] when parsing or validation fails.
    pub fn from_toml(content: &str) -> Result<Self, ManifestError> {
        let manifest: Self =
            toml::from_str(content).map_err(|err| ManifestError::Parse(err.to_string()))?;
        manifest.validate()?;
        Ok(manifest)
    }

    /// Validates the manifest for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError`] when the manifest is invalid.
    pub fn validate(&self) -> Result<(), ManifestError> {
        self.package.validate()?;
        self.requirements.validate()?;
        self.matrix.validate()?;
        self.scons.validate(&self.matrix)?;
        self.tests.validate()?;
        Ok(())
    }

    /// Expands the variant matrix into the test plan for the build host.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError`] when generator preconditions are violated; a
    /// manifest that passed [`FolioManifest::validate`] always expands.
    pub fn test_plan(&self) -> Result<TestPlan, PlanError> {
        generate_test_plan(&self.matrix.variants, &self.tests.bootstrap, &self.tests.jobs)
    }

    /// Returns the environment actions the host applies on activation.
    #[must_use]
    pub fn environment_setup(&self) -> Vec<EnvPrepend> {
        match self.build.system {
            BuildSystem::Cmake => vec![
                EnvPrepend::new("CMAKE_MODULE_PATH", "{root}/lib64/cmake"),
                EnvPrepend::new("CMAKE_PREFIX_PATH", "{root}"),
                EnvPrepend::new("PATH", "{root}/bin"),
            ],
            BuildSystem::Scons => vec![EnvPrepend::new("PATH", "{root}/bin")],
        }
    }

    /// Returns the effective build-time requirements.
    ///
    /// The build-system bridge requirement comes first, then the declared
    /// private build requirements in manifest order.
    #[must_use]
    pub fn build_requirements(&self) -> Vec<Tag> {
        let mut requirements = Vec::with_capacity(self.requirements.private_build.len() + 1);
        requirements.push(Tag::new(self.build.system.bridge_requirement()));
        requirements.extend(self.requirements.private_build.iter().cloned());
        requirements
    }

    /// Returns the leading variants forming the reduced smoke matrix.
    #[must_use]
    pub fn smoke_variants(&self) -> &[Variant] {
        let count = self.tests.smoke_variant_count.min(self.matrix.variants.len());
        &self.matrix.variants[.. count]
    }

    /// Returns the per-reference-platform scons target lists.
    ///
    /// Empty for cmake builds. For scons builds each configured reference
    /// platform maps to the install target, plus the unittest targets when
    /// `scons.unittest_xml` is set.
    #[must_use]
    pub fn scons_targets(&self) -> BTreeMap<Tag, Vec<String>> {
        if self.build.system != BuildSystem::Scons {
            return BTreeMap::new();
        }
        let mut targets = vec![SCONS_INSTALL_TARGET.to_string()];
        if self.scons.unittest_xml {
            targets.extend(SCONS_UNITTEST_TARGETS.iter().map(ToString::to_string));
        }
        self.scons.refplats.iter().map(|refplat| (refplat.clone(), targets.clone())).collect()
    }
}

/// Package identity and authorship metadata.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PackageConfig {
    /// Package name.
    pub name: String,
    /// Package version.
    pub version: String,
    /// One-line package description.
    #[serde(default)]
    pub description: String,
    /// Author entries (team names or contact addresses).
    #[serde(default)]
    pub authors: Vec<String>,
    /// Free-text help blurb shown to package consumers.
    #[serde(default)]
    pub help: String,
    /// Stable package identity across renames.
    pub uuid: String,
    /// Manifest format version.
    #[serde(default)]
    pub config_version: u32,
}

impl PackageConfig {
    /// Validates package identity fields.
    fn validate(&self) -> Result<(), ManifestError> {
        validate_name("package.name", &self.name)?;
        validate_version("package.version", &self.version)?;
        if self.description.len() > MAX_TEXT_LENGTH {
            return Err(ManifestError::Invalid(
                "package.description exceeds max length".to_string(),
            ));
        }
        if self.help.len() > MAX_TEXT_LENGTH {
            return Err(ManifestError::Invalid("package.help exceeds max length".to_string()));
        }
        if self.authors.len() > MAX_AUTHORS {
            return Err(ManifestError::Invalid("package.authors exceeds max entries".to_string()));
        }
        for (index, author) in self.authors.iter().enumerate() {
            if author.trim().is_empty() {
                return Err(ManifestError::Invalid(format!(
                    "package.authors[{index}] must be non-empty"
                )));
            }
        }
        validate_uuid("package.uuid", &self.uuid)?;
        if self.config_version != SUPPORTED_CONFIG_VERSION {
            return Err(ManifestError::Invalid(format!(
                "package.config_version {} is unsupported (expected {SUPPORTED_CONFIG_VERSION})",
                self.config_version
            )));
        }
        Ok(())
    }
}

/// Supported build systems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BuildSystem {
    /// CMake build driven through the cmake modules bridge.
    #[default]
    Cmake,
    /// Scons build driven through the bart scons bridge.
    Scons,
}

impl BuildSystem {
    /// Returns the build-system bridge requirement tag.
    #[must_use]
    pub const fn bridge_requirement(self) -> &'static str {
        match self {
            Self::Cmake => "cmake_modules",
            Self::Scons => "bart_scons-10",
        }
    }
}

/// Build-system selection.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BuildConfig {
    /// Selected build system.
    #[serde(default)]
    pub system: BuildSystem,
}

/// Package and build-time requirements.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RequirementsConfig {
    /// Requirements of the installed package.
    #[serde(default)]
    pub run: Vec<Tag>,
    /// Requirements needed only while building.
    #[serde(default)]
    pub private_build: Vec<Tag>,
}

impl RequirementsConfig {
    /// Validates requirement lists.
    fn validate(&self) -> Result<(), ManifestError> {
        validate_tag_list("requirements.run", &self.run)?;
        validate_tag_list("requirements.private_build", &self.private_build)?;
        Ok(())
    }
}

/// Build-variant matrix.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MatrixConfig {
    /// Ordered variant list; index order determines generated test names.
    pub variants: Vec<Variant>,
}

impl MatrixConfig {
    /// Validates the variant matrix.
    fn validate(&self) -> Result<(), ManifestError> {
        if self.variants.is_empty() {
            return Err(ManifestError::Invalid(
                "matrix.variants must contain at least one variant".to_string(),
            ));
        }
        if self.variants.len() > MAX_VARIANTS {
            return Err(ManifestError::Invalid("matrix.variants exceeds max entries".to_string()));
        }
        for (index, variant) in self.variants.iter().enumerate() {
            variant
                .validate()
                .map_err(|err| ManifestError::Invalid(format!("matrix.variants[{index}]: {err}")))?;
        }
        Ok(())
    }

    /// Returns true when any variant contains the tag.
    fn contains_tag(&self, tag: &Tag) -> bool {
        self.variants.iter().any(|variant| variant.tags().contains(tag))
    }
}

/// Scons target configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SconsConfig {
    /// Reference platforms that receive scons target lists.
    #[serde(default)]
    pub refplats: Vec<Tag>,
    /// Add the xml-reporting unittest targets to every target list.
    #[serde(default)]
    pub unittest_xml: bool,
}

impl SconsConfig {
    /// Validates scons settings against the variant matrix.
    fn validate(&self, matrix: &MatrixConfig) -> Result<(), ManifestError> {
        validate_tag_list("scons.refplats", &self.refplats)?;
        for refplat in &self.refplats {
            if !matrix.contains_tag(refplat) {
                return Err(ManifestError::Invalid(format!(
                    "scons.refplats entry {refplat} does not appear in any variant"
                )));
            }
        }
        Ok(())
    }
}

/// Test-plan generation settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TestsConfig {
    /// Bootstrap capability tag required by every generated test entry.
    #[serde(default = "default_bootstrap")]
    pub bootstrap: Tag,
    /// Shell-evaluable parallelism expression passed to the test runner.
    #[serde(default = "default_jobs")]
    pub jobs: String,
    /// Number of leading variants forming the reduced smoke matrix; counts
    /// beyond the matrix size clamp to the variant count.
    #[serde(default = "default_smoke_variant_count")]
    pub smoke_variant_count: usize,
}

impl Default for TestsConfig {
    fn default() -> Self {
        Self {
            bootstrap: default_bootstrap(),
            jobs: default_jobs(),
            smoke_variant_count: default_smoke_variant_count(),
        }
    }
}

impl TestsConfig {
    /// Validates test settings.
    ///
    /// The smoke count only needs a lower bound here: counts beyond the
    /// matrix size clamp in [`FolioManifest::smoke_variants`].
    fn validate(&self) -> Result<(), ManifestError> {
        self.bootstrap
            .validate()
            .map_err(|err| ManifestError::Invalid(format!("tests.bootstrap: {err}")))?;
        if self.jobs.trim().is_empty() {
            return Err(ManifestError::Invalid("tests.jobs must be non-empty".to_string()));
        }
        if self.smoke_variant_count == 0 {
            return Err(ManifestError::Invalid(
                "tests.smoke_variant_count must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised while loading or validating a manifest.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ManifestError {
    /// I/O failure while reading the manifest.
    #[error("manifest io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("manifest parse error: {0}")]
    Parse(String),
    /// Invalid manifest data.
    #[error("invalid manifest: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Defaults
// ============================================================================

/// Default bootstrap capability tag.
fn default_bootstrap() -> Tag {
    Tag::new("cmake-3.23")
}

/// Default parallelism expression.
fn default_jobs() -> String {
    "$(nproc)".to_string()
}

/// Default smoke matrix size.
const fn default_smoke_variant_count() -> usize {
    2
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Resolves the manifest path from the caller or environment defaults.
fn resolve_path(path: Option<&Path>) -> Result<PathBuf, ManifestError> {
    if let Some(path) = path {
        return Ok(path.to_path_buf());
    }
    if let Ok(env_path) = env::var(MANIFEST_ENV_VAR) {
        if env_path.len() > MAX_TOTAL_PATH_LENGTH {
            return Err(ManifestError::Invalid("manifest path exceeds max length".to_string()));
        }
        return Ok(PathBuf::from(env_path));
    }
    Ok(PathBuf::from(DEFAULT_MANIFEST_NAME))
}

/// Validates the resolved path against length limits.
fn validate_path(path: &Path) -> Result<(), ManifestError> {
    let text = path.to_string_lossy();
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ManifestError::Invalid("manifest path exceeds max length".to_string()));
    }
    for component in path.components() {
        let value = component.as_os_str().to_string_lossy();
        if value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ManifestError::Invalid("manifest path component too long".to_string()));
        }
    }
    Ok(())
}

/// Validates a package name field.
fn validate_name(field: &str, value: &str) -> Result<(), ManifestError> {
    if value.is_empty() {
        return Err(ManifestError::Invalid(format!("{field} must be non-empty")));
    }
    if value.len() > MAX_PATH_COMPONENT_LENGTH {
        return Err(ManifestError::Invalid(format!("{field} exceeds max length")));
    }
    if !value.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_')) {
        return Err(ManifestError::Invalid(format!(
            "{field} must contain only alphanumerics, hyphens, and underscores"
        )));
    }
    Ok(())
}

/// Validates a version string field.
fn validate_version(field: &str, value: &str) -> Result<(), ManifestError> {
    if value.is_empty() {
        return Err(ManifestError::Invalid(format!("{field} must be non-empty")));
    }
    if !value.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-')) {
        return Err(ManifestError::Invalid(format!("{field} contains unsupported characters")));
    }
    if !value.starts_with(|c: char| c.is_ascii_digit()) {
        return Err(ManifestError::Invalid(format!("{field} must start with a digit")));
    }
    Ok(())
}

/// Validates the hyphenated uuid form (8-4-4-4-12 hex digits).
fn validate_uuid(field: &str, value: &str) -> Result<(), ManifestError> {
    let groups: Vec<&str> = value.split('-').collect();
    let expected_lengths = [8, 4, 4, 4, 12];
    let well_formed = groups.len() == expected_lengths.len()
        && groups
            .iter()
            .zip(expected_lengths)
            .all(|(group, len)| group.len() == len && group.chars().all(|c| c.is_ascii_hexdigit()));
    if well_formed {
        Ok(())
    } else {
        Err(ManifestError::Invalid(format!("{field} must be a hyphenated uuid")))
    }
}

/// Validates every tag in a requirement list.
fn validate_tag_list(field: &str, tags: &[Tag]) -> Result<(), ManifestError> {
    if tags.len() > MAX_REQUIREMENTS {
        return Err(ManifestError::Invalid(format!("{field} exceeds max entries")));
    }
    for (index, tag) in tags.iter().enumerate() {
        tag.validate().map_err(|err| ManifestError::Invalid(format!("{field}[{index}]: {err}")))?;
    }
    Ok(())
}
