// crates/folio-matrix-config/src/examples.rs
// ============================================================================
// Module: Manifest Examples
// Description: Canonical example manifest payloads.
// Purpose: Deterministic examples for docs and tooling.
// Dependencies: std
// ============================================================================

//! ## Overview
//! Canonical example for the folio manifest. The output is deterministic,
//! passes full validation, and is kept in sync with the manifest model.

/// Returns a canonical example `folio.toml` manifest.
#[must_use]
pub fn manifest_toml_example() -> String {
    String::from(
        r#"[package]
name = "render_gui"
version = "14.1"
description = "Interactive render preview package"
authors = ["Rendering Tools", "render-tools@example.com"]
help = "For assistance, please contact the folio's owner at: render-tools@example.com"
uuid = "8f3b2a10-5c44-4e8a-9d27-3e61a0f4c5b9"
config_version = 0

[build]
system = "cmake"

[requirements]
run = ["mkl", "moonray-14.1", "mcrt_denoise-3.1", "qt"]
private_build = ["cppunit"]

[matrix]
variants = [
    ["os-rocky-9", "opt_level-optdebug", "refplat-vfx2023.1", "gcc-11.x"],
    ["os-rocky-9", "opt_level-debug", "refplat-vfx2023.1", "gcc-11.x"],
    ["os-rocky-9", "opt_level-optdebug", "refplat-vfx2023.1", "clang-17", "opencolorio-2"],
]

[tests]
bootstrap = "cmake-3.23"
jobs = "$(nproc)"
smoke_variant_count = 2
"#,
    )
}
