//! Gradle Build Script Scanning
//!
//! Reads an Android project's `app/build.gradle` without running Gradle:
//! discovers declared build types, splits a requested variant into flavor
//! and build type, and resolves where the build writes the generated
//! `AndroidManifest.xml`.

pub mod manifest_path;
pub mod scanner;
pub mod variants;

pub use manifest_path::{resolve_manifest_path, DEFAULT_VARIANT, GRADLE_BUILD_FILE};
pub use scanner::{BlockScan, BlockScanner};
pub use variants::{
    extract_variants, split_variant, VariantSplit, BUILD_TYPES_BLOCK, DEFAULT_BUILD_TYPES,
};

/// Build-script scanning errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Malformed build script: {0}")]
    Malformed(String),

    #[error("Pattern error: {0}")]
    Pattern(#[from] regex::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
