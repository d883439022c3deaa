//! Build Variant Discovery and Splitting
//!
//! Finds the build types a build script declares and splits a combined
//! variant name like `demoRelease` into its flavor and build type parts.

use std::path::Path;

use regex::RegexBuilder;
use tracing::debug;

use crate::scanner::BlockScanner;
use crate::ConfigError;

/// Build types assumed when the build script declares none.
pub const DEFAULT_BUILD_TYPES: &[&str] = &["debug", "release"];

/// Block holding build-type declarations in a build script.
pub const BUILD_TYPES_BLOCK: &str = "buildTypes";

/// A variant name split into its build type and optional flavor prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantSplit {
    /// Base build type, case preserved from the requested variant.
    pub build_type: String,
    /// Flavor prefix, present only when text preceded the build type.
    pub flavor: Option<String>,
}

/// Collect the names of the direct sub-blocks of `block_name`.
///
/// The block header is matched case-insensitively. The result is seeded
/// with `defaults` and keeps first-seen order; names already present are
/// not appended again. Content without the block yields `defaults`
/// unchanged.
pub fn extract_variants(
    content: &str,
    block_name: &str,
    defaults: &[&str],
) -> Result<Vec<String>, ConfigError> {
    let mut variants: Vec<String> = defaults.iter().map(|s| s.to_string()).collect();

    let header = format!(r"{}\s*\{{", regex::escape(block_name));
    let re = RegexBuilder::new(&header).case_insensitive(true).build()?;

    if let Some(m) = re.find(content) {
        let block = BlockScanner::new(content).scan_block(m.end())?;
        for child in block.children {
            if !variants.contains(&child) {
                variants.push(child);
            }
        }
        debug!("found {} variants in `{}` block", variants.len(), block_name);
    }

    Ok(variants)
}

/// Split `variant` against the build types declared in `gradle_file`.
///
/// The declared build types (plus the defaults) form a case-insensitive
/// alternation; the leftmost match in `variant` marks the start of the
/// build type and everything before it is the flavor. Ties between names
/// matching at the same position go to the earlier entry in the list, so
/// the declaration order in the build script is significant. A variant
/// with no match is returned whole as the build type.
pub fn split_variant(gradle_file: &Path, variant: &str) -> Result<VariantSplit, ConfigError> {
    let content = std::fs::read_to_string(gradle_file)?;
    let build_types = extract_variants(&content, BUILD_TYPES_BLOCK, DEFAULT_BUILD_TYPES)?;
    split_against(variant, &build_types)
}

fn split_against(variant: &str, build_types: &[String]) -> Result<VariantSplit, ConfigError> {
    let alternation = build_types
        .iter()
        .map(|name| regex::escape(name))
        .collect::<Vec<_>>()
        .join("|");
    let re = RegexBuilder::new(&alternation)
        .case_insensitive(true)
        .build()?;

    let split = match re.find(variant) {
        Some(m) => {
            let (flavor, build_type) = variant.split_at(m.start());
            VariantSplit {
                build_type: build_type.to_string(),
                flavor: (!flavor.is_empty()).then(|| flavor.to_string()),
            }
        }
        None => VariantSplit {
            build_type: variant.to_string(),
            flavor: None,
        },
    };

    debug!("split variant `{}` into {:?}", variant, split);
    Ok(split)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const WITH_BUILD_TYPES: &str = r#"
android {
    defaultConfig {
        applicationId "com.example.app"
    }
    buildTypes {
        release {
            minifyEnabled true
        }
        staging {
            debuggable true
        }
    }
}
"#;

    const WITHOUT_BUILD_TYPES: &str = r#"
android {
    defaultConfig {
        applicationId "com.example.app"
    }
}
"#;

    fn gradle_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_extract_merges_declared_types_after_defaults() {
        let variants =
            extract_variants(WITH_BUILD_TYPES, BUILD_TYPES_BLOCK, DEFAULT_BUILD_TYPES).unwrap();
        assert_eq!(variants, vec!["debug", "release", "staging"]);
    }

    #[test]
    fn test_extract_without_block_returns_defaults() {
        let variants =
            extract_variants(WITHOUT_BUILD_TYPES, BUILD_TYPES_BLOCK, DEFAULT_BUILD_TYPES).unwrap();
        assert_eq!(variants, vec!["debug", "release"]);
    }

    #[test]
    fn test_extract_is_idempotent() {
        let first =
            extract_variants(WITH_BUILD_TYPES, BUILD_TYPES_BLOCK, DEFAULT_BUILD_TYPES).unwrap();
        let second =
            extract_variants(WITH_BUILD_TYPES, BUILD_TYPES_BLOCK, DEFAULT_BUILD_TYPES).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_extract_block_name_is_case_insensitive() {
        let content = "BUILDTYPES {\n    beta {\n    }\n}";
        let variants = extract_variants(content, BUILD_TYPES_BLOCK, DEFAULT_BUILD_TYPES).unwrap();
        assert_eq!(variants, vec!["debug", "release", "beta"]);
    }

    #[test]
    fn test_extract_suppresses_duplicates() {
        let content = "buildTypes {\n    debug {\n    }\n    release {\n    }\n}";
        let variants = extract_variants(content, BUILD_TYPES_BLOCK, DEFAULT_BUILD_TYPES).unwrap();
        assert_eq!(variants, vec!["debug", "release"]);
    }

    #[test]
    fn test_split_flavored_variant() {
        let file = gradle_file(WITHOUT_BUILD_TYPES);
        let split = split_variant(file.path(), "demoRelease").unwrap();
        assert_eq!(split.build_type, "Release");
        assert_eq!(split.flavor.as_deref(), Some("demo"));
    }

    #[test]
    fn test_split_plain_build_type() {
        let file = gradle_file(WITHOUT_BUILD_TYPES);
        let split = split_variant(file.path(), "release").unwrap();
        assert_eq!(split.build_type, "release");
        assert_eq!(split.flavor, None);
    }

    #[test]
    fn test_split_unknown_variant_is_whole_build_type() {
        let file = gradle_file(WITHOUT_BUILD_TYPES);
        let split = split_variant(file.path(), "nightly").unwrap();
        assert_eq!(split.build_type, "nightly");
        assert_eq!(split.flavor, None);
    }

    #[test]
    fn test_split_against_declared_custom_type() {
        let file = gradle_file(WITH_BUILD_TYPES);
        let split = split_variant(file.path(), "demoStaging").unwrap();
        assert_eq!(split.build_type, "Staging");
        assert_eq!(split.flavor.as_deref(), Some("demo"));
    }

    #[test]
    fn test_split_missing_file_propagates_io_error() {
        let result = split_variant(Path::new("/nonexistent/build.gradle"), "debug");
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
