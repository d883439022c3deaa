//! Generated Manifest Location
//!
//! Computes where a Gradle build writes the merged `AndroidManifest.xml`
//! for a given variant, relative to the Android project directory.

use std::path::{Path, PathBuf};

use regex::Regex;
use tracing::debug;

use crate::variants::split_variant;
use crate::ConfigError;

/// Build script location inside the Android project directory.
pub const GRADLE_BUILD_FILE: &str = "app/build.gradle";

/// Build type assumed when no variant is requested.
pub const DEFAULT_VARIANT: &str = "debug";

/// Assignment in the build script that switches on per-architecture builds.
const SEPARATE_BUILD_KEY: &str = "enableSeparateBuildPerCPUArchitecture";

/// Architecture directory inserted when per-architecture builds are on.
const SEPARATE_BUILD_ABI: &str = "x86";

/// Directory under which Gradle places merged manifests.
const MANIFEST_DIR: &[&str] = &["app", "build", "intermediates", "manifests", "full"];

/// Merged manifest file name.
const MANIFEST_FILE: &str = "AndroidManifest.xml";

/// Resolve the relative path of the generated manifest for `variant`.
///
/// Reads `app/build.gradle` under `android_dir`, splits the variant into
/// flavor and build type, and assembles the intermediates path Gradle uses
/// for the merged manifest. The returned path is relative to `android_dir`.
pub fn resolve_manifest_path(
    android_dir: &Path,
    variant: Option<&str>,
) -> Result<PathBuf, ConfigError> {
    let gradle_file = android_dir.join(GRADLE_BUILD_FILE);
    let content = std::fs::read_to_string(&gradle_file)?;

    let split = split_variant(&gradle_file, variant.unwrap_or(DEFAULT_VARIANT))?;

    let mut segments: Vec<String> = MANIFEST_DIR.iter().map(|s| s.to_string()).collect();
    if let Some(ref flavor) = split.flavor {
        segments.push(flavor.clone());
    }
    if separate_build_enabled(&content)? {
        segments.push(SEPARATE_BUILD_ABI.to_string());
    }
    segments.push(split.build_type.to_lowercase());
    segments.push(MANIFEST_FILE.to_string());

    let path: PathBuf = segments.iter().collect();
    debug!("resolved manifest path: {:?}", path);
    Ok(path)
}

/// Whether the build script enables per-architecture builds.
///
/// The assignment must be present; its value is compared case-insensitively
/// against "true".
fn separate_build_enabled(content: &str) -> Result<bool, ConfigError> {
    let pattern = format!(r"{}\s*=\s*((?i:true|false))", SEPARATE_BUILD_KEY);
    let re = Regex::new(&pattern)?;

    let caps = re.captures(content).ok_or_else(|| {
        ConfigError::Malformed(format!(
            "`{}` assignment not found in build script",
            SEPARATE_BUILD_KEY
        ))
    })?;

    Ok(caps[1].eq_ignore_ascii_case("true"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn android_project(separate_builds: &str) -> TempDir {
        let dir = TempDir::new().unwrap();
        let app_dir = dir.path().join("app");
        std::fs::create_dir_all(&app_dir).unwrap();
        let script = format!(
            r#"
def enableSeparateBuildPerCPUArchitecture = {}

android {{
    buildTypes {{
        release {{
            minifyEnabled true
        }}
    }}
}}
"#,
            separate_builds
        );
        std::fs::write(app_dir.join("build.gradle"), script).unwrap();
        dir
    }

    #[test]
    fn test_flavored_variant_without_separate_builds() {
        let dir = android_project("false");
        let path = resolve_manifest_path(dir.path(), Some("demoRelease")).unwrap();
        assert_eq!(
            path,
            PathBuf::from("app/build/intermediates/manifests/full/demo/release/AndroidManifest.xml")
        );
    }

    #[test]
    fn test_default_variant_with_separate_builds() {
        let dir = android_project("true");
        let path = resolve_manifest_path(dir.path(), None).unwrap();
        assert_eq!(
            path,
            PathBuf::from("app/build/intermediates/manifests/full/x86/debug/AndroidManifest.xml")
        );
    }

    #[test]
    fn test_flag_value_is_case_insensitive() {
        let dir = android_project("True");
        let path = resolve_manifest_path(dir.path(), Some("release")).unwrap();
        assert_eq!(
            path,
            PathBuf::from("app/build/intermediates/manifests/full/x86/release/AndroidManifest.xml")
        );
    }

    #[test]
    fn test_missing_flag_is_malformed() {
        let dir = TempDir::new().unwrap();
        let app_dir = dir.path().join("app");
        std::fs::create_dir_all(&app_dir).unwrap();
        std::fs::write(app_dir.join("build.gradle"), "android {\n}\n").unwrap();

        let result = resolve_manifest_path(dir.path(), Some("debug"));
        assert!(matches!(result, Err(ConfigError::Malformed(_))));
    }

    #[test]
    fn test_missing_build_script_propagates_io_error() {
        let dir = TempDir::new().unwrap();
        let result = resolve_manifest_path(dir.path(), None);
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
