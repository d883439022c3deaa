//! Project Location
//!
//! Finds the Android project directory a run operates on.

use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use tracing::info;

use droidrun_gradle_config::GRADLE_BUILD_FILE;

/// A located Android application project.
#[derive(Debug, Clone)]
pub struct AndroidProject {
    /// Directory the tool was pointed at.
    pub root: PathBuf,
    /// Directory holding the Gradle project (`android/` or the root itself).
    pub android_dir: PathBuf,
}

impl AndroidProject {
    /// Locate the Android project under `root`.
    ///
    /// Accepts either a project root with an `android/` subdirectory or
    /// the Android directory itself; whichever contains
    /// `app/build.gradle` wins, preferring the subdirectory.
    pub fn locate(root: &Path) -> Result<Self> {
        let nested = root.join("android");

        let android_dir = if nested.join(GRADLE_BUILD_FILE).exists() {
            nested
        } else if root.join(GRADLE_BUILD_FILE).exists() {
            root.to_path_buf()
        } else {
            bail!(
                "No Android project found under {:?} (expected {})",
                root,
                GRADLE_BUILD_FILE
            );
        };

        info!("Using Android project at {:?}", android_dir);

        Ok(Self {
            root: root.to_path_buf(),
            android_dir,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn make_gradle_project(dir: &Path) {
        let app_dir = dir.join("app");
        std::fs::create_dir_all(&app_dir).unwrap();
        std::fs::write(app_dir.join("build.gradle"), "android {\n}\n").unwrap();
    }

    #[test]
    fn test_locate_android_subdirectory() {
        let root = TempDir::new().unwrap();
        make_gradle_project(&root.path().join("android"));

        let project = AndroidProject::locate(root.path()).unwrap();
        assert_eq!(project.android_dir, root.path().join("android"));
    }

    #[test]
    fn test_locate_direct_android_directory() {
        let root = TempDir::new().unwrap();
        make_gradle_project(root.path());

        let project = AndroidProject::locate(root.path()).unwrap();
        assert_eq!(project.android_dir, root.path());
    }

    #[test]
    fn test_locate_prefers_subdirectory() {
        let root = TempDir::new().unwrap();
        make_gradle_project(root.path());
        make_gradle_project(&root.path().join("android"));

        let project = AndroidProject::locate(root.path()).unwrap();
        assert_eq!(project.android_dir, root.path().join("android"));
    }

    #[test]
    fn test_locate_missing_project_fails() {
        let root = TempDir::new().unwrap();
        assert!(AndroidProject::locate(root.path()).is_err());
    }
}
