//! Gradle Invocation
//!
//! Wraps the project's Gradle wrapper for install and clean tasks.

use std::path::PathBuf;

use tokio::process::Command;
use tracing::{debug, info};

use crate::BuildError;

/// Gradle wrapper runner for an Android project directory.
///
/// The working directory is always passed to the spawned process
/// explicitly; the tool's own working directory is never changed.
pub struct GradleRunner {
    project_dir: PathBuf,
    module: String,
    java_home: Option<PathBuf>,
    android_home: Option<PathBuf>,
}

impl GradleRunner {
    /// Create a runner for the given Android project directory.
    pub fn new(project_dir: PathBuf) -> Self {
        Self {
            project_dir,
            module: "app".to_string(),
            java_home: None,
            android_home: None,
        }
    }

    /// Set the Gradle module to build (default: app)
    pub fn with_module(mut self, module: impl Into<String>) -> Self {
        self.module = module.into();
        self
    }

    /// Set JAVA_HOME
    pub fn with_java_home(mut self, path: PathBuf) -> Self {
        self.java_home = Some(path);
        self
    }

    /// Set ANDROID_HOME
    pub fn with_android_home(mut self, path: PathBuf) -> Self {
        self.android_home = Some(path);
        self
    }

    /// Get gradlew path
    fn gradlew_path(&self) -> PathBuf {
        let wrapper_name = if cfg!(windows) {
            "gradlew.bat"
        } else {
            "gradlew"
        };
        self.project_dir.join(wrapper_name)
    }

    /// Check if Gradle wrapper exists
    pub fn has_gradle_wrapper(&self) -> bool {
        self.gradlew_path().exists()
    }

    /// Module-scoped install task for a variant, e.g. `:app:installDebug`.
    pub fn install_task(&self, variant: &str) -> String {
        format!(":{}:install{}", self.module, capitalize(variant))
    }

    /// Build and install a variant on attached devices.
    ///
    /// With `device_serial` set, Gradle targets that device through
    /// `ANDROID_SERIAL`; otherwise it installs on every attached device.
    /// Gradle output streams to the console.
    pub async fn install_variant(
        &self,
        variant: &str,
        device_serial: Option<&str>,
    ) -> Result<(), BuildError> {
        let task = self.install_task(variant);
        info!("Building and installing with Gradle task {}", task);
        self.run_task(&task, device_serial).await
    }

    /// Clean build
    pub async fn clean(&self) -> Result<(), BuildError> {
        info!("Cleaning Gradle build...");
        self.run_task("clean", None).await
    }

    async fn run_task(&self, task: &str, device_serial: Option<&str>) -> Result<(), BuildError> {
        if !self.has_gradle_wrapper() {
            return Err(BuildError::ToolchainNotFound(
                "Gradle wrapper not found".into(),
            ));
        }

        debug!("Running: gradlew {} in {:?}", task, self.project_dir);

        let mut cmd = Command::new(self.gradlew_path());
        cmd.current_dir(&self.project_dir);
        cmd.arg(task);
        cmd.arg("--console=plain");

        if let Some(ref java_home) = self.java_home {
            cmd.env("JAVA_HOME", java_home);
        }
        if let Some(ref android_home) = self.android_home {
            cmd.env("ANDROID_HOME", android_home);
            cmd.env("ANDROID_SDK_ROOT", android_home);
        }
        if let Some(serial) = device_serial {
            cmd.env("ANDROID_SERIAL", serial);
        }

        let status = cmd.status().await?;

        if !status.success() {
            return Err(BuildError::BuildFailed(format!(
                "gradlew {} exited with {}",
                task, status
            )));
        }

        Ok(())
    }
}

/// Uppercase the first character, as Gradle task names expect.
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
