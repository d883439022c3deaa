//! Tool Configuration
//!
//! Optional `droidrun.toml` settings, read from the project root first and
//! the user config directory second; everything has a default.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Per-project configuration file name.
pub const CONFIG_FILE: &str = "droidrun.toml";

/// Tool configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolConfig {
    /// Development server settings
    pub server: ServerConfig,
    /// Gradle settings
    pub gradle: GradleConfig,
}

/// Development server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Port the server listens on
    pub port: u16,
    /// Command used to start the server
    pub command: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: droidrun_build_engine::DEFAULT_SERVER_PORT,
            command: vec!["npm".to_string(), "start".to_string()],
        }
    }
}

/// Gradle settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GradleConfig {
    /// Module whose install tasks are run
    pub module: String,
}

impl Default for GradleConfig {
    fn default() -> Self {
        Self {
            module: "app".to_string(),
        }
    }
}

impl ToolConfig {
    /// Load configuration for a project, falling back to defaults.
    pub fn load(project_root: &Path) -> Result<Self> {
        for path in Self::candidate_paths(project_root) {
            if path.exists() {
                info!("Loading configuration from {:?}", path);
                let content = std::fs::read_to_string(&path)
                    .with_context(|| format!("failed to read {:?}", path))?;
                let config = toml::from_str(&content)
                    .with_context(|| format!("failed to parse {:?}", path))?;
                return Ok(config);
            }
        }

        debug!("No configuration file found, using defaults");
        Ok(Self::default())
    }

    fn candidate_paths(project_root: &Path) -> Vec<PathBuf> {
        let mut paths = vec![project_root.join(CONFIG_FILE)];
        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("droidrun").join("config.toml"));
        }
        paths
    }
}
