//! CLI commands for DroidRun
//!
//! Implements the run and devices commands on top of the workspace crates.

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use tracing::{info, warn};

use droidrun_build_engine::{DevServer, GradleRunner};
use droidrun_device_bridge::AdbClient;
use droidrun_gradle_config::{resolve_manifest_path, DEFAULT_VARIANT};
use droidrun_manifest::ManifestParser;

use crate::config::ToolConfig;
use crate::project::AndroidProject;

/// Run command options
pub struct RunCommand {
    pub project_path: PathBuf,
    pub variant: Option<String>,
    pub device_serial: Option<String>,
    pub port: Option<u16>,
    pub no_server: bool,
    pub clean: bool,
}

impl RunCommand {
    /// Execute the run command
    pub async fn execute(&self) -> Result<()> {
        let project = AndroidProject::locate(&self.project_path)?;
        let config = ToolConfig::load(&project.root)?;
        let port = self.port.unwrap_or(config.server.port);

        // Fail fast when nothing is attached before spending time in Gradle
        let adb = AdbClient::from_env();
        adb.start_server().await?;
        let devices = adb.usable_devices(self.device_serial.as_deref()).await?;
        info!(
            "Deploying to {} device(s): {}",
            devices.len(),
            devices
                .iter()
                .map(|d| d.display_name())
                .collect::<Vec<_>>()
                .join(", ")
        );

        if !self.no_server {
            let server = DevServer::new(project.root.clone(), port)
                .with_command(config.server.command.clone());
            server.ensure_running().await?;
        }

        let variant = self.variant.as_deref().unwrap_or(DEFAULT_VARIANT);
        let gradle = GradleRunner::new(project.android_dir.clone())
            .with_module(config.gradle.module.clone());
        if self.clean {
            gradle.clean().await?;
        }
        gradle
            .install_variant(variant, self.device_serial.as_deref())
            .await?;

        // The build just wrote the merged manifest; read the launch
        // component out of it
        let manifest_rel = resolve_manifest_path(&project.android_dir, self.variant.as_deref())?;
        let manifest_path = project.android_dir.join(&manifest_rel);
        let manifest = ManifestParser::parse_file(&manifest_path)
            .await
            .with_context(|| format!("failed to read generated manifest {:?}", manifest_path))?;
        let component = manifest
            .launch_component()
            .ok_or_else(|| anyhow!("no launchable activity in {:?}", manifest_path))?;

        let launches = devices.iter().map(|device| {
            let adb = &adb;
            let component = component.as_str();
            async move {
                // A failed reverse only breaks live reload, not the app
                if let Err(err) = adb.reverse(&device.serial, port, port).await {
                    warn!(
                        "Could not reverse port {} on {}: {}",
                        port,
                        device.display_name(),
                        err
                    );
                }

                adb.start_activity(&device.serial, component)
                    .await
                    .with_context(|| {
                        format!("failed to start {} on {}", component, device.display_name())
                    })?;
                info!("Started {} on {}", component, device.display_name());
                Ok::<(), anyhow::Error>(())
            }
        });
        futures::future::try_join_all(launches).await?;

        Ok(())
    }
}

/// Device list command
pub struct DevicesCommand {
    pub json: bool,
}

impl DevicesCommand {
    /// List all connected devices
    pub async fn execute(&self) -> Result<()> {
        let adb = AdbClient::from_env();
        adb.start_server().await?;
        let devices = adb.list_devices().await?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&devices)?);
            return Ok(());
        }

        if devices.is_empty() {
            println!("No devices connected");
        } else {
            println!("Connected devices:");
            for device in devices {
                println!("  {} - {}", device.display_name(), device.state.as_str());
            }
        }

        Ok(())
    }
}
