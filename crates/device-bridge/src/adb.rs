//! ADB (Android Debug Bridge) Client
//!
//! Communicates with devices via ADB.

use std::path::PathBuf;

use tokio::process::Command;
use tracing::debug;

use crate::device::{Device, DeviceState, DeviceType};

/// ADB errors
#[derive(Debug, thiserror::Error)]
pub enum AdbError {
    #[error("ADB command failed: {0}")]
    CommandFailed(String),
    #[error("No usable device attached")]
    NoDevices,
    #[error("Device not found: {0}")]
    DeviceNotFound(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// ADB Client
pub struct AdbClient {
    adb_path: PathBuf,
}

impl AdbClient {
    /// Create a client using an explicit adb executable.
    pub fn new(adb_path: PathBuf) -> Self {
        Self { adb_path }
    }

    /// Create a client from the environment.
    ///
    /// Prefers `platform-tools/adb` under `ANDROID_HOME` or
    /// `ANDROID_SDK_ROOT`; falls back to `adb` on the PATH.
    pub fn from_env() -> Self {
        let adb_name = if cfg!(windows) { "adb.exe" } else { "adb" };

        let sdk_adb = std::env::var("ANDROID_HOME")
            .or_else(|_| std::env::var("ANDROID_SDK_ROOT"))
            .map(PathBuf::from)
            .map(|sdk| sdk.join("platform-tools").join(adb_name))
            .ok()
            .filter(|path| path.exists());

        Self {
            adb_path: sdk_adb.unwrap_or_else(|| PathBuf::from(adb_name)),
        }
    }

    /// Run an ADB command
    async fn run(&self, args: &[&str]) -> Result<String, AdbError> {
        debug!("adb {:?}", args);

        let output = Command::new(&self.adb_path).args(args).output().await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(AdbError::CommandFailed(stderr.trim().to_string()));
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }

    /// Run an ADB command for a specific device
    async fn run_for_device(&self, serial: &str, args: &[&str]) -> Result<String, AdbError> {
        let mut full_args = vec!["-s", serial];
        full_args.extend(args);
        self.run(&full_args).await
    }

    /// Start the ADB server
    pub async fn start_server(&self) -> Result<(), AdbError> {
        self.run(&["start-server"]).await?;
        Ok(())
    }

    /// List connected devices
    pub async fn list_devices(&self) -> Result<Vec<Device>, AdbError> {
        let output = self.run(&["devices", "-l"]).await?;
        Ok(parse_device_list(&output))
    }

    /// Usable devices to target, optionally narrowed to one serial.
    ///
    /// Fails when no online device is attached, or when `serial` names a
    /// device that is not attached and online.
    pub async fn usable_devices(&self, serial: Option<&str>) -> Result<Vec<Device>, AdbError> {
        let devices: Vec<Device> = self
            .list_devices()
            .await?
            .into_iter()
            .filter(|d| d.is_usable())
            .collect();

        match serial {
            Some(serial) => devices
                .into_iter()
                .find(|d| d.serial == serial)
                .map(|d| vec![d])
                .ok_or_else(|| AdbError::DeviceNotFound(serial.to_string())),
            None if devices.is_empty() => Err(AdbError::NoDevices),
            None => Ok(devices),
        }
    }

    /// Run a shell command on device
    pub async fn shell(&self, serial: &str, command: &str) -> Result<String, AdbError> {
        self.run_for_device(serial, &["shell", command]).await
    }

    /// Reverse a port (device connects to host)
    pub async fn reverse(&self, serial: &str, remote_port: u16, local_port: u16) -> Result<(), AdbError> {
        let remote = format!("tcp:{}", remote_port);
        let local = format!("tcp:{}", local_port);
        self.run_for_device(serial, &["reverse", &remote, &local])
            .await?;
        Ok(())
    }

    /// Launch an activity
    pub async fn start_activity(&self, serial: &str, component: &str) -> Result<(), AdbError> {
        self.shell(serial, &format!("am start -n {}", component))
            .await?;
        Ok(())
    }
}

/// Parse the output of `adb devices -l`.
fn parse_device_list(output: &str) -> Vec<Device> {
    let mut devices = Vec::new();

    for line in output.lines().skip(1) {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() < 2 {
            continue;
        }

        let serial = parts[0].to_string();
        let state = DeviceState::parse(parts[1]);

        let mut model = None;
        let mut product = None;
        for part in parts.iter().skip(2) {
            if let Some(value) = part.strip_prefix("model:") {
                model = Some(value.to_string());
            } else if let Some(value) = part.strip_prefix("product:") {
                product = Some(value.to_string());
            }
        }

        let device_type = if serial.starts_with("emulator-") {
            DeviceType::Emulator
        } else {
            DeviceType::Physical
        };

        devices.push(Device {
            serial,
            state,
            device_type,
            model,
            product,
        });
    }

    devices
}
