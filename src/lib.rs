//! DroidRun
//!
//! Builds an Android app project with Gradle, coordinates the development
//! server the app talks to, and installs and launches the app on attached
//! devices and emulators.
//!
//! ## Architecture
//!
//! DroidRun is organized into specialized crates:
//!
//! - `droidrun-gradle-config`: build-script scanning (variants, manifest path)
//! - `droidrun-manifest`: generated AndroidManifest.xml reading
//! - `droidrun-device-bridge`: ADB device operations
//! - `droidrun-build-engine`: Gradle invocation and dev-server coordination

pub mod commands;
pub mod config;
pub mod project;

// Re-export workspace crates for library usage
pub use droidrun_build_engine as build;
pub use droidrun_device_bridge as device;
pub use droidrun_gradle_config as gradle_config;
pub use droidrun_manifest as manifest;

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
