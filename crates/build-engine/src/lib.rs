//! Build Engine
//!
//! Runs Gradle install tasks in the Android project directory and
//! coordinates the development server the app connects to at runtime.

pub mod gradle;
pub mod server;

pub use gradle::GradleRunner;
pub use server::{DevServer, DEFAULT_SERVER_PORT};

/// Build errors
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Build failed: {0}")]
    BuildFailed(String),
    #[error("Toolchain not found: {0}")]
    ToolchainNotFound(String),
    #[error("Dev server error: {0}")]
    Server(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
