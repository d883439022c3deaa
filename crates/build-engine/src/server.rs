//! Development Server
//!
//! Probes for a running development server and starts one when absent.
//! The app installed on the device connects back to this server through
//! the reversed port.

use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;
use tracing::{debug, info};

use crate::BuildError;

/// Default development server port.
pub const DEFAULT_SERVER_PORT: u16 = 8081;

/// Body marker a healthy server reports on its status endpoint.
const STATUS_RUNNING: &str = "packager-status:running";

/// How long to wait for a freshly spawned server to come up.
const STARTUP_TIMEOUT: Duration = Duration::from_secs(30);

/// Delay between readiness probes.
const STARTUP_POLL: Duration = Duration::from_millis(500);

/// Development server handle bound to a project root and port.
pub struct DevServer {
    root: PathBuf,
    port: u16,
    command: Vec<String>,
}

impl DevServer {
    /// Create a handle for the server of the project at `root`.
    pub fn new(root: PathBuf, port: u16) -> Self {
        Self {
            root,
            port,
            command: vec!["npm".to_string(), "start".to_string()],
        }
    }

    /// Override the command used to start the server.
    pub fn with_command(mut self, command: Vec<String>) -> Self {
        self.command = command;
        self
    }

    /// Check the status endpoint for a running server.
    pub async fn is_running(&self) -> bool {
        let url = format!("http://localhost:{}/status", self.port);

        let client = match reqwest::Client::builder()
            .timeout(Duration::from_secs(2))
            .build()
        {
            Ok(client) => client,
            Err(_) => return false,
        };

        match client.get(&url).send().await {
            Ok(response) => match response.text().await {
                Ok(body) => body.contains(STATUS_RUNNING),
                Err(_) => false,
            },
            Err(err) => {
                debug!("dev server probe failed: {}", err);
                false
            }
        }
    }

    /// Make sure a server is reachable, spawning one when it is not.
    ///
    /// Returns true when a new server process was started. A spawned
    /// server that never reports ready within the startup deadline is an
    /// error; the process itself is left running detached either way.
    pub async fn ensure_running(&self) -> Result<bool, BuildError> {
        if self.is_running().await {
            info!("Dev server already running on port {}", self.port);
            return Ok(false);
        }

        self.spawn()?;

        let deadline = tokio::time::Instant::now() + STARTUP_TIMEOUT;
        while tokio::time::Instant::now() < deadline {
            if self.is_running().await {
                info!("Dev server up on port {}", self.port);
                return Ok(true);
            }
            tokio::time::sleep(STARTUP_POLL).await;
        }

        Err(BuildError::Server(format!(
            "server did not report ready on port {} within {}s",
            self.port,
            STARTUP_TIMEOUT.as_secs()
        )))
    }

    /// Spawn the configured server command detached in the project root.
    fn spawn(&self) -> Result<(), BuildError> {
        let (program, args) = self
            .command
            .split_first()
            .ok_or_else(|| BuildError::Server("empty server command".into()))?;

        info!("Starting dev server: {}", self.command.join(" "));

        Command::new(program)
            .args(args)
            .current_dir(&self.root)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|err| BuildError::Server(format!("failed to start server: {}", err)))?;

        Ok(())
    }
}
