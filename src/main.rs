//! DroidRun - Android build-and-run CLI
//!
//! Parses arguments, initializes logging, and dispatches to the
//! run/devices commands.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{debug, Level};
use tracing_subscriber::FmtSubscriber;

use droidrun::commands::{DevicesCommand, RunCommand};

#[derive(Parser)]
#[command(name = "droidrun")]
#[command(version, about = "Build, deploy and launch Android app projects", long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the app and launch it on attached devices
    Run {
        /// Project root (defaults to the current directory)
        #[arg(long, default_value = ".")]
        path: PathBuf,

        /// Build variant, e.g. debug, release or demoRelease
        #[arg(long)]
        variant: Option<String>,

        /// Target a single device by serial
        #[arg(long)]
        device: Option<String>,

        /// Development server port
        #[arg(long)]
        port: Option<u16>,

        /// Skip development server coordination
        #[arg(long)]
        no_server: bool,

        /// Run a Gradle clean before building
        #[arg(long)]
        clean: bool,
    },
    /// List attached devices and emulators
    Devices {
        /// Print devices as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");

    debug!("droidrun v{}", droidrun::VERSION);

    match cli.command {
        Commands::Run {
            path,
            variant,
            device,
            port,
            no_server,
            clean,
        } => {
            RunCommand {
                project_path: path,
                variant,
                device_serial: device,
                port,
                no_server,
                clean,
            }
            .execute()
            .await
        }
        Commands::Devices { json } => DevicesCommand { json }.execute().await,
    }
}
