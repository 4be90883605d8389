//! installkit CLI - download, verify and run software installers.

mod commands;
mod error;
mod progress;
mod runner;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use commands::common::ModeArg;
use commands::download::DownloadArgs;
use commands::install::InstallArgs;

#[derive(Parser)]
#[command(name = "installkit")]
#[command(version, about = "Download, verify and run software installers", long_about = None)]
struct Cli {
    /// Log at debug level (overridden by RUST_LOG)
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Download an installer and verify its SHA-256 hash
    Download {
        /// Manifest installer entry (JSON)
        #[arg(long)]
        manifest: PathBuf,

        /// Keep a copy of the verified installer at this path
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Download, verify and run an installer
    Install {
        /// Manifest installer entry (JSON)
        #[arg(long)]
        manifest: PathBuf,

        /// Install directory (replaces <INSTALLPATH>)
        #[arg(long)]
        location: Option<PathBuf>,

        /// Installer log file (replaces <LOGPATH>)
        #[arg(long)]
        log: Option<PathBuf>,

        /// How much of the installer's UI to show
        #[arg(long, value_enum, default_value = "silent-with-progress")]
        mode: ModeArg,

        /// Pass these arguments to the installer instead of the manifest switches
        #[arg(long = "override", allow_hyphen_values = true)]
        override_args: Option<String>,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Download { manifest, output } => commands::download::run(DownloadArgs {
            manifest,
            output,
            verbose: cli.verbose,
        }),
        Commands::Install {
            manifest,
            location,
            log,
            mode,
            override_args,
        } => commands::install::run(InstallArgs {
            manifest,
            location,
            log,
            mode,
            override_args,
            verbose: cli.verbose,
        }),
    };

    if let Err(e) = result {
        e.exit();
    }
}
