//! Download command - fetch and verify an installer without running it.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use console::style;
use installkit::{InstallerOrchestrator, InvocationContext};

use super::common::{http_service, load_manifest};
use crate::error::CliError;
use crate::progress::TerminalSink;
use crate::runner::CliRunner;

/// Arguments for the download command.
pub struct DownloadArgs {
    pub manifest: PathBuf,
    pub output: Option<PathBuf>,
    pub verbose: bool,
}

/// Run the download command.
pub fn run(args: DownloadArgs) -> Result<(), CliError> {
    let runner = CliRunner::new(args.verbose)?;
    runner.log_startup("download");
    let config = runner.config();

    let manifest = load_manifest(&args.manifest)?;
    let context = InvocationContext::new();
    let service = http_service(config)?;

    let mut run = InstallerOrchestrator::new(
        &manifest,
        &context,
        &service,
        Arc::new(TerminalSink::new()),
        config,
    )?;
    runner.cancel_on_interrupt(run.cancel_token())?;

    println!("Downloading {}", style(&manifest.url).cyan());
    let installer = run.download()?;
    println!("{} SHA-256 verified", style("✓").green());

    // The staged file is removed when the run ends, so keep a copy if asked.
    if let Some(output) = &args.output {
        fs::copy(installer, output).map_err(|error| CliError::FileWrite {
            path: output.display().to_string(),
            error,
        })?;
        println!("Saved to {}", style(output.display()).bold());
    }

    Ok(())
}
