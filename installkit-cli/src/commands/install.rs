//! Install command - download, verify and run an installer.

use std::path::PathBuf;
use std::sync::Arc;

use console::style;
use installkit::{InstallerHandler, InstallerOrchestrator, InvocationContext};

use super::common::{http_service, load_manifest, ModeArg};
use crate::error::CliError;
use crate::progress::TerminalSink;
use crate::runner::CliRunner;

/// Arguments for the install command.
pub struct InstallArgs {
    pub manifest: PathBuf,
    pub location: Option<PathBuf>,
    pub log: Option<PathBuf>,
    pub mode: ModeArg,
    pub override_args: Option<String>,
    pub verbose: bool,
}

impl InstallArgs {
    fn context(&self) -> InvocationContext {
        let mut context = InvocationContext::new().with_mode(self.mode.into());
        if let Some(location) = &self.location {
            context = context.with_install_location(location.clone());
        }
        if let Some(log) = &self.log {
            context = context.with_log_path(log.clone());
        }
        if let Some(args) = &self.override_args {
            context = context.with_override_args(args.clone());
        }
        context
    }
}

/// Run the install command.
pub fn run(args: InstallArgs) -> Result<(), CliError> {
    let runner = CliRunner::new(args.verbose)?;
    runner.log_startup("install");
    let config = runner.config();

    let manifest = load_manifest(&args.manifest)?;
    let context = args.context();
    let service = http_service(config)?;

    let run = InstallerOrchestrator::new(
        &manifest,
        &context,
        &service,
        Arc::new(TerminalSink::new()),
        config,
    )?;
    // Cancelling the run also stops a running installer.
    runner.cancel_on_interrupt(run.cancel_token())?;
    let mut handler = InstallerHandler::for_manifest(run);

    println!(
        "Downloading {} installer from {}",
        manifest.installer_type,
        style(&manifest.url).cyan()
    );
    handler.download()?;
    println!("{} SHA-256 verified", style("✓").green());

    println!(
        "Installing to {}",
        style(handler.orchestrator().paths().install_path().display()).bold()
    );
    handler.install()?;
    println!("{} Installation complete", style("✓").green());

    Ok(())
}
