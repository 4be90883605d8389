//! CLI runner for common setup.
//!
//! Loads the config file, initializes logging and wires Ctrl+C to
//! cancellation so each command handler doesn't repeat it.

use tokio_util::sync::CancellationToken;
use tracing::info;

use installkit::config::ConfigFile;
use installkit::logging::{init_logging, LoggingGuard, DEFAULT_LOG_FILE};
use installkit::InstallerConfig;

use crate::error::CliError;

/// Runner that manages CLI lifecycle and common operations.
pub struct CliRunner {
    /// Keeps logging active while the runner exists.
    _logging_guard: LoggingGuard,
    config: InstallerConfig,
}

impl CliRunner {
    /// Load config and initialize logging.
    ///
    /// # Arguments
    ///
    /// * `verbose` - When true, logs at debug level unless RUST_LOG says otherwise
    pub fn new(verbose: bool) -> Result<Self, CliError> {
        let config = ConfigFile::load()?.to_installer_config();

        let directive = if verbose { "debug" } else { "warn" };
        let logging_guard = init_logging(&config.log_dir, DEFAULT_LOG_FILE, directive)
            .map_err(|e| CliError::LoggingInit(e.to_string()))?;

        Ok(Self {
            _logging_guard: logging_guard,
            config,
        })
    }

    /// Resolved installer settings.
    pub fn config(&self) -> &InstallerConfig {
        &self.config
    }

    /// Log startup information for a command.
    pub fn log_startup(&self, command: &str) {
        info!("installkit v{}", installkit::VERSION);
        info!(
            command,
            staging_dir = %self.config.staging_dir.display(),
            "Starting"
        );
    }

    /// Cancel `token` when the user presses Ctrl+C.
    pub fn cancel_on_interrupt(&self, token: CancellationToken) -> Result<(), CliError> {
        ctrlc::set_handler(move || {
            eprintln!();
            eprintln!("Received interrupt, canceling...");
            token.cancel();
        })
        .map_err(|e| CliError::Config(format!("Failed to set signal handler: {}", e)))
    }
}
