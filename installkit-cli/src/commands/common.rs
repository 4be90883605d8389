//! Common types and helpers shared across CLI commands.

use std::fs;
use std::path::Path;

use clap::ValueEnum;
use installkit::{HttpDownloadService, InstallMode, InstallerConfig, ManifestInstaller};

use crate::error::CliError;

/// Install mode selection for CLI arguments.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum ModeArg {
    /// Show the installer's full user interface
    Interactive,
    /// No user interface at all
    Silent,
    /// No prompts, but show the installer's progress
    SilentWithProgress,
}

impl From<ModeArg> for InstallMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Interactive => InstallMode::Interactive,
            ModeArg::Silent => InstallMode::Silent,
            ModeArg::SilentWithProgress => InstallMode::SilentWithProgress,
        }
    }
}

/// Read a manifest installer entry from a JSON file.
pub fn load_manifest(path: &Path) -> Result<ManifestInstaller, CliError> {
    let manifest_error = |reason: String| CliError::Manifest {
        path: path.display().to_string(),
        reason,
    };

    let json = fs::read_to_string(path).map_err(|e| manifest_error(e.to_string()))?;
    ManifestInstaller::from_json(&json).map_err(|e| manifest_error(e.to_string()))
}

/// HTTP transport using the configured timeout.
pub fn http_service(config: &InstallerConfig) -> Result<HttpDownloadService, CliError> {
    HttpDownloadService::with_timeout(config.timeout).map_err(|e| CliError::Config(e.to_string()))
}
