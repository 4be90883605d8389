//! CLI error handling with user-friendly messages.
//!
//! Each installer failure kind maps to its own exit code so scripts can tell
//! a corrupted download from a network problem or a cancellation.

use std::fmt;
use std::process;

use installkit::InstallerError;

/// Exit code for integrity verification failures.
pub const EXIT_INTEGRITY: i32 = 2;
/// Exit code for download failures.
pub const EXIT_DOWNLOAD: i32 = 3;
/// Exit code for cancellation.
pub const EXIT_CANCELED: i32 = 4;
/// Exit code for operations the installer technology does not support.
pub const EXIT_NOT_SUPPORTED: i32 = 5;

/// CLI-specific errors with user-friendly messages.
#[derive(Debug)]
pub enum CliError {
    /// Failed to initialize logging
    LoggingInit(String),
    /// Configuration error
    Config(String),
    /// Manifest file could not be read or parsed
    Manifest { path: String, reason: String },
    /// Failed to write output file
    FileWrite { path: String, error: std::io::Error },
    /// Download, verification or install failed
    Installer(InstallerError),
}

impl CliError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Installer(InstallerError::IntegrityVerification { .. }) => EXIT_INTEGRITY,
            CliError::Installer(InstallerError::Download { .. }) => EXIT_DOWNLOAD,
            CliError::Installer(InstallerError::Canceled) => EXIT_CANCELED,
            CliError::Installer(InstallerError::NotSupported { .. }) => EXIT_NOT_SUPPORTED,
            _ => 1,
        }
    }

    /// Exit the process with an appropriate error message and code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);

        match self {
            CliError::Installer(InstallerError::IntegrityVerification { .. }) => {
                eprintln!();
                eprintln!("The downloaded file does not match the manifest hash.");
                eprintln!("It has been deleted. Check the manifest or try again later.");
            }
            CliError::Installer(InstallerError::NotSupported { .. }) => {
                eprintln!();
                eprintln!("Use `installkit download --output <FILE>` to fetch the installer");
                eprintln!("and run it manually.");
            }
            _ => {}
        }

        process::exit(self.exit_code())
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::LoggingInit(msg) => write!(f, "Failed to initialize logging: {}", msg),
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::Manifest { path, reason } => {
                write!(f, "Invalid manifest '{}': {}", path, reason)
            }
            CliError::FileWrite { path, error } => {
                write!(f, "Failed to write file '{}': {}", path, error)
            }
            CliError::Installer(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::FileWrite { error, .. } => Some(error),
            CliError::Installer(e) => Some(e),
            _ => None,
        }
    }
}

impl From<InstallerError> for CliError {
    fn from(e: InstallerError) -> Self {
        CliError::Installer(e)
    }
}

impl From<installkit::config::ConfigFileError> for CliError {
    fn from(e: installkit::config::ConfigFileError) -> Self {
        CliError::Config(e.to_string())
    }
}
