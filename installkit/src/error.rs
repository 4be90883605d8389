//! Error types for installer handling.
//!
//! Every failure a caller might want to present differently gets its own
//! variant: a corrupted download, a network failure, a user cancellation and
//! an unimplemented backend are all distinguishable by matching on
//! [`InstallerError`].

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::manifest::InstallerType;

/// Result type for installer operations.
pub type InstallerResult<T> = Result<T, InstallerError>;

/// Errors produced while downloading, verifying, or running an installer.
#[derive(Debug, Error)]
pub enum InstallerError {
    /// The transfer itself failed (network, disk, permissions).
    #[error("failed to download {url}: {source}")]
    Download {
        url: String,
        #[source]
        source: TransportError,
    },

    /// The downloaded bytes do not hash to the expected digest.
    #[error("installer hash mismatch: expected {expected}, got {actual}")]
    IntegrityVerification { expected: String, actual: String },

    /// The user or the system asked for the operation to stop.
    #[error("operation canceled")]
    Canceled,

    /// The backend for this installer technology does not implement the operation.
    #[error("{operation} is not supported for {technology} installers")]
    NotSupported {
        operation: &'static str,
        technology: InstallerType,
    },

    /// An operation needing the local artifact ran before a successful download.
    #[error("installer has not been downloaded")]
    NotDownloaded,

    /// A user-supplied path contains an argument token such as `<LOGPATH>`.
    #[error("path {} contains the reserved token {token}", .path.display())]
    ReservedToken { path: PathBuf, token: &'static str },

    /// The run already holds a verified artifact.
    #[error("installer has already been downloaded")]
    AlreadyDownloaded,

    /// Failed to create the private staging file for the download.
    #[error("failed to create staging file in {}: {source}", .path.display())]
    Staging {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Failed to read a file (e.g. while hashing it).
    #[error("failed to read {}: {source}", .path.display())]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The installer process could not be started.
    #[error("failed to launch installer {}: {source}", .path.display())]
    Launch {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Waiting on or signalling the installer process failed.
    #[error("failed to monitor installer process: {0}")]
    Wait(#[source] io::Error),

    /// The installer process exited unsuccessfully.
    #[error("installer failed with exit code {}", .exit_code.map_or_else(|| "none".to_string(), |c| c.to_string()))]
    InstallFailed { exit_code: Option<i32> },
}

impl InstallerError {
    /// Whether this error represents a cancellation rather than a failure.
    pub fn is_canceled(&self) -> bool {
        matches!(self, Self::Canceled)
    }
}

/// Failures reported by a [`DownloadService`](crate::download::DownloadService).
#[derive(Debug, Error)]
pub enum TransportError {
    /// The server answered with a non-success status.
    #[error("server returned status {status}")]
    Http { status: u16 },

    /// The request could not be sent or the body could not be read.
    #[error("request failed: {0}")]
    Request(String),

    /// The request did not finish in time.
    #[error("request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    /// Writing the destination file failed.
    #[error("failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The transfer stopped because cancellation was requested.
    #[error("transfer canceled")]
    Canceled,

    /// The transport returned without reporting completion.
    #[error("transfer ended without completing")]
    Incomplete,
}
