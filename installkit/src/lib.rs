//! installkit - download, verify and run software installers.
//!
//! A run starts from a [`ManifestInstaller`] (where to fetch the installer,
//! its SHA-256 digest and technology) and an [`InvocationContext`] (what the
//! user asked for). [`InstallerOrchestrator::download`] fetches the file
//! through a [`DownloadService`], relaying progress to a shared
//! [`ProgressSink`], and verifies the digest. An [`InstallerBackend`] chosen
//! for the installer technology then runs it.
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use installkit::{
//!     HttpDownloadService, InstallerConfig, InstallerHandler, InstallerOrchestrator,
//!     InstallerType, InvocationContext, ManifestInstaller, TracingProgressSink,
//! };
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let manifest = ManifestInstaller::new(
//!     "https://example.com/setup.exe",
//!     "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824",
//!     InstallerType::Inno,
//! );
//! let context = InvocationContext::new();
//! let config = InstallerConfig::default();
//! let service = HttpDownloadService::with_timeout(config.timeout)?;
//!
//! let run = InstallerOrchestrator::new(
//!     &manifest,
//!     &context,
//!     &service,
//!     Arc::new(TracingProgressSink),
//!     &config,
//! )?;
//! let mut handler = InstallerHandler::for_manifest(run);
//! handler.download()?;
//! handler.install()?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod download;
pub mod error;
pub mod installer;
pub mod invocation;
pub mod logging;
pub mod manifest;
pub mod progress;

pub use config::{ConfigFile, InstallerConfig};
pub use download::{DownloadEvent, DownloadEvents, DownloadService, HttpDownloadService};
pub use error::{InstallerError, InstallerResult, TransportError};
pub use installer::{
    backend_for, InstallerBackend, InstallerHandler, InstallerOrchestrator, ResolvedPaths,
};
pub use invocation::{InstallMode, InvocationContext};
pub use manifest::{InstallerSwitches, InstallerType, ManifestInstaller};
pub use progress::{
    DownloadProgressRelay, NullProgressSink, ProgressSink, ProgressUpdate, TracingProgressSink,
};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
