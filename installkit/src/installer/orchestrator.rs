//! Per-run state and the download-and-verify step.
//!
//! An [`InstallerOrchestrator`] owns everything that belongs to one
//! installation attempt: the borrowed manifest entry and user options, the
//! resolved token paths, a cancellation token, and (after a successful
//! download) the verified installer file. Backends only ever see the run
//! through its read-only accessors.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread;

use tempfile::TempPath;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::config::InstallerConfig;
use crate::download::{event_channel, verify_checksum, DownloadEvent, DownloadService};
use crate::error::{InstallerError, InstallerResult, TransportError};
use crate::invocation::InvocationContext;
use crate::manifest::ManifestInstaller;
use crate::progress::{DownloadProgressRelay, ProgressSink};

use super::arguments::build_installer_args;
use super::tokens::{self, ResolvedPaths};

/// Prefix of staging file names.
const STAGING_FILE_PREFIX: &str = "installer-";

/// One installation attempt.
pub struct InstallerOrchestrator<'a> {
    manifest: &'a ManifestInstaller,
    context: &'a InvocationContext,
    service: &'a dyn DownloadService,
    sink: Arc<dyn ProgressSink>,
    staging_dir: PathBuf,
    paths: ResolvedPaths,
    cancel: CancellationToken,
    /// Verified artifact; deleted from disk when dropped.
    installer: Option<TempPath>,
}

impl<'a> InstallerOrchestrator<'a> {
    /// Create a run for `manifest`.
    ///
    /// Token paths are resolved once, here, from `context` and the defaults
    /// in `config`.
    ///
    /// # Errors
    ///
    /// [`InstallerError::ReservedToken`] if a user path contains an argument
    /// token.
    pub fn new(
        manifest: &'a ManifestInstaller,
        context: &'a InvocationContext,
        service: &'a dyn DownloadService,
        sink: Arc<dyn ProgressSink>,
        config: &InstallerConfig,
    ) -> InstallerResult<Self> {
        Ok(Self {
            manifest,
            context,
            service,
            sink,
            staging_dir: config.staging_dir.clone(),
            paths: ResolvedPaths::resolve(context, manifest, config)?,
            cancel: CancellationToken::new(),
            installer: None,
        })
    }

    /// Download the installer and verify its SHA-256 digest.
    ///
    /// Blocks until the transfer ends. Progress is relayed to the sink while
    /// the transport runs on a worker thread. On success the verified file
    /// is kept for the rest of the run and its path returned; on any failure
    /// the partial file is removed.
    ///
    /// # Errors
    ///
    /// - [`InstallerError::Canceled`] if the transfer was canceled
    /// - [`InstallerError::Download`] if the transport failed
    /// - [`InstallerError::IntegrityVerification`] if the digest differs
    /// - [`InstallerError::AlreadyDownloaded`] on a second call after success
    pub fn download(&mut self) -> InstallerResult<&Path> {
        if self.installer.is_some() {
            return Err(InstallerError::AlreadyDownloaded);
        }

        let staging = self.create_staging_file()?;
        info!(
            url = %self.manifest.url,
            dest = %staging.display(),
            "Downloading installer"
        );

        let bytes = self.transfer(&staging)?;
        debug!(bytes, "Transfer complete, verifying");

        if let Err(e) = verify_checksum(&staging, &self.manifest.sha256) {
            warn!(url = %self.manifest.url, error = %e, "Installer verification failed");
            return Err(e);
        }

        info!(bytes, "Installer verified");
        let installer: &Path = self.installer.insert(staging);
        Ok(installer)
    }

    fn create_staging_file(&self) -> InstallerResult<TempPath> {
        let staging_error = |source: io::Error| InstallerError::Staging {
            path: self.staging_dir.clone(),
            source,
        };

        fs::create_dir_all(&self.staging_dir).map_err(staging_error)?;
        let file = tempfile::Builder::new()
            .prefix(STAGING_FILE_PREFIX)
            .tempfile_in(&self.staging_dir)
            .map_err(staging_error)?;
        Ok(file.into_temp_path())
    }

    /// Run the transport on a worker thread and relay its events here.
    fn transfer(&self, dest: &Path) -> InstallerResult<u64> {
        let (events, receiver) = event_channel();
        let mut relay = DownloadProgressRelay::new(Arc::clone(&self.sink));
        let service = self.service;
        let url = self.manifest.url.as_str();
        let cancel = &self.cancel;

        let (result, terminal) = thread::scope(|scope| {
            let worker = scope.spawn(move || service.fetch(url, dest, events, cancel));

            let mut terminal = None;
            for event in receiver.iter() {
                if event.is_terminal() {
                    terminal = Some(event);
                }
                relay.dispatch(event);
            }

            let result = worker.join().unwrap_or_else(|_| {
                Err(TransportError::Request("download worker panicked".to_string()))
            });
            (result, terminal)
        });

        match (result, terminal) {
            (_, Some(DownloadEvent::Canceled)) | (Err(TransportError::Canceled), _) => {
                info!(url, "Download canceled");
                if relay.is_open() {
                    relay.on_canceled();
                }
                Err(InstallerError::Canceled)
            }
            (Err(source), _) => {
                warn!(url, error = %source, "Download failed");
                relay.on_failed(&source.to_string());
                Err(InstallerError::Download {
                    url: url.to_string(),
                    source,
                })
            }
            (Ok(bytes), Some(DownloadEvent::Completed)) => Ok(bytes),
            (Ok(_), _) => {
                warn!(url, "Transport returned without completing");
                relay.on_failed(&TransportError::Incomplete.to_string());
                Err(InstallerError::Download {
                    url: url.to_string(),
                    source: TransportError::Incomplete,
                })
            }
        }
    }

    /// Path of the verified installer, if the download succeeded.
    pub fn downloaded_installer(&self) -> Option<&Path> {
        self.installer.as_deref()
    }

    /// Path of the verified installer, or [`InstallerError::NotDownloaded`].
    pub fn require_installer(&self) -> InstallerResult<&Path> {
        self.downloaded_installer()
            .ok_or(InstallerError::NotDownloaded)
    }

    /// Replace `<LOGPATH>` and `<INSTALLPATH>` with this run's paths.
    pub fn substitute_tokens(&self, template: &str) -> String {
        tokens::substitute_tokens(template, &self.paths)
    }

    /// The full argument string for the installer.
    pub fn installer_args(&self) -> String {
        build_installer_args(self.manifest, self.context, &self.paths)
    }

    /// Token that cancels this run.
    ///
    /// Cancelling it stops an in-flight download and any install started
    /// from this run. Clones may be moved to other threads.
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Request cancellation of the run.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn manifest(&self) -> &ManifestInstaller {
        self.manifest
    }

    pub fn context(&self) -> &InvocationContext {
        self.context
    }

    pub fn paths(&self) -> &ResolvedPaths {
        &self.paths
    }

    pub fn sink(&self) -> &Arc<dyn ProgressSink> {
        &self.sink
    }

    pub fn staging_dir(&self) -> &Path {
        &self.staging_dir
    }
}
