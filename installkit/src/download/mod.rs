//! Installer download transport.
//!
//! This module provides:
//! - The [`DownloadService`] seam through which bytes are transferred
//! - A typed event channel carrying transfer lifecycle events (`events`)
//! - SHA-256 checksum verification (`checksum`)
//! - A `reqwest`-backed HTTP transport (`http`)
//!
//! # Architecture
//!
//! ```text
//! InstallerOrchestrator::download
//!         │
//!         ├── worker thread ── DownloadService::fetch ──► DownloadEvents
//!         │                                                  │
//!         └── calling thread ◄── EventReceiver ◄─────────────┘
//!                   │
//!                   └── DownloadProgressRelay ──► ProgressSink
//! ```

mod checksum;
mod events;
mod http;

use std::path::Path;

use tokio_util::sync::CancellationToken;

use crate::error::TransportError;

pub use checksum::{digests_match, sha256_file, verify_checksum};
pub use events::{
    event_channel, ActiveDownload, DownloadEvent, DownloadEvents, EventReceiver,
    EVENT_QUEUE_CAPACITY,
};
pub use http::{HttpDownloadService, DEFAULT_TIMEOUT_SECS};

/// Transfers the bytes behind a URL to a local path.
///
/// Implementations run on a worker thread while the orchestrator blocks.
/// They must call [`DownloadEvents::start`] once the transfer begins, report
/// progress through the returned [`ActiveDownload`], and finish with either
/// [`ActiveDownload::complete`] or, when `cancel` fires,
/// [`ActiveDownload::cancel`].
pub trait DownloadService: Send + Sync {
    /// Download `url` into `dest`, returning the number of bytes written.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Canceled`] when stopped by `cancel`, or
    /// another [`TransportError`] when the transfer fails.
    fn fetch(
        &self,
        url: &str,
        dest: &Path,
        events: DownloadEvents,
        cancel: &CancellationToken,
    ) -> Result<u64, TransportError>;
}
