//! Typed event channel between a download worker and the orchestrator.
//!
//! The lifecycle of a single transfer is `Started → Progress* → Completed`
//! or `Started → Progress* → Canceled`. The sender side encodes that order
//! in its types: [`DownloadEvents::start`] consumes the handle and yields an
//! [`ActiveDownload`], which can report progress any number of times and is
//! itself consumed by [`ActiveDownload::complete`] or
//! [`ActiveDownload::cancel`]. A transport therefore cannot emit progress
//! before starting, or anything after finishing.
//!
//! A transport that fails mid-transfer drops its [`ActiveDownload`] and
//! returns the error instead, so the stream ends after `Started` and some
//! `Progress` events. The consumer closes out the display from the error.
//!
//! Lifecycle events are delivered with a blocking send. Progress events use
//! `try_send` and are dropped while the queue is full, so a slow consumer
//! never stalls the transfer; the next progress event supersedes any that
//! were lost.

use std::sync::mpsc::{self, Receiver, SyncSender};

/// Capacity of the event queue between worker and consumer.
pub const EVENT_QUEUE_CAPACITY: usize = 64;

/// A lifecycle event for one transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadEvent {
    /// Transfer began. `total_bytes` is `None` when the size is unknown.
    Started { total_bytes: Option<u64> },
    /// Bytes written so far.
    Progress {
        downloaded: u64,
        total_bytes: Option<u64>,
    },
    /// All bytes were transferred.
    Completed,
    /// The transfer stopped early because cancellation was requested.
    Canceled,
}

impl DownloadEvent {
    /// Whether this event ends the transfer.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Canceled)
    }
}

/// Create a connected sender/receiver pair for one transfer.
pub fn event_channel() -> (DownloadEvents, EventReceiver) {
    let (tx, rx) = mpsc::sync_channel(EVENT_QUEUE_CAPACITY);
    (DownloadEvents { tx }, EventReceiver { rx })
}

/// Sender handle given to a transport before the transfer starts.
#[derive(Debug)]
pub struct DownloadEvents {
    tx: SyncSender<DownloadEvent>,
}

impl DownloadEvents {
    /// Announce the start of the transfer.
    ///
    /// Pass `None` (or `Some(0)`) when the total size is not known.
    pub fn start(self, total_bytes: Option<u64>) -> ActiveDownload {
        // A disconnected receiver means nobody is listening; the transfer
        // itself is still allowed to finish.
        let _ = self.tx.send(DownloadEvent::Started { total_bytes });
        ActiveDownload {
            tx: self.tx,
            total_bytes,
        }
    }
}

/// Sender handle for a transfer that has started.
#[derive(Debug)]
pub struct ActiveDownload {
    tx: SyncSender<DownloadEvent>,
    total_bytes: Option<u64>,
}

impl ActiveDownload {
    /// Total size announced at start.
    pub fn total_bytes(&self) -> Option<u64> {
        self.total_bytes
    }

    /// Report the number of bytes written so far. Never blocks.
    pub fn progress(&self, downloaded: u64) {
        let _ = self.tx.try_send(DownloadEvent::Progress {
            downloaded,
            total_bytes: self.total_bytes,
        });
    }

    /// Report that the transfer finished.
    pub fn complete(self) {
        let _ = self.tx.send(DownloadEvent::Completed);
    }

    /// Report that the transfer stopped because of cancellation.
    pub fn cancel(self) {
        let _ = self.tx.send(DownloadEvent::Canceled);
    }
}

/// Receiving end of an event channel.
#[derive(Debug)]
pub struct EventReceiver {
    rx: Receiver<DownloadEvent>,
}

impl EventReceiver {
    /// Block until the next event, or `None` once the sender is gone.
    pub fn recv(&self) -> Option<DownloadEvent> {
        self.rx.recv().ok()
    }

    /// Iterate over events until the sender is dropped.
    pub fn iter(&self) -> impl Iterator<Item = DownloadEvent> + '_ {
        self.rx.iter()
    }
}
