//! Progress reporting capability.

use parking_lot::Mutex;
use tracing::{info, trace, warn};

/// A single progress update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressUpdate {
    /// Completion percentage, 0 to 100. Used when the total size is known.
    Percent(u8),
    /// Bytes transferred so far. Used when the total size is unknown.
    Bytes(u64),
}

/// Destination for user-visible progress.
///
/// A sink is shared by every component that reports progress during a
/// session, so implementations must only ever append or update and may be
/// called from any thread.
pub trait ProgressSink: Send + Sync {
    /// An operation started.
    fn report_started(&self, message: &str);

    /// The current operation advanced.
    fn report_progress(&self, update: ProgressUpdate);

    /// The current operation was canceled.
    fn report_canceled(&self);

    /// The current operation finished.
    fn report_completed(&self);

    /// The current operation stopped because of an error.
    ///
    /// The default does nothing; front ends that keep an animation running
    /// between start and finish should stop it here.
    fn report_failed(&self, _reason: &str) {}
}

/// Sink that discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullProgressSink;

impl ProgressSink for NullProgressSink {
    fn report_started(&self, _message: &str) {}
    fn report_progress(&self, _update: ProgressUpdate) {}
    fn report_canceled(&self) {}
    fn report_completed(&self) {}
}

/// Sink that forwards progress to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingProgressSink;

impl ProgressSink for TracingProgressSink {
    fn report_started(&self, message: &str) {
        info!("{}", message);
    }

    fn report_progress(&self, update: ProgressUpdate) {
        match update {
            ProgressUpdate::Percent(percent) => trace!(percent, "Progress"),
            ProgressUpdate::Bytes(bytes) => trace!(bytes, "Progress"),
        }
    }

    fn report_canceled(&self) {
        info!("Canceled");
    }

    fn report_completed(&self) {
        info!("Completed");
    }

    fn report_failed(&self, reason: &str) {
        warn!(reason, "Failed");
    }
}

/// Something a [`RecordingProgressSink`] observed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressRecord {
    Started(String),
    Progress(ProgressUpdate),
    Canceled,
    Completed,
    Failed(String),
}

/// Sink that keeps every report in memory, in arrival order.
///
/// Useful for front ends that render after the fact and for tests.
#[derive(Debug, Default)]
pub struct RecordingProgressSink {
    records: Mutex<Vec<ProgressRecord>>,
}

impl RecordingProgressSink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything reported so far.
    pub fn records(&self) -> Vec<ProgressRecord> {
        self.records.lock().clone()
    }

    /// Only the progress updates, in order.
    pub fn updates(&self) -> Vec<ProgressUpdate> {
        self.records
            .lock()
            .iter()
            .filter_map(|r| match r {
                ProgressRecord::Progress(update) => Some(*update),
                _ => None,
            })
            .collect()
    }

    fn push(&self, record: ProgressRecord) {
        self.records.lock().push(record);
    }
}

impl ProgressSink for RecordingProgressSink {
    fn report_started(&self, message: &str) {
        self.push(ProgressRecord::Started(message.to_string()));
    }

    fn report_progress(&self, update: ProgressUpdate) {
        self.push(ProgressRecord::Progress(update));
    }

    fn report_canceled(&self) {
        self.push(ProgressRecord::Canceled);
    }

    fn report_completed(&self) {
        self.push(ProgressRecord::Completed);
    }

    fn report_failed(&self, reason: &str) {
        self.push(ProgressRecord::Failed(reason.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_sink_keeps_order() {
        let sink = RecordingProgressSink::new();
        sink.report_started("Downloading");
        sink.report_progress(ProgressUpdate::Percent(50));
        sink.report_progress(ProgressUpdate::Bytes(10));
        sink.report_completed();

        assert_eq!(
            sink.records(),
            vec![
                ProgressRecord::Started("Downloading".to_string()),
                ProgressRecord::Progress(ProgressUpdate::Percent(50)),
                ProgressRecord::Progress(ProgressUpdate::Bytes(10)),
                ProgressRecord::Completed,
            ]
        );
        assert_eq!(
            sink.updates(),
            vec![ProgressUpdate::Percent(50), ProgressUpdate::Bytes(10)]
        );
    }

    #[test]
    fn test_null_sink_accepts_everything() {
        let sink = NullProgressSink;
        sink.report_started("x");
        sink.report_progress(ProgressUpdate::Percent(1));
        sink.report_canceled();
        sink.report_completed();
        sink.report_failed("x");
    }

    #[test]
    fn test_recording_sink_keeps_failure_reason() {
        let sink = RecordingProgressSink::new();
        sink.report_started("Running installer");
        sink.report_failed("exit code 3");

        assert_eq!(
            sink.records().last(),
            Some(&ProgressRecord::Failed("exit code 3".to_string()))
        );
    }
}
