//! Adapts download lifecycle events into progress sink updates.

use std::sync::Arc;

use super::sink::{ProgressSink, ProgressUpdate};
use crate::download::DownloadEvent;

/// Status line reported when a download starts.
pub const DOWNLOAD_STARTED_MESSAGE: &str = "Downloading installer";

/// Whether the total transfer size is known.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressMode {
    /// Size known: progress is reported as a percentage.
    Determinate { total_bytes: u64 },
    /// Size unknown: progress is reported as a byte count.
    Indeterminate,
}

/// Forwards one download's lifecycle to a shared [`ProgressSink`].
///
/// Percentages are only forwarded when the integer value changes, so the
/// relay can be fed progress at any rate without flooding the sink.
pub struct DownloadProgressRelay {
    sink: Arc<dyn ProgressSink>,
    mode: ProgressMode,
    last_percent: Option<u8>,
    /// Started and not yet finished.
    open: bool,
}

impl DownloadProgressRelay {
    /// Create a relay writing to `sink`.
    pub fn new(sink: Arc<dyn ProgressSink>) -> Self {
        Self {
            sink,
            mode: ProgressMode::Indeterminate,
            last_percent: None,
            open: false,
        }
    }

    /// Whether the sink has seen a start without a matching finish.
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Current display mode.
    pub fn mode(&self) -> ProgressMode {
        self.mode
    }

    /// The transfer began.
    ///
    /// A known positive size selects determinate mode; `None` or zero selects
    /// indeterminate mode.
    pub fn on_started(&mut self, total_bytes: Option<u64>) {
        self.mode = match total_bytes {
            Some(total) if total > 0 => ProgressMode::Determinate { total_bytes: total },
            _ => ProgressMode::Indeterminate,
        };
        self.last_percent = None;
        self.open = true;
        self.sink.report_started(DOWNLOAD_STARTED_MESSAGE);
    }

    /// Bytes were written.
    ///
    /// In determinate mode the percentage is computed against the size
    /// announced at start; `_total_bytes` is accepted for symmetry with the
    /// event but not consulted.
    pub fn on_progress(&mut self, downloaded: u64, _total_bytes: Option<u64>) {
        match self.mode {
            ProgressMode::Determinate { total_bytes } => {
                let percent = percent_of(downloaded, total_bytes);
                if self.last_percent != Some(percent) {
                    self.last_percent = Some(percent);
                    self.sink.report_progress(ProgressUpdate::Percent(percent));
                }
            }
            ProgressMode::Indeterminate => {
                self.sink.report_progress(ProgressUpdate::Bytes(downloaded));
            }
        }
    }

    /// The transfer was canceled.
    pub fn on_canceled(&mut self) {
        self.open = false;
        self.sink.report_canceled();
    }

    /// The transfer ended with an error before finishing.
    ///
    /// Only reaches the sink when a start is still open, so a failure before
    /// the transfer began reports nothing.
    pub fn on_failed(&mut self, reason: &str) {
        if self.open {
            self.open = false;
            self.sink.report_failed(reason);
        }
    }

    /// The transfer finished. Does not verify anything.
    pub fn on_completed(&mut self) {
        if matches!(self.mode, ProgressMode::Determinate { .. }) && self.last_percent != Some(100)
        {
            self.last_percent = Some(100);
            self.sink.report_progress(ProgressUpdate::Percent(100));
        }
        self.open = false;
        self.sink.report_completed();
    }

    /// Route a channel event to the matching handler.
    pub fn dispatch(&mut self, event: DownloadEvent) {
        match event {
            DownloadEvent::Started { total_bytes } => self.on_started(total_bytes),
            DownloadEvent::Progress {
                downloaded,
                total_bytes,
            } => self.on_progress(downloaded, total_bytes),
            DownloadEvent::Completed => self.on_completed(),
            DownloadEvent::Canceled => self.on_canceled(),
        }
    }
}

/// Integer percentage of `total`, clamped to 100.
fn percent_of(downloaded: u64, total: u64) -> u8 {
    if total == 0 {
        return 0;
    }
    let percent = u128::from(downloaded.min(total)) * 100 / u128::from(total);
    percent as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::sink::{ProgressRecord, RecordingProgressSink};

    fn relay() -> (DownloadProgressRelay, Arc<RecordingProgressSink>) {
        let sink = Arc::new(RecordingProgressSink::new());
        (DownloadProgressRelay::new(sink.clone()), sink)
    }

    #[test]
    fn test_known_size_selects_determinate() {
        let (mut relay, _) = relay();
        relay.on_started(Some(1000));
        assert_eq!(
            relay.mode(),
            ProgressMode::Determinate { total_bytes: 1000 }
        );
    }

    #[test]
    fn test_unknown_or_zero_size_selects_indeterminate() {
        let (mut relay, _) = relay();
        relay.on_started(None);
        assert_eq!(relay.mode(), ProgressMode::Indeterminate);

        relay.on_started(Some(0));
        assert_eq!(relay.mode(), ProgressMode::Indeterminate);
    }

    #[test]
    fn test_determinate_forwards_changed_percentages_only() {
        let (mut relay, sink) = relay();
        relay.on_started(Some(1000));
        for downloaded in [1, 2, 3, 10, 11, 500, 999, 1000] {
            relay.on_progress(downloaded, Some(1000));
        }

        assert_eq!(
            sink.updates(),
            vec![
                ProgressUpdate::Percent(0),
                ProgressUpdate::Percent(1),
                ProgressUpdate::Percent(50),
                ProgressUpdate::Percent(99),
                ProgressUpdate::Percent(100),
            ]
        );
    }

    #[test]
    fn test_indeterminate_forwards_byte_heartbeats() {
        let (mut relay, sink) = relay();
        relay.on_started(None);
        relay.on_progress(100, None);
        relay.on_progress(250, None);

        assert_eq!(
            sink.updates(),
            vec![ProgressUpdate::Bytes(100), ProgressUpdate::Bytes(250)]
        );
    }

    #[test]
    fn test_completion_tops_up_to_100_percent() {
        let (mut relay, sink) = relay();
        relay.on_started(Some(200));
        relay.on_progress(150, Some(200));
        relay.on_completed();

        assert_eq!(
            sink.records(),
            vec![
                ProgressRecord::Started(DOWNLOAD_STARTED_MESSAGE.to_string()),
                ProgressRecord::Progress(ProgressUpdate::Percent(75)),
                ProgressRecord::Progress(ProgressUpdate::Percent(100)),
                ProgressRecord::Completed,
            ]
        );
    }

    #[test]
    fn test_completion_does_not_repeat_100_percent() {
        let (mut relay, sink) = relay();
        relay.on_started(Some(200));
        relay.on_progress(200, Some(200));
        relay.on_completed();

        assert_eq!(sink.updates(), vec![ProgressUpdate::Percent(100)]);
    }

    #[test]
    fn test_indeterminate_completion_reports_no_percentage() {
        let (mut relay, sink) = relay();
        relay.on_started(None);
        relay.on_completed();

        assert!(sink.updates().is_empty());
        assert_eq!(sink.records().last(), Some(&ProgressRecord::Completed));
    }

    #[test]
    fn test_dispatch_cancel() {
        let (mut relay, sink) = relay();
        relay.dispatch(DownloadEvent::Started { total_bytes: None });
        relay.dispatch(DownloadEvent::Canceled);

        assert_eq!(sink.records().last(), Some(&ProgressRecord::Canceled));
    }

    #[test]
    fn test_failure_after_start_closes_sink() {
        let (mut relay, sink) = relay();
        relay.on_started(None);
        relay.on_progress(4, None);
        relay.on_failed("connection reset");
        relay.on_failed("again");

        assert!(!relay.is_open());
        assert_eq!(
            sink.records(),
            vec![
                ProgressRecord::Started(DOWNLOAD_STARTED_MESSAGE.to_string()),
                ProgressRecord::Progress(ProgressUpdate::Bytes(4)),
                ProgressRecord::Failed("connection reset".to_string()),
            ]
        );
    }

    #[test]
    fn test_failure_before_start_reports_nothing() {
        let (mut relay, sink) = relay();
        relay.on_failed("refused");
        assert!(sink.records().is_empty());
    }

    #[test]
    fn test_percent_of_overshoot_is_clamped() {
        assert_eq!(percent_of(2_000, 1_000), 100);
        assert_eq!(percent_of(u64::MAX, u64::MAX), 100);
        assert_eq!(percent_of(5, 0), 0);
    }
}
