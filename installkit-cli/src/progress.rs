//! Terminal progress display.

use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use installkit::{ProgressSink, ProgressUpdate};

/// Progress sink drawing an `indicatif` bar on stderr.
///
/// Each started operation gets a fresh spinner. The first percentage turns
/// it into a bar; byte counts keep it a spinner with a running total.
pub struct TerminalSink {
    current: Mutex<Option<ProgressBar>>,
    hidden: bool,
}

impl TerminalSink {
    /// Sink drawing to stderr.
    pub fn new() -> Self {
        Self {
            current: Mutex::new(None),
            hidden: false,
        }
    }

    /// Sink that tracks state without drawing.
    #[cfg(test)]
    pub fn hidden() -> Self {
        Self {
            current: Mutex::new(None),
            hidden: true,
        }
    }

    fn current(&self) -> MutexGuard<'_, Option<ProgressBar>> {
        self.current.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn new_bar(&self) -> ProgressBar {
        let bar = ProgressBar::with_draw_target(None, self.draw_target());
        bar.set_style(spinner_style());
        bar
    }

    fn draw_target(&self) -> ProgressDrawTarget {
        if self.hidden {
            ProgressDrawTarget::hidden()
        } else {
            ProgressDrawTarget::stderr()
        }
    }

    /// Whether the last operation has finished or been abandoned.
    #[cfg(test)]
    pub fn is_finished(&self) -> bool {
        self.current().as_ref().map_or(true, ProgressBar::is_finished)
    }

    /// Position of the current bar, if any.
    #[cfg(test)]
    pub fn position(&self) -> Option<u64> {
        self.current().as_ref().map(ProgressBar::position)
    }
}

impl Default for TerminalSink {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressSink for TerminalSink {
    fn report_started(&self, message: &str) {
        let bar = self.new_bar();
        bar.set_message(message.to_string());
        if !self.hidden {
            bar.enable_steady_tick(Duration::from_millis(120));
        }
        if let Some(previous) = self.current().replace(bar) {
            previous.finish_and_clear();
        }
    }

    fn report_progress(&self, update: ProgressUpdate) {
        let current = self.current();
        let Some(bar) = current.as_ref() else {
            return;
        };

        match update {
            ProgressUpdate::Percent(percent) => {
                if bar.length().is_none() {
                    bar.set_length(100);
                    bar.set_style(bar_style());
                }
                bar.set_position(u64::from(percent));
            }
            ProgressUpdate::Bytes(bytes) => bar.set_position(bytes),
        }
    }

    fn report_canceled(&self) {
        if let Some(bar) = self.current().as_ref() {
            bar.abandon_with_message("canceled");
        }
    }

    fn report_completed(&self) {
        if let Some(bar) = self.current().as_ref() {
            bar.finish_with_message("done");
        }
    }

    fn report_failed(&self, _reason: &str) {
        if let Some(bar) = self.current().as_ref() {
            bar.abandon_with_message("failed");
        }
    }
}

fn bar_style() -> ProgressStyle {
    ProgressStyle::with_template("{msg:24} [{bar:40.cyan/blue}] {pos:>3}%")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>-")
}

fn spinner_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.green} {msg:24} {bytes}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
}
