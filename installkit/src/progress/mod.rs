//! User-visible progress reporting.
//!
//! [`ProgressSink`] is the reporter capability shared across a session;
//! [`DownloadProgressRelay`] turns download lifecycle events into sink
//! updates, choosing percentage or byte-count display depending on whether
//! the transfer size is known.

mod relay;
mod sink;

pub use relay::{DownloadProgressRelay, ProgressMode, DOWNLOAD_STARTED_MESSAGE};
pub use sink::{
    NullProgressSink, ProgressRecord, ProgressSink, ProgressUpdate, RecordingProgressSink,
    TracingProgressSink,
};
