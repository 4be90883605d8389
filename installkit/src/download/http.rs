//! HTTP transport for installer downloads.
//!
//! Streams a single `GET` response to the destination path, reporting
//! progress through the event channel and checking the cancellation token
//! between chunks.

use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::path::Path;
use std::time::Duration;

use reqwest::blocking::Client;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use super::events::DownloadEvents;
use super::DownloadService;
use crate::error::TransportError;

/// Default timeout for HTTP requests in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 300; // 5 minutes

/// Buffer size for reading/writing during downloads (64KB).
const BUFFER_SIZE: usize = 64 * 1024;

/// `reqwest`-backed [`DownloadService`].
#[derive(Debug, Clone)]
pub struct HttpDownloadService {
    client: Client,
    timeout: Duration,
}

impl HttpDownloadService {
    /// Create a service with the default timeout.
    pub fn new() -> Result<Self, TransportError> {
        Self::with_timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Create a service with a custom timeout.
    pub fn with_timeout(timeout: Duration) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TransportError::Request(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self { client, timeout })
    }

    /// Request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn map_request_error(&self, e: reqwest::Error) -> TransportError {
        if e.is_timeout() {
            TransportError::Timeout {
                timeout_secs: self.timeout.as_secs(),
            }
        } else {
            TransportError::Request(e.to_string())
        }
    }

    fn map_read_error(&self, e: io::Error) -> TransportError {
        if e.kind() == io::ErrorKind::TimedOut {
            TransportError::Timeout {
                timeout_secs: self.timeout.as_secs(),
            }
        } else {
            TransportError::Request(format!("read error: {}", e))
        }
    }
}

impl DownloadService for HttpDownloadService {
    fn fetch(
        &self,
        url: &str,
        dest: &Path,
        events: DownloadEvents,
        cancel: &CancellationToken,
    ) -> Result<u64, TransportError> {
        if cancel.is_cancelled() {
            events.start(None).cancel();
            return Err(TransportError::Canceled);
        }

        let mut response = self
            .client
            .get(url)
            .send()
            .map_err(|e| self.map_request_error(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Http {
                status: status.as_u16(),
            });
        }

        let total_size = response.content_length().filter(|&n| n > 0);
        debug!(url, total_size, "Response received");

        let file = File::create(dest).map_err(|e| TransportError::Io {
            path: dest.to_path_buf(),
            source: e,
        })?;

        let active = events.start(total_size);
        let mut writer = BufWriter::new(file);
        let mut buffer = vec![0u8; BUFFER_SIZE];
        let mut downloaded = 0u64;

        loop {
            if cancel.is_cancelled() {
                debug!(url, downloaded, "Download canceled");
                active.cancel();
                return Err(TransportError::Canceled);
            }

            let bytes_read = response
                .read(&mut buffer)
                .map_err(|e| self.map_read_error(e))?;

            if bytes_read == 0 {
                break;
            }

            writer
                .write_all(&buffer[..bytes_read])
                .map_err(|e| TransportError::Io {
                    path: dest.to_path_buf(),
                    source: e,
                })?;

            downloaded += bytes_read as u64;
            active.progress(downloaded);
        }

        writer.flush().map_err(|e| TransportError::Io {
            path: dest.to_path_buf(),
            source: e,
        })?;

        active.complete();
        Ok(downloaded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_download_service_default_timeout() {
        let service = HttpDownloadService::new().unwrap();
        assert_eq!(service.timeout().as_secs(), DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn test_http_download_service_with_timeout() {
        let service = HttpDownloadService::with_timeout(Duration::from_secs(60)).unwrap();
        assert_eq!(service.timeout().as_secs(), 60);
    }

    #[test]
    fn test_fetch_when_already_canceled() {
        use super::super::events::{event_channel, DownloadEvent};

        let service = HttpDownloadService::new().unwrap();
        let (events, receiver) = event_channel();
        let cancel = CancellationToken::new();
        cancel.cancel();

        let result = service.fetch(
            "http://127.0.0.1:9/never",
            Path::new("/nonexistent/dest"),
            events,
            &cancel,
        );

        assert!(matches!(result, Err(TransportError::Canceled)));
        let received: Vec<_> = receiver.iter().collect();
        assert_eq!(received.last(), Some(&DownloadEvent::Canceled));
    }
}
