//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::thread;
use std::time::Duration;

use sha2::{Digest, Sha256};
use tokio_util::sync::CancellationToken;

use installkit::download::{DownloadEvents, DownloadService};
use installkit::TransportError;

/// What a [`ScriptedService`] does when asked to fetch.
#[derive(Debug, Clone)]
pub enum Script {
    /// Write `data` in `chunk`-sized pieces, announcing `announced` as the size.
    Deliver {
        data: Vec<u8>,
        announced: Option<u64>,
        chunk: usize,
    },
    /// Fail with an HTTP status before starting.
    FailStatus(u16),
    /// Start, write `data`, then fail mid-transfer.
    FailAfter { data: Vec<u8> },
    /// Start, then stream nothing until the token is cancelled.
    StallUntilCanceled,
    /// Write `data` and return without reporting completion.
    ReturnWithoutCompleting { data: Vec<u8> },
}

/// A transport that follows a fixed script.
pub struct ScriptedService {
    script: Script,
}

impl ScriptedService {
    pub fn new(script: Script) -> Self {
        Self { script }
    }

    pub fn deliver(data: Vec<u8>) -> Self {
        let announced = Some(data.len() as u64);
        Self::new(Script::Deliver {
            data,
            announced,
            chunk: 64 * 1024,
        })
    }
}

fn io_error(dest: &Path, source: std::io::Error) -> TransportError {
    TransportError::Io {
        path: dest.to_path_buf(),
        source,
    }
}

impl DownloadService for ScriptedService {
    fn fetch(
        &self,
        _url: &str,
        dest: &Path,
        events: DownloadEvents,
        cancel: &CancellationToken,
    ) -> Result<u64, TransportError> {
        match &self.script {
            Script::Deliver {
                data,
                announced,
                chunk,
            } => {
                let mut file = File::create(dest).map_err(|e| io_error(dest, e))?;
                let active = events.start(*announced);
                let mut written = 0u64;
                for piece in data.chunks((*chunk).max(1)) {
                    if cancel.is_cancelled() {
                        active.cancel();
                        return Err(TransportError::Canceled);
                    }
                    file.write_all(piece).map_err(|e| io_error(dest, e))?;
                    written += piece.len() as u64;
                    active.progress(written);
                }
                active.complete();
                Ok(written)
            }
            Script::FailStatus(status) => Err(TransportError::Http { status: *status }),
            Script::FailAfter { data } => {
                let active = events.start(None);
                std::fs::write(dest, data).map_err(|e| io_error(dest, e))?;
                active.progress(data.len() as u64);
                Err(TransportError::Request("connection reset".to_string()))
            }
            Script::StallUntilCanceled => {
                let active = events.start(Some(1_000));
                active.progress(10);
                while !cancel.is_cancelled() {
                    thread::sleep(Duration::from_millis(5));
                }
                active.cancel();
                Err(TransportError::Canceled)
            }
            Script::ReturnWithoutCompleting { data } => {
                let active = events.start(Some(data.len() as u64));
                std::fs::write(dest, data).map_err(|e| io_error(dest, e))?;
                active.progress(data.len() as u64);
                Ok(data.len() as u64)
            }
        }
    }
}

/// Lowercase hex SHA-256 of `data`.
pub fn sha256_hex(data: &[u8]) -> String {
    format!("{:x}", Sha256::digest(data))
}

/// Number of entries in a directory.
pub fn entry_count(dir: &Path) -> usize {
    std::fs::read_dir(dir).map(|d| d.count()).unwrap_or(0)
}
