//! Backend that runs the downloaded installer as a child process.

use std::io;
use std::path::Path;
use std::process::{Child, Command, Stdio};
use std::thread;
use std::time::Duration;

use parking_lot::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::error::{InstallerError, InstallerResult};
use crate::manifest::InstallerType;

use super::arguments::split_arguments;
use super::backend::InstallerBackend;
use super::orchestrator::InstallerOrchestrator;

/// How often a running installer is checked for exit or cancellation.
pub const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Spawn attempts while the freshly written installer is still busy.
const SPAWN_ATTEMPTS: u32 = 5;

/// Runs executable installers (plain exe, Inno Setup, Nullsoft, Burn).
#[derive(Debug)]
pub struct ExecutableBackend {
    technology: InstallerType,
    /// Cancels the install currently running, if any.
    active: Mutex<Option<CancellationToken>>,
}

impl ExecutableBackend {
    pub fn new(technology: InstallerType) -> Self {
        Self {
            technology,
            active: Mutex::new(None),
        }
    }

    fn register(&self, token: CancellationToken) -> ActiveInstall<'_> {
        *self.active.lock() = Some(token.clone());
        ActiveInstall {
            slot: &self.active,
            token,
        }
    }

    fn run_child(
        &self,
        installer: &Path,
        args: &[String],
        cancel: &CancellationToken,
    ) -> InstallerResult<()> {
        mark_executable(installer)?;

        let mut child = spawn(installer, args).map_err(|source| InstallerError::Launch {
            path: installer.to_path_buf(),
            source,
        })?;
        debug!(pid = child.id(), "Installer process started");

        loop {
            if let Some(status) = child.try_wait().map_err(InstallerError::Wait)? {
                return if status.success() {
                    Ok(())
                } else {
                    Err(InstallerError::InstallFailed {
                        exit_code: status.code(),
                    })
                };
            }

            if cancel.is_cancelled() {
                stop(&mut child)?;
                return Err(InstallerError::Canceled);
            }

            thread::sleep(POLL_INTERVAL);
        }
    }
}

impl InstallerBackend for ExecutableBackend {
    fn technology(&self) -> InstallerType {
        self.technology
    }

    fn install(&self, run: &InstallerOrchestrator<'_>) -> InstallerResult<()> {
        // Registered first so a concurrent cancel() always finds it.
        let active = self.register(run.cancel_token().child_token());
        let token = active.token();

        let installer = run.require_installer()?;
        let args = split_arguments(&run.installer_args());

        if token.is_cancelled() {
            return Err(InstallerError::Canceled);
        }

        info!(
            installer = %installer.display(),
            technology = %self.technology,
            args = ?args,
            "Running installer"
        );
        run.sink().report_started("Running installer");

        let result = self.run_child(installer, &args, token);
        drop(active);

        match &result {
            Ok(()) => {
                info!("Installer finished");
                run.sink().report_completed();
            }
            Err(InstallerError::Canceled) => {
                info!("Installer canceled");
                run.sink().report_canceled();
            }
            Err(e) => {
                warn!(error = %e, "Installer failed");
                run.sink().report_failed(&e.to_string());
            }
        }
        result
    }

    /// Kill the running installer. Does nothing when none is running.
    fn cancel(&self) -> InstallerResult<()> {
        if let Some(token) = self.active.lock().as_ref() {
            token.cancel();
        }
        Ok(())
    }
}

/// Keeps an install's token visible to `cancel` until dropped.
struct ActiveInstall<'a> {
    slot: &'a Mutex<Option<CancellationToken>>,
    token: CancellationToken,
}

impl ActiveInstall<'_> {
    fn token(&self) -> &CancellationToken {
        &self.token
    }
}

impl Drop for ActiveInstall<'_> {
    fn drop(&mut self) {
        *self.slot.lock() = None;
    }
}

fn spawn(installer: &Path, args: &[String]) -> io::Result<Child> {
    let mut attempt = 1;
    loop {
        let spawned = Command::new(installer)
            .args(args)
            .stdin(Stdio::null())
            .spawn();

        match spawned {
            // Another thread may still hold a write handle inherited across fork.
            Err(e) if is_text_file_busy(&e) && attempt < SPAWN_ATTEMPTS => {
                attempt += 1;
                thread::sleep(Duration::from_millis(50));
            }
            other => return other,
        }
    }
}

fn stop(child: &mut Child) -> InstallerResult<()> {
    match child.kill() {
        Ok(()) => {}
        // Already exited.
        Err(e) if e.kind() == io::ErrorKind::InvalidInput => {}
        Err(e) => return Err(InstallerError::Wait(e)),
    }
    child.wait().map_err(InstallerError::Wait)?;
    Ok(())
}

#[cfg(unix)]
fn mark_executable(path: &Path) -> InstallerResult<()> {
    use std::fs::{self, Permissions};
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(path, Permissions::from_mode(0o700)).map_err(|source| {
        InstallerError::Launch {
            path: path.to_path_buf(),
            source,
        }
    })
}

#[cfg(not(unix))]
fn mark_executable(_path: &Path) -> InstallerResult<()> {
    Ok(())
}

#[cfg(unix)]
fn is_text_file_busy(e: &io::Error) -> bool {
    e.raw_os_error() == Some(libc::ETXTBSY)
}

#[cfg(not(unix))]
fn is_text_file_busy(_e: &io::Error) -> bool {
    false
}
