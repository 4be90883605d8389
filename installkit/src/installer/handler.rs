//! Front door for one installer run.

use std::path::Path;

use crate::error::InstallerResult;

use super::backend::{backend_for, InstallerBackend};
use super::orchestrator::InstallerOrchestrator;

/// A run paired with the backend for its installer technology.
///
/// `install` and `cancel` take `&self`, so a handler shared between threads
/// can be canceled while another thread is blocked in `install`.
pub struct InstallerHandler<'a> {
    orchestrator: InstallerOrchestrator<'a>,
    backend: Box<dyn InstallerBackend>,
}

impl<'a> InstallerHandler<'a> {
    /// Pair a run with an explicit backend.
    pub fn new(orchestrator: InstallerOrchestrator<'a>, backend: Box<dyn InstallerBackend>) -> Self {
        Self {
            orchestrator,
            backend,
        }
    }

    /// Pair a run with the backend for its manifest's installer type.
    pub fn for_manifest(orchestrator: InstallerOrchestrator<'a>) -> Self {
        let backend = backend_for(orchestrator.manifest().installer_type);
        Self::new(orchestrator, backend)
    }

    /// Download and verify the installer.
    pub fn download(&mut self) -> InstallerResult<&Path> {
        self.orchestrator.download()
    }

    /// Run the installer. Backend errors are returned unchanged.
    pub fn install(&self) -> InstallerResult<()> {
        self.backend.install(&self.orchestrator)
    }

    /// Cancel a running install.
    pub fn cancel(&self) -> InstallerResult<()> {
        self.backend.cancel()
    }

    pub fn orchestrator(&self) -> &InstallerOrchestrator<'a> {
        &self.orchestrator
    }

    pub fn backend(&self) -> &dyn InstallerBackend {
        self.backend.as_ref()
    }
}
