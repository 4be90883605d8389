//! Per-technology install behavior.

use crate::error::{InstallerError, InstallerResult};
use crate::manifest::InstallerType;

use super::executable::ExecutableBackend;
use super::orchestrator::InstallerOrchestrator;

/// Installs and cancels for one installer technology.
///
/// Both operations default to [`InstallerError::NotSupported`]; backends
/// override what they can do. `cancel` may be called from another thread
/// while `install` is blocking.
pub trait InstallerBackend: Send + Sync {
    /// Technology this backend handles.
    fn technology(&self) -> InstallerType;

    /// Run the downloaded installer of `run`.
    fn install(&self, _run: &InstallerOrchestrator<'_>) -> InstallerResult<()> {
        Err(InstallerError::NotSupported {
            operation: "install",
            technology: self.technology(),
        })
    }

    /// Stop an install in progress.
    fn cancel(&self) -> InstallerResult<()> {
        Err(InstallerError::NotSupported {
            operation: "cancel",
            technology: self.technology(),
        })
    }
}

/// Backend for technologies with no install support.
#[derive(Debug, Clone, Copy)]
pub struct UnsupportedBackend {
    technology: InstallerType,
}

impl UnsupportedBackend {
    pub fn new(technology: InstallerType) -> Self {
        Self { technology }
    }
}

impl InstallerBackend for UnsupportedBackend {
    fn technology(&self) -> InstallerType {
        self.technology
    }
}

/// Select the backend for an installer technology.
pub fn backend_for(technology: InstallerType) -> Box<dyn InstallerBackend> {
    match technology {
        InstallerType::Exe | InstallerType::Inno | InstallerType::Nullsoft | InstallerType::Burn => {
            Box::new(ExecutableBackend::new(technology))
        }
        InstallerType::Msi | InstallerType::Wix | InstallerType::Msix | InstallerType::Zip => {
            Box::new(UnsupportedBackend::new(technology))
        }
    }
}
