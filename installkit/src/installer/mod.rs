//! Installer runs: download, verification, argument composition and
//! per-technology install backends.
//!
//! ```text
//! InstallerHandler
//!   ├── InstallerOrchestrator   per-run state, download + verify, tokens
//!   └── Box<dyn InstallerBackend>
//!         ├── ExecutableBackend   exe / inno / nullsoft / burn
//!         └── UnsupportedBackend  everything else
//! ```

mod arguments;
mod backend;
mod executable;
mod handler;
mod orchestrator;
mod tokens;

pub use arguments::{build_installer_args, split_arguments};
pub use backend::{backend_for, InstallerBackend, UnsupportedBackend};
pub use executable::{ExecutableBackend, POLL_INTERVAL};
pub use handler::InstallerHandler;
pub use orchestrator::InstallerOrchestrator;
pub use tokens::{substitute_tokens, ResolvedPaths, ARG_TOKEN_INSTALLPATH, ARG_TOKEN_LOGPATH};
