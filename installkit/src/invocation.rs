//! User-supplied overrides for a single installation.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// How much user interaction the installer should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InstallMode {
    /// Show the installer's full UI.
    Interactive,
    /// No UI at all.
    Silent,
    /// No prompts, but progress is visible.
    #[default]
    SilentWithProgress,
}

impl fmt::Display for InstallMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Interactive => "interactive",
            Self::Silent => "silent",
            Self::SilentWithProgress => "silent-with-progress",
        };
        f.write_str(name)
    }
}

impl FromStr for InstallMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "interactive" => Ok(Self::Interactive),
            "silent" => Ok(Self::Silent),
            "silent-with-progress" | "silentwithprogress" => Ok(Self::SilentWithProgress),
            other => Err(format!("unknown install mode '{}'", other)),
        }
    }
}

/// Options the user passed for this installation.
///
/// Borrowed by the orchestrator and never modified during a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvocationContext {
    /// Directory to install into, overriding the installer default.
    pub install_location: Option<PathBuf>,
    /// File the installer should log to.
    pub log_path: Option<PathBuf>,
    /// Interaction level.
    pub mode: InstallMode,
    /// Complete replacement for the composed installer arguments.
    pub override_args: Option<String>,
}

impl InvocationContext {
    /// Context with default mode and no overrides.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the install location.
    pub fn with_install_location(mut self, path: impl Into<PathBuf>) -> Self {
        self.install_location = Some(path.into());
        self
    }

    /// Set the log path.
    pub fn with_log_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_path = Some(path.into());
        self
    }

    /// Set the interaction mode.
    pub fn with_mode(mut self, mode: InstallMode) -> Self {
        self.mode = mode;
        self
    }

    /// Replace the composed installer arguments entirely.
    pub fn with_override_args(mut self, args: impl Into<String>) -> Self {
        self.override_args = Some(args.into());
        self
    }
}
