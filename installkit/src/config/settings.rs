//! Runtime settings for installer runs.

use std::path::PathBuf;
use std::time::Duration;

use crate::download::DEFAULT_TIMEOUT_SECS;

/// Name of the directory created under the system temp dir for staging.
pub const STAGING_DIR_NAME: &str = "installkit";

/// Settings shared by every installer run in a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallerConfig {
    /// Directory holding private, per-run download files.
    pub staging_dir: PathBuf,

    /// Directory for installer logs when the user names no log file.
    pub log_dir: PathBuf,

    /// Install target when the user names no install location.
    pub install_root: PathBuf,

    /// HTTP request timeout.
    pub timeout: Duration,
}

impl Default for InstallerConfig {
    fn default() -> Self {
        let staging_dir = default_staging_dir();
        Self {
            log_dir: staging_dir.join("logs"),
            staging_dir,
            install_root: default_install_root(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl InstallerConfig {
    /// Create a configuration rooted at the given staging directory.
    ///
    /// Logs default to `<staging_dir>/logs`.
    pub fn new(staging_dir: PathBuf) -> Self {
        Self {
            log_dir: staging_dir.join("logs"),
            staging_dir,
            ..Default::default()
        }
    }

    /// Set the staging directory.
    pub fn with_staging_dir(mut self, path: PathBuf) -> Self {
        self.staging_dir = path;
        self
    }

    /// Set the default log directory.
    pub fn with_log_dir(mut self, path: PathBuf) -> Self {
        self.log_dir = path;
        self
    }

    /// Set the default install root.
    pub fn with_install_root(mut self, path: PathBuf) -> Self {
        self.install_root = path;
        self
    }

    /// Set the HTTP timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// `<system temp>/installkit`.
pub fn default_staging_dir() -> PathBuf {
    std::env::temp_dir().join(STAGING_DIR_NAME)
}

/// `<home>/Programs`, or under the system temp dir when there is no home.
pub fn default_install_root() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("Programs")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = InstallerConfig::default();
        assert!(config.staging_dir.ends_with(STAGING_DIR_NAME));
        assert_eq!(config.log_dir, config.staging_dir.join("logs"));
        assert!(config.install_root.ends_with("Programs"));
        assert_eq!(config.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    }

    #[test]
    fn test_builder_pattern() {
        let config = InstallerConfig::new(PathBuf::from("/var/tmp/stage"))
            .with_install_root(PathBuf::from("/opt"))
            .with_timeout(Duration::from_secs(60));

        assert_eq!(config.staging_dir, PathBuf::from("/var/tmp/stage"));
        assert_eq!(config.log_dir, PathBuf::from("/var/tmp/stage/logs"));
        assert_eq!(config.install_root, PathBuf::from("/opt"));
        assert_eq!(config.timeout, Duration::from_secs(60));
    }
}
