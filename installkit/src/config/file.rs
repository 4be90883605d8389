//! Configuration file handling for `~/.installkit/config.ini`.
//!
//! Missing files and missing keys fall back to [`InstallerConfig`] defaults.

use std::path::{Path, PathBuf};
use std::time::Duration;

use ini::Ini;
use thiserror::Error;

use super::settings::InstallerConfig;

/// Directory under the home directory holding the config file.
pub const CONFIG_DIR_NAME: &str = ".installkit";

/// Config file name.
pub const CONFIG_FILE_NAME: &str = "config.ini";

/// Configuration file errors.
#[derive(Debug, Error)]
pub enum ConfigFileError {
    /// Failed to read or parse the config file
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] ini::Error),

    /// Invalid configuration value
    #[error("Invalid configuration: {section}.{key} = '{value}' - {reason}")]
    InvalidValue {
        section: String,
        key: String,
        value: String,
        reason: String,
    },
}

/// `[download]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DownloadSettings {
    /// Request timeout in seconds.
    pub timeout: Option<u64>,
    /// Staging directory override.
    pub staging_dir: Option<PathBuf>,
}

/// `[install]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstallSettings {
    /// Default installer log directory.
    pub log_dir: Option<PathBuf>,
    /// Default install root.
    pub install_root: Option<PathBuf>,
}

/// Parsed configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigFile {
    pub download: DownloadSettings,
    pub install: InstallSettings,
}

impl ConfigFile {
    /// Load configuration from the default path.
    pub fn load() -> Result<Self, ConfigFileError> {
        match config_file_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from a specific path.
    ///
    /// If the file doesn't exist, returns defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigFileError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let ini = Ini::load_from_file(path)?;
        parse_ini(&ini)
    }

    /// Parse configuration from INI text.
    pub fn parse(content: &str) -> Result<Self, ConfigFileError> {
        let ini = Ini::load_from_str(content)
            .map_err(|e| ConfigFileError::ReadError(ini::Error::Parse(e)))?;
        parse_ini(&ini)
    }

    /// Resolve into runtime settings, filling gaps with defaults.
    pub fn to_installer_config(&self) -> InstallerConfig {
        let mut config = match &self.download.staging_dir {
            Some(dir) => InstallerConfig::new(dir.clone()),
            None => InstallerConfig::default(),
        };

        if let Some(secs) = self.download.timeout {
            config = config.with_timeout(Duration::from_secs(secs));
        }
        if let Some(dir) = &self.install.log_dir {
            config = config.with_log_dir(dir.clone());
        }
        if let Some(dir) = &self.install.install_root {
            config = config.with_install_root(dir.clone());
        }

        config
    }
}

/// `~/.installkit/config.ini`, if a home directory exists.
pub fn config_file_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

fn parse_ini(ini: &Ini) -> Result<ConfigFile, ConfigFileError> {
    let mut config = ConfigFile::default();

    // [download] section
    if let Some(section) = ini.section(Some("download")) {
        if let Some(v) = section.get("timeout") {
            let secs: u64 = v
                .trim()
                .parse()
                .ok()
                .filter(|&s| s > 0)
                .ok_or_else(|| ConfigFileError::InvalidValue {
                    section: "download".to_string(),
                    key: "timeout".to_string(),
                    value: v.to_string(),
                    reason: "must be a positive integer (seconds)".to_string(),
                })?;
            config.download.timeout = Some(secs);
        }
        config.download.staging_dir = path_value(section.get("staging_dir"));
    }

    // [install] section
    if let Some(section) = ini.section(Some("install")) {
        config.install.log_dir = path_value(section.get("log_dir"));
        config.install.install_root = path_value(section.get("install_root"));
    }

    Ok(config)
}

fn path_value(value: Option<&str>) -> Option<PathBuf> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(expand_tilde)
}

/// Expand a leading `~` to the home directory.
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    } else if path == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp = TempDir::new().unwrap();
        let config = ConfigFile::load_from(&temp.path().join("absent.ini")).unwrap();
        assert_eq!(config, ConfigFile::default());
    }

    #[test]
    fn test_parse_all_sections() {
        let config = ConfigFile::parse(
            "[download]\n\
             timeout = 45\n\
             staging_dir = /var/tmp/stage\n\
             [install]\n\
             log_dir = /var/log/installers\n\
             install_root = /opt\n",
        )
        .unwrap();

        assert_eq!(config.download.timeout, Some(45));
        assert_eq!(
            config.download.staging_dir,
            Some(PathBuf::from("/var/tmp/stage"))
        );
        assert_eq!(
            config.install.log_dir,
            Some(PathBuf::from("/var/log/installers"))
        );
        assert_eq!(config.install.install_root, Some(PathBuf::from("/opt")));

        let resolved = config.to_installer_config();
        assert_eq!(resolved.timeout, Duration::from_secs(45));
        assert_eq!(resolved.staging_dir, PathBuf::from("/var/tmp/stage"));
        assert_eq!(resolved.log_dir, PathBuf::from("/var/log/installers"));
        assert_eq!(resolved.install_root, PathBuf::from("/opt"));
    }

    #[test]
    fn test_staging_dir_drives_default_log_dir() {
        let config = ConfigFile::parse("[download]\nstaging_dir = /srv/stage\n").unwrap();
        let resolved = config.to_installer_config();
        assert_eq!(resolved.log_dir, PathBuf::from("/srv/stage/logs"));
    }

    #[test]
    fn test_invalid_timeout() {
        for bad in ["abc", "0", "-5"] {
            let result = ConfigFile::parse(&format!("[download]\ntimeout = {}\n", bad));
            match result {
                Err(ConfigFileError::InvalidValue { section, key, .. }) => {
                    assert_eq!(section, "download");
                    assert_eq!(key, "timeout");
                }
                other => panic!("expected InvalidValue for {:?}, got {:?}", bad, other),
            }
        }
    }

    #[test]
    fn test_empty_path_values_are_ignored() {
        let config = ConfigFile::parse("[install]\nlog_dir =   \n").unwrap();
        assert!(config.install.log_dir.is_none());
    }

    #[test]
    fn test_load_from_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "[download]\ntimeout = 10\n").unwrap();

        let config = ConfigFile::load_from(&path).unwrap();
        assert_eq!(config.download.timeout, Some(10));
    }

    #[test]
    fn test_expand_tilde() {
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_tilde("~/x"), home.join("x"));
            assert_eq!(expand_tilde("~"), home);
        }
        assert_eq!(expand_tilde("/abs/path"), PathBuf::from("/abs/path"));
    }
}
