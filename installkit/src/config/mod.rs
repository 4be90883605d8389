//! Configuration for installer runs.
//!
//! [`InstallerConfig`] carries the runtime settings; [`ConfigFile`] loads
//! user overrides from `~/.installkit/config.ini`.

mod file;
mod settings;

pub use file::{
    config_file_path, expand_tilde, ConfigFile, ConfigFileError, DownloadSettings,
    InstallSettings, CONFIG_DIR_NAME, CONFIG_FILE_NAME,
};
pub use settings::{default_install_root, default_staging_dir, InstallerConfig, STAGING_DIR_NAME};
