//! Manifest installer entries.
//!
//! A [`ManifestInstaller`] describes one downloadable installer: where to get
//! it, what it must hash to, which technology it uses, and the argument
//! templates used to drive it. Entries are produced by an upstream manifest
//! source and treated as read-only for the duration of a run.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Installer packaging technology.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum InstallerType {
    /// Plain self-contained executable with vendor-specific switches.
    Exe,
    /// Inno Setup executable.
    Inno,
    /// Nullsoft (NSIS) executable.
    Nullsoft,
    /// WiX Burn bundle.
    Burn,
    /// Windows Installer package.
    Msi,
    /// WiX-authored Windows Installer package.
    Wix,
    /// MSIX / AppX package.
    Msix,
    /// Archive that is extracted rather than executed.
    Zip,
}

impl InstallerType {
    /// All known installer technologies.
    pub const ALL: [InstallerType; 8] = [
        Self::Exe,
        Self::Inno,
        Self::Nullsoft,
        Self::Burn,
        Self::Msi,
        Self::Wix,
        Self::Msix,
        Self::Zip,
    ];

    /// Lowercase name used in manifests and logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Exe => "exe",
            Self::Inno => "inno",
            Self::Nullsoft => "nullsoft",
            Self::Burn => "burn",
            Self::Msi => "msi",
            Self::Wix => "wix",
            Self::Msix => "msix",
            Self::Zip => "zip",
        }
    }

    /// Switches the technology understands when the manifest supplies none.
    pub fn default_switches(&self) -> InstallerSwitches {
        match self {
            Self::Inno => InstallerSwitches {
                silent: Some("/SP- /VERYSILENT /SUPPRESSMSGBOXES /NORESTART".to_string()),
                silent_with_progress: Some("/SP- /SILENT /SUPPRESSMSGBOXES /NORESTART".to_string()),
                log: Some("/LOG=\"<LOGPATH>\"".to_string()),
                install_location: Some("/DIR=\"<INSTALLPATH>\"".to_string()),
                ..Default::default()
            },
            Self::Nullsoft => InstallerSwitches {
                silent: Some("/S".to_string()),
                silent_with_progress: Some("/S".to_string()),
                install_location: Some("/D=<INSTALLPATH>".to_string()),
                ..Default::default()
            },
            Self::Burn => InstallerSwitches {
                silent: Some("/quiet /norestart".to_string()),
                silent_with_progress: Some("/passive /norestart".to_string()),
                log: Some("/log \"<LOGPATH>\"".to_string()),
                ..Default::default()
            },
            Self::Msi | Self::Wix => InstallerSwitches {
                silent: Some("/quiet /norestart".to_string()),
                silent_with_progress: Some("/passive /norestart".to_string()),
                log: Some("/log \"<LOGPATH>\"".to_string()),
                install_location: Some("TARGETDIR=\"<INSTALLPATH>\"".to_string()),
                ..Default::default()
            },
            Self::Exe | Self::Msix | Self::Zip => InstallerSwitches::default(),
        }
    }
}

impl fmt::Display for InstallerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for InstallerType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|t| t.name() == lower)
            .ok_or_else(|| format!("unknown installer type '{}'", s))
    }
}

impl TryFrom<String> for InstallerType {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Argument templates for driving an installer.
///
/// Any value may contain the `<LOGPATH>` and `<INSTALLPATH>` tokens.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InstallerSwitches {
    /// Switches for a fully silent install.
    pub silent: Option<String>,
    /// Switches for a silent install that still shows progress.
    pub silent_with_progress: Option<String>,
    /// Switches for an interactive install.
    pub interactive: Option<String>,
    /// Switches always appended.
    pub custom: Option<String>,
    /// Switches enabling installer logging.
    pub log: Option<String>,
    /// Switches choosing the install directory.
    pub install_location: Option<String>,
}

impl InstallerSwitches {
    /// Overlay these switches on top of `defaults`, field by field.
    pub fn or_defaults(&self, defaults: &InstallerSwitches) -> InstallerSwitches {
        fn pick(own: &Option<String>, fallback: &Option<String>) -> Option<String> {
            own.clone().or_else(|| fallback.clone())
        }

        InstallerSwitches {
            silent: pick(&self.silent, &defaults.silent),
            silent_with_progress: pick(&self.silent_with_progress, &defaults.silent_with_progress),
            interactive: pick(&self.interactive, &defaults.interactive),
            custom: pick(&self.custom, &defaults.custom),
            log: pick(&self.log, &defaults.log),
            install_location: pick(&self.install_location, &defaults.install_location),
        }
    }
}

/// One installer entry from a package manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestInstaller {
    /// Where the installer is downloaded from.
    #[serde(rename = "installerUrl")]
    pub url: String,
    /// Expected SHA-256 digest of the installer, hex encoded.
    #[serde(rename = "installerSha256")]
    pub sha256: String,
    /// Installer technology.
    pub installer_type: InstallerType,
    /// Argument templates.
    #[serde(default, rename = "installerSwitches")]
    pub switches: InstallerSwitches,
    /// Product code, if the manifest provides one.
    #[serde(default)]
    pub product_code: Option<String>,
}

impl ManifestInstaller {
    /// Create an entry with no custom switches.
    pub fn new(
        url: impl Into<String>,
        sha256: impl Into<String>,
        installer_type: InstallerType,
    ) -> Self {
        Self {
            url: url.into(),
            sha256: sha256.into(),
            installer_type,
            switches: InstallerSwitches::default(),
            product_code: None,
        }
    }

    /// Replace the argument templates.
    pub fn with_switches(mut self, switches: InstallerSwitches) -> Self {
        self.switches = switches;
        self
    }

    /// Manifest switches overlaid on the technology defaults.
    pub fn effective_switches(&self) -> InstallerSwitches {
        self.switches
            .or_defaults(&self.installer_type.default_switches())
    }

    /// Parse an entry from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
