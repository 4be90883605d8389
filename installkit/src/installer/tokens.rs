//! Placeholder tokens in installer argument templates.
//!
//! Argument templates may reference `<LOGPATH>` and `<INSTALLPATH>`; they
//! are replaced with the paths resolved for the current run. Nothing else
//! in a template is touched.

use std::path::{Path, PathBuf};

use chrono::Local;

use crate::config::InstallerConfig;
use crate::error::{InstallerError, InstallerResult};
use crate::invocation::InvocationContext;
use crate::manifest::ManifestInstaller;

/// Replaced by the installer log file path.
pub const ARG_TOKEN_LOGPATH: &str = "<LOGPATH>";

/// Replaced by the install target directory.
pub const ARG_TOKEN_INSTALLPATH: &str = "<INSTALLPATH>";

/// Concrete values for the argument tokens of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPaths {
    pub log_path: PathBuf,
    pub install_path: PathBuf,
}

impl ResolvedPaths {
    pub fn new(log_path: impl Into<PathBuf>, install_path: impl Into<PathBuf>) -> Self {
        Self {
            log_path: log_path.into(),
            install_path: install_path.into(),
        }
    }

    /// Resolve from user overrides, falling back to configured defaults.
    ///
    /// The default log file is `<log_dir>/<installer type>-<timestamp>.log`;
    /// the default install path is the configured install root.
    ///
    /// # Errors
    ///
    /// [`InstallerError::ReservedToken`] if a resolved path contains an
    /// argument token, since substituting it would not be idempotent.
    pub fn resolve(
        context: &InvocationContext,
        manifest: &ManifestInstaller,
        config: &InstallerConfig,
    ) -> InstallerResult<Self> {
        let log_path = context.log_path.clone().unwrap_or_else(|| {
            config.log_dir.join(format!(
                "{}-{}.log",
                manifest.installer_type,
                Local::now().format("%Y%m%d-%H%M%S")
            ))
        });
        let install_path = context
            .install_location
            .clone()
            .unwrap_or_else(|| config.install_root.clone());

        reject_tokens(&log_path)?;
        reject_tokens(&install_path)?;
        Ok(Self {
            log_path,
            install_path,
        })
    }

    pub fn log_path(&self) -> &Path {
        &self.log_path
    }

    pub fn install_path(&self) -> &Path {
        &self.install_path
    }
}

fn reject_tokens(path: &Path) -> InstallerResult<()> {
    let text = path.to_string_lossy();
    match [ARG_TOKEN_LOGPATH, ARG_TOKEN_INSTALLPATH]
        .into_iter()
        .find(|token| text.contains(token))
    {
        Some(token) => Err(InstallerError::ReservedToken {
            path: path.to_path_buf(),
            token,
        }),
        None => Ok(()),
    }
}

/// Replace `<LOGPATH>` and `<INSTALLPATH>` in `template`.
///
/// The template is scanned once, left to right. Substituted values are
/// inserted literally and never rescanned, and any other bracketed text
/// (including near-misses such as `<logpath>` or `<LOGPATH`) is copied
/// unchanged. Applying the substitution to its own output is a no-op for
/// paths built by [`ResolvedPaths::resolve`], which refuses token text.
pub fn substitute_tokens(template: &str, paths: &ResolvedPaths) -> String {
    let log_path = paths.log_path.to_string_lossy();
    let install_path = paths.install_path.to_string_lossy();

    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(pos) = rest.find('<') {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];

        if let Some(after) = tail.strip_prefix(ARG_TOKEN_LOGPATH) {
            out.push_str(&log_path);
            rest = after;
        } else if let Some(after) = tail.strip_prefix(ARG_TOKEN_INSTALLPATH) {
            out.push_str(&install_path);
            rest = after;
        } else {
            out.push('<');
            rest = &tail[1..];
        }
    }

    out.push_str(rest);
    out
}
