//! Installer command-line composition.

use crate::invocation::{InstallMode, InvocationContext};
use crate::manifest::ManifestInstaller;

use super::tokens::{substitute_tokens, ResolvedPaths};

/// Compose the argument string passed to the installer.
///
/// User override arguments replace everything. Otherwise the switch for the
/// requested mode comes first, then any custom switches, then the log and
/// install-location switches when the user asked for those. Tokens are
/// substituted last.
pub fn build_installer_args(
    manifest: &ManifestInstaller,
    context: &InvocationContext,
    paths: &ResolvedPaths,
) -> String {
    if let Some(args) = &context.override_args {
        return substitute_tokens(args, paths);
    }

    let switches = manifest.effective_switches();
    let mode_switch = match context.mode {
        InstallMode::Interactive => switches.interactive,
        InstallMode::Silent => switches.silent,
        InstallMode::SilentWithProgress => switches.silent_with_progress,
    };

    let mut parts = Vec::new();
    parts.extend(mode_switch);
    parts.extend(switches.custom);
    if context.log_path.is_some() {
        parts.extend(switches.log);
    }
    if context.install_location.is_some() {
        parts.extend(switches.install_location);
    }

    let template = parts
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    substitute_tokens(&template, paths)
}

/// Split an argument string into argv entries.
///
/// Whitespace separates arguments except inside double quotes. Quote
/// characters are removed, so `/DIR="C:\Program Files\App"` becomes the
/// single argument `/DIR=C:\Program Files\App`. An unterminated quote runs to
/// the end of the input.
pub fn split_arguments(args: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut has_token = false;

    for c in args.chars() {
        match c {
            '"' => {
                in_quotes = !in_quotes;
                has_token = true;
            }
            c if c.is_whitespace() && !in_quotes => {
                if has_token {
                    out.push(std::mem::take(&mut current));
                    has_token = false;
                }
            }
            c => {
                current.push(c);
                has_token = true;
            }
        }
    }

    if has_token {
        out.push(current);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::{InstallerSwitches, InstallerType};

    fn paths() -> ResolvedPaths {
        ResolvedPaths::new("/logs/run.log", "/opt/app")
    }

    #[test]
    fn test_default_mode_uses_silent_with_progress() {
        let manifest = ManifestInstaller::new("https://x/y", "00", InstallerType::Nullsoft);
        let args = build_installer_args(&manifest, &InvocationContext::new(), &paths());
        assert_eq!(args, "/S");
    }

    #[test]
    fn test_optional_switches_only_when_requested() {
        let manifest = ManifestInstaller::new("https://x/y", "00", InstallerType::Inno);

        let plain = build_installer_args(
            &manifest,
            &InvocationContext::new().with_mode(InstallMode::Silent),
            &paths(),
        );
        assert_eq!(plain, "/SP- /VERYSILENT /SUPPRESSMSGBOXES /NORESTART");

        let full = build_installer_args(
            &manifest,
            &InvocationContext::new()
                .with_mode(InstallMode::Silent)
                .with_log_path("/logs/run.log")
                .with_install_location("/opt/app"),
            &paths(),
        );
        assert_eq!(
            full,
            "/SP- /VERYSILENT /SUPPRESSMSGBOXES /NORESTART /LOG=\"/logs/run.log\" /DIR=\"/opt/app\""
        );
    }

    #[test]
    fn test_custom_switches_follow_mode_switch() {
        let manifest = ManifestInstaller::new("https://x/y", "00", InstallerType::Exe)
            .with_switches(InstallerSwitches {
                silent: Some("--quiet".to_string()),
                custom: Some("--no-telemetry".to_string()),
                ..Default::default()
            });
        let context = InvocationContext::new().with_mode(InstallMode::Silent);
        assert_eq!(
            build_installer_args(&manifest, &context, &paths()),
            "--quiet --no-telemetry"
        );
    }

    #[test]
    fn test_missing_mode_switch_is_skipped() {
        let manifest = ManifestInstaller::new("https://x/y", "00", InstallerType::Exe);
        let context = InvocationContext::new().with_mode(InstallMode::Interactive);
        assert_eq!(build_installer_args(&manifest, &context, &paths()), "");
    }

    #[test]
    fn test_override_replaces_everything() {
        let manifest = ManifestInstaller::new("https://x/y", "00", InstallerType::Inno);
        let context = InvocationContext::new()
            .with_log_path("/logs/run.log")
            .with_override_args("--target <INSTALLPATH> --log <LOGPATH>");
        assert_eq!(
            build_installer_args(&manifest, &context, &paths()),
            "--target /opt/app --log /logs/run.log"
        );
    }

    #[test]
    fn test_split_plain_arguments() {
        assert_eq!(split_arguments("/S  /quiet\t-x"), vec!["/S", "/quiet", "-x"]);
        assert!(split_arguments("   ").is_empty());
    }

    #[test]
    fn test_split_honors_quotes() {
        assert_eq!(
            split_arguments(r#"/DIR="/opt/my app" /LOG="/var/log/a b.log""#),
            vec!["/DIR=/opt/my app", "/LOG=/var/log/a b.log"]
        );
        assert_eq!(split_arguments(r#"a "" b"#), vec!["a", "", "b"]);
        assert_eq!(split_arguments(r#""unterminated arg"#), vec!["unterminated arg"]);
    }
}
