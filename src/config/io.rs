use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use super::path::config_path;
use crate::error::{DlidxError, Result};

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Colors as `#rrggbb`; resolved by `tui::theme`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct ThemeSettings {
    pub bg: Option<String>,
    pub fg: Option<String>,
    pub accent: Option<String>,
    pub muted: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
struct RawSettings {
    timeout_secs: Option<u64>,
    user_agent: Option<String>,
    download_dir: Option<String>,
    log_level: Option<String>,
    #[serde(default)]
    theme: ThemeSettings,
}

/// Effective runtime settings with every default filled in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// `None` disables the overall request timeout
    pub timeout: Option<Duration>,
    pub user_agent: String,
    pub download_dir: PathBuf,
    pub log_level: String,
    pub theme: ThemeSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            timeout: Some(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
            user_agent: default_user_agent(),
            download_dir: PathBuf::from("."),
            log_level: "info".to_string(),
            theme: ThemeSettings::default(),
        }
    }
}

fn default_user_agent() -> String {
    format!("dlidx/{}", env!("CARGO_PKG_VERSION"))
}

/// Parse a config document. Unknown keys are ignored.
pub fn parse_settings(content: &str) -> Result<Settings> {
    let raw: RawSettings = toml::from_str(content).map_err(|e| DlidxError::Config {
        message: e.to_string(),
    })?;
    let defaults = Settings::default();

    let timeout = match raw.timeout_secs {
        Some(0) => None,
        Some(secs) => Some(Duration::from_secs(secs)),
        None => defaults.timeout,
    };
    let download_dir = match raw.download_dir {
        Some(dir) if !dir.trim().is_empty() => {
            let expanded = shellexpand::tilde(dir.trim());
            PathBuf::from(expanded.as_ref())
        }
        _ => defaults.download_dir,
    };

    Ok(Settings {
        timeout,
        user_agent: raw.user_agent.unwrap_or(defaults.user_agent),
        download_dir,
        log_level: raw.log_level.unwrap_or(defaults.log_level),
        theme: raw.theme,
    })
}

/// Settings plus a warning to log once logging is up. A missing file is
/// not worth a warning; an unreadable or invalid one is.
fn load_from(path: &Path) -> (Settings, Option<String>) {
    let content = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return (Settings::default(), None),
        Err(e) => {
            return (
                Settings::default(),
                Some(format!("Cannot read config {}: {e}", path.display())),
            )
        }
    };
    match parse_settings(&content) {
        Ok(settings) => (settings, None),
        Err(e) => (
            Settings::default(),
            Some(format!("Ignoring invalid config {}: {e}", path.display())),
        ),
    }
}

/// Load settings from the config file; a missing or broken file yields
/// defaults. The warning, if any, is for the caller to log: this runs
/// before the tracing subscriber exists.
pub fn load_settings() -> (Settings, Option<String>) {
    load_from(&config_path())
}
