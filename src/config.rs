use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use log::warn;

pub const DEFAULT_HOTKEY: &str = "F9";
pub const DEFAULT_DEVTOOLS_URL: &str = "http://127.0.0.1:9222";
pub const DEFAULT_DEVTOOLS_TIMEOUT_MS: u64 = 2_000;
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

const ENV_ROOT: &str = "CONTEXTSHOT_ROOT";
const ENV_HOTKEY: &str = "CONTEXTSHOT_HOTKEY";
const ENV_DEVTOOLS_URL: &str = "CONTEXTSHOT_DEVTOOLS_URL";
const ENV_DEVTOOLS_TIMEOUT_MS: &str = "CONTEXTSHOT_DEVTOOLS_TIMEOUT_MS";

/// Settings for one run, built once at startup.
#[derive(Debug, Clone)]
pub struct CaptureConfig {
    /// Screenshots land in `<root_dir>/<app>/<context>/`.
    pub root_dir: PathBuf,
    /// Shortcut string, see [`crate::hotkey::parse_shortcut`].
    pub hotkey: String,
    /// Chromium DevTools endpoint; `None` disables tab lookup.
    pub devtools_url: Option<String>,
    pub devtools_timeout: Duration,
    /// chrono format string for the file name prefix.
    pub timestamp_format: String,
}

impl CaptureConfig {
    /// Defaults with an explicit screenshot root.
    pub fn with_root(root_dir: impl Into<PathBuf>) -> Self {
        Self {
            root_dir: root_dir.into(),
            hotkey: DEFAULT_HOTKEY.to_string(),
            devtools_url: Some(DEFAULT_DEVTOOLS_URL.to_string()),
            devtools_timeout: Duration::from_millis(DEFAULT_DEVTOOLS_TIMEOUT_MS),
            timestamp_format: TIMESTAMP_FORMAT.to_string(),
        }
    }

    /// Defaults overridden by `CONTEXTSHOT_*` environment variables.
    pub fn load() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let root_dir = match lookup(ENV_ROOT).filter(|v| !v.trim().is_empty()) {
            Some(root) => PathBuf::from(root),
            None => default_root()?,
        };

        let mut config = Self::with_root(root_dir);

        if let Some(hotkey) = lookup(ENV_HOTKEY).filter(|v| !v.trim().is_empty()) {
            config.hotkey = hotkey.trim().to_string();
        }

        if let Some(url) = lookup(ENV_DEVTOOLS_URL) {
            let url = url.trim();
            config.devtools_url = if url.is_empty() || url.eq_ignore_ascii_case("off") {
                None
            } else {
                Some(url.to_string())
            };
        }

        if let Some(raw) = lookup(ENV_DEVTOOLS_TIMEOUT_MS) {
            match raw.trim().parse::<u64>() {
                Ok(ms) if ms > 0 => config.devtools_timeout = Duration::from_millis(ms),
                _ => warn!(
                    "Ignoring {ENV_DEVTOOLS_TIMEOUT_MS}={raw:?}; using {}ms",
                    config.devtools_timeout.as_millis()
                ),
            }
        }

        Ok(config)
    }
}

/// `<home>/Videos/Screenshots`.
fn default_root() -> Result<PathBuf> {
    let home = dirs::home_dir().context("could not determine home directory")?;
    Ok(home.join("Videos").join("Screenshots"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load_from(vars: &[(&str, &str)]) -> CaptureConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        CaptureConfig::from_lookup(|key| vars.get(key).cloned()).unwrap()
    }

    #[test]
    fn defaults() {
        let config = load_from(&[(ENV_ROOT, "/data/shots")]);
        assert_eq!(config.root_dir, PathBuf::from("/data/shots"));
        assert_eq!(config.hotkey, "F9");
        assert_eq!(config.devtools_url.as_deref(), Some("http://127.0.0.1:9222"));
        assert_eq!(config.devtools_timeout, Duration::from_secs(2));
        assert_eq!(config.timestamp_format, "%Y-%m-%d_%H-%M-%S");
    }

    #[test]
    fn default_root_is_under_home() {
        let Some(home) = dirs::home_dir() else {
            return;
        };
        let config = load_from(&[]);
        assert_eq!(config.root_dir, home.join("Videos").join("Screenshots"));
    }

    #[test]
    fn overrides() {
        let config = load_from(&[
            (ENV_ROOT, "/data/shots"),
            (ENV_HOTKEY, " Ctrl+Shift+S "),
            (ENV_DEVTOOLS_URL, "http://localhost:9333"),
            (ENV_DEVTOOLS_TIMEOUT_MS, "500"),
        ]);
        assert_eq!(config.hotkey, "Ctrl+Shift+S");
        assert_eq!(config.devtools_url.as_deref(), Some("http://localhost:9333"));
        assert_eq!(config.devtools_timeout, Duration::from_millis(500));
    }

    #[test]
    fn devtools_can_be_disabled() {
        let config = load_from(&[(ENV_ROOT, "/x"), (ENV_DEVTOOLS_URL, "off")]);
        assert_eq!(config.devtools_url, None);
        let config = load_from(&[(ENV_ROOT, "/x"), (ENV_DEVTOOLS_URL, "")]);
        assert_eq!(config.devtools_url, None);
    }

    #[test]
    fn bad_timeout_keeps_default() {
        let config = load_from(&[(ENV_ROOT, "/x"), (ENV_DEVTOOLS_TIMEOUT_MS, "soon")]);
        assert_eq!(config.devtools_timeout, Duration::from_millis(DEFAULT_DEVTOOLS_TIMEOUT_MS));
        let config = load_from(&[(ENV_ROOT, "/x"), (ENV_DEVTOOLS_TIMEOUT_MS, "0")]);
        assert_eq!(config.devtools_timeout, Duration::from_millis(DEFAULT_DEVTOOLS_TIMEOUT_MS));
    }
}
