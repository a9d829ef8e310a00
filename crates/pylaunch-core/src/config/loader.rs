//! Layered settings lookup.
//!
//! Precedence: process environment, then `pylaunch.env` next to the launcher
//! executable, then the caller's default. The file is parsed into a map and is
//! never written into the process environment: the child must inherit the
//! parent's environment exactly as the launcher received it.

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::env;
use std::path::Path;

/// Optional settings file, looked up in the launcher's own directory.
pub const SETTINGS_FILE_NAME: &str = "pylaunch.env";

/// Key/value source for launcher settings.
#[derive(Debug, Clone, Default)]
pub struct SettingsSource {
    file: HashMap<String, String>,
    use_process_env: bool,
    load_error: Option<String>,
}

impl SettingsSource {
    /// Process environment plus `<dir>/pylaunch.env` if present.
    ///
    /// An unreadable settings file is ignored; it never stops the launch.
    /// This runs before tracing is set up, so the failure is kept for
    /// [`load_error`](Self::load_error) instead of being logged here.
    pub fn load(dir: &Path) -> Self {
        let path = dir.join(SETTINGS_FILE_NAME);
        let (file, load_error) = match read_settings_file(&path) {
            Ok(map) => (map, None),
            Err(e) => (
                HashMap::new(),
                Some(format!("Ignoring settings file {}: {:#}", path.display(), e)),
            ),
        };
        Self {
            file,
            use_process_env: true,
            load_error,
        }
    }

    /// Why the settings file was ignored, if it was.
    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    /// Fixed pairs, process environment ignored. Used by tests and embedders.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            file: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            use_process_env: false,
            load_error: None,
        }
    }

    /// Read a key. Empty (after trimming) counts as unset.
    pub fn get(&self, key: &str) -> Option<String> {
        let from_env = if self.use_process_env {
            env::var(key).ok()
        } else {
            None
        };
        from_env
            .filter(|v| !v.trim().is_empty())
            .or_else(|| self.file.get(key).cloned())
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    /// Read a key, falling back to `default`.
    pub fn get_or<F>(&self, key: &str, default: F) -> String
    where
        F: FnOnce() -> String,
    {
        self.get(key).unwrap_or_else(default)
    }

    /// Parse a boolean: 0/false/no/off are false, anything else set is true.
    pub fn get_bool_opt(&self, key: &str) -> Option<bool> {
        self.get(key).map(|s| {
            !matches!(
                s.to_lowercase().as_str(),
                "0" | "false" | "no" | "off"
            )
        })
    }

    pub fn get_bool(&self, key: &str, default: bool) -> bool {
        self.get_bool_opt(key).unwrap_or(default)
    }
}

/// Read and parse a settings file. A missing file is an empty map.
fn read_settings_file(path: &Path) -> Result<HashMap<String, String>> {
    if !path.exists() {
        return Ok(HashMap::new());
    }
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    Ok(parse_settings(&content))
}

/// Parse `KEY=VALUE` lines. Blank lines and `#` comments are skipped, a
/// trailing `# comment` is stripped from unquoted values, and one level of
/// matching single or double quotes is removed.
pub fn parse_settings(content: &str) -> HashMap<String, String> {
    let mut map = HashMap::new();
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some(eq_pos) = line.find('=') else {
            continue;
        };
        let key = line[..eq_pos].trim();
        let mut value = line[eq_pos + 1..].trim();
        if let Some(hash_pos) = value.find('#') {
            let before_hash = value[..hash_pos].trim_end();
            if !before_hash.contains('"') && !before_hash.contains('\'') {
                value = before_hash;
            }
        }
        if value.len() >= 2
            && ((value.starts_with('"') && value.ends_with('"'))
                || (value.starts_with('\'') && value.ends_with('\'')))
        {
            value = &value[1..value.len() - 1];
        }
        if !key.is_empty() {
            map.insert(key.to_string(), value.to_string());
        }
    }
    map
}
