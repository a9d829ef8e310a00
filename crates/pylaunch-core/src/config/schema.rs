//! Typed configuration groups, loaded from a `SettingsSource`.

use super::env_keys::{behavior, layout, observability as obv_keys};
use super::loader::SettingsSource;

/// Where the bundled application lives, relative to the launcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutConfig {
    /// Subdirectory of the launcher's directory holding the application root.
    pub app_dir: String,
    /// Interpreter path relative to the application root.
    pub interpreter: String,
    /// Entry script path relative to the application root.
    pub entry_script: String,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            app_dir: layout::DEFAULT_APP_DIR.to_string(),
            interpreter: layout::DEFAULT_INTERPRETER.to_string(),
            entry_script: layout::DEFAULT_ENTRY.to_string(),
        }
    }
}

impl LayoutConfig {
    pub fn from_source(src: &SettingsSource) -> Self {
        Self {
            app_dir: src.get_or(layout::PYLAUNCH_APP_DIR, || {
                layout::DEFAULT_APP_DIR.to_string()
            }),
            interpreter: src.get_or(layout::PYLAUNCH_INTERPRETER, || {
                layout::DEFAULT_INTERPRETER.to_string()
            }),
            entry_script: src.get_or(layout::PYLAUNCH_ENTRY, || layout::DEFAULT_ENTRY.to_string()),
        }
    }
}

/// Launch behaviour overrides. `None` / raw strings are interpreted by the
/// bootstrap crate, which owns the policy types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BehaviorConfig {
    pub quoting: String,
    pub check_interpreter: Option<bool>,
}

impl BehaviorConfig {
    pub fn from_source(src: &SettingsSource) -> Self {
        Self {
            quoting: src.get_or(behavior::PYLAUNCH_QUOTING, || {
                behavior::DEFAULT_QUOTING.to_string()
            }),
            check_interpreter: src.get_bool_opt(behavior::PYLAUNCH_CHECK_INTERPRETER),
        }
    }
}

/// Logging configuration: quiet, log_level, log_json.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObservabilityConfig {
    pub quiet: bool,
    pub log_level: String,
    pub log_json: bool,
}

impl ObservabilityConfig {
    pub fn from_source(src: &SettingsSource) -> Self {
        Self {
            quiet: src.get_bool(obv_keys::PYLAUNCH_QUIET, false),
            log_level: src.get_or(obv_keys::PYLAUNCH_LOG_LEVEL, || {
                obv_keys::DEFAULT_LOG_LEVEL.to_string()
            }),
            log_json: src.get_bool(obv_keys::PYLAUNCH_LOG_JSON, false),
        }
    }

    /// Filter directive actually applied: quiet wins over the configured level.
    pub fn effective_level(&self) -> &str {
        if self.quiet {
            obv_keys::QUIET_LOG_LEVEL
        } else {
            &self.log_level
        }
    }
}
