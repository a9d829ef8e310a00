//! Settings key constants.

/// Install layout, all relative to the launcher / application root.
pub mod layout {
    pub const PYLAUNCH_APP_DIR: &str = "PYLAUNCH_APP_DIR";
    pub const PYLAUNCH_INTERPRETER: &str = "PYLAUNCH_INTERPRETER";
    pub const PYLAUNCH_ENTRY: &str = "PYLAUNCH_ENTRY";

    pub const DEFAULT_APP_DIR: &str = "program";
    pub const DEFAULT_ENTRY: &str = "main.py";

    #[cfg(target_os = "windows")]
    pub const DEFAULT_INTERPRETER: &str = "runtime\\python.exe";
    #[cfg(not(target_os = "windows"))]
    pub const DEFAULT_INTERPRETER: &str = "runtime/bin/python3";
}

/// Launch behaviour overrides.
pub mod behavior {
    /// `escaped` (default) or `legacy`.
    pub const PYLAUNCH_QUOTING: &str = "PYLAUNCH_QUOTING";
    /// Forces the pre-spawn interpreter check on or off for either console mode.
    pub const PYLAUNCH_CHECK_INTERPRETER: &str = "PYLAUNCH_CHECK_INTERPRETER";

    pub const DEFAULT_QUOTING: &str = "escaped";
}

/// Logging.
pub mod observability {
    pub const PYLAUNCH_QUIET: &str = "PYLAUNCH_QUIET";
    pub const PYLAUNCH_LOG_LEVEL: &str = "PYLAUNCH_LOG_LEVEL";
    pub const PYLAUNCH_LOG_JSON: &str = "PYLAUNCH_LOG_JSON";

    pub const DEFAULT_LOG_LEVEL: &str = "pylaunch=warn";
    pub const QUIET_LOG_LEVEL: &str = "pylaunch=error";
}
