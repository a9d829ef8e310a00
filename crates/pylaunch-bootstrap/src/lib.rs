//! Bootstrap of a bundled interpreter from a self-contained install tree.
//!
//! ```text
//! <launcher dir>/
//!   launcher(.exe)
//!   pylaunch.env          optional settings
//!   program/              application root, child working directory
//!     runtime/<python>    interpreter
//!     main.py             entry script
//! ```
//!
//! Pipeline: resolve own path → validate application root → capture
//! arguments → spawn → wait → propagate exit status. Every failure is a
//! [`LaunchError`] for a [`FailureReporter`].

pub mod args;
pub mod command_line;
pub mod error;
pub mod layout;
pub mod process;
pub mod report;

#[cfg(not(target_os = "windows"))]
mod posix;

#[cfg(target_os = "windows")]
mod windows;

use std::path::PathBuf;

use pylaunch_core::config::{BehaviorConfig, LayoutConfig, SettingsSource};

pub use args::ArgumentVector;
pub use command_line::{CommandLine, QuotingStyle};
pub use error::LaunchError;
pub use layout::LauncherConfig;
pub use process::{ConsoleMode, ExitStatus, LaunchPolicy};
pub use report::{
    fail, DialogReporter, FailureReporter, RecordingReporter, FATAL_EXIT_CODE,
};

/// Resolved launcher: layout plus policy, immutable once built.
#[derive(Debug, Clone)]
pub struct Bootstrap {
    config: LauncherConfig,
    policy: LaunchPolicy,
}

impl Bootstrap {
    pub fn new(config: LauncherConfig, policy: LaunchPolicy) -> Self {
        Self { config, policy }
    }

    /// Build from the executable path and layered settings.
    pub fn from_settings(
        exe: PathBuf,
        settings: &SettingsSource,
        mode: ConsoleMode,
    ) -> Result<Self, LaunchError> {
        let config = LauncherConfig::from_executable(exe, &LayoutConfig::from_source(settings))?;
        let policy =
            LaunchPolicy::for_mode(mode).with_behavior(&BehaviorConfig::from_source(settings));
        tracing::debug!(
            exe = %config.own_executable().display(),
            app_root = %config.app_root().display(),
            interpreter = %config.interpreter().display(),
            entry = %config.entry_script().display(),
            ?policy,
            "Resolved launch layout"
        );
        Ok(Self { config, policy })
    }

    pub fn config(&self) -> &LauncherConfig {
        &self.config
    }

    pub fn policy(&self) -> &LaunchPolicy {
        &self.policy
    }

    /// Run with this process's own arguments.
    pub fn run(&self) -> Result<ExitStatus, LaunchError> {
        self.config.ensure_app_root()?;
        let args = ArgumentVector::capture()?;
        process::launch(&self.config, &args, &self.policy)
    }

    /// Run with an explicit argument vector.
    pub fn run_with_args(&self, args: &ArgumentVector) -> Result<ExitStatus, LaunchError> {
        self.config.ensure_app_root()?;
        process::launch(&self.config, args, &self.policy)
    }

    /// The command line the child would receive for `args`.
    pub fn command_line(&self, args: &ArgumentVector) -> CommandLine {
        process::command_line_for(&self.config, args, &self.policy)
    }
}
