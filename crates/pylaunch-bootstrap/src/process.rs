//! Child process launch: console policy, spawn, blocking wait, exit status.

use std::path::{Path, PathBuf};

use pylaunch_core::config::BehaviorConfig;

use crate::args::{split_command_line, ArgumentVector};
use crate::command_line::{CommandLine, QuotingStyle};
use crate::error::LaunchError;
use crate::layout::LauncherConfig;

#[cfg(not(target_os = "windows"))]
use crate::posix::spawn;
#[cfg(target_os = "windows")]
use crate::windows::spawn;

/// Console visibility of the child.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleMode {
    /// GUI-style: no console window, no inherited standard handles.
    Hidden,
    /// CLI-style: inherits the launcher's console and standard handles.
    Visible,
}

impl ConsoleMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hidden => "hidden",
            Self::Visible => "visible",
        }
    }
}

/// Everything that differs between the two launcher flavours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LaunchPolicy {
    pub console: ConsoleMode,
    /// Fail with `InterpreterNotFound` before spawning when the interpreter is
    /// missing, instead of letting the spawn fail.
    pub verify_interpreter: bool,
    pub quoting: QuotingStyle,
}

impl LaunchPolicy {
    /// Defaults per mode: the console launcher checks the interpreter up
    /// front, the windowless one relies on the spawn error.
    pub fn for_mode(console: ConsoleMode) -> Self {
        Self {
            console,
            verify_interpreter: matches!(console, ConsoleMode::Visible),
            quoting: QuotingStyle::default(),
        }
    }

    /// Apply settings overrides. An unknown quoting style is logged and ignored.
    pub fn with_behavior(mut self, behavior: &BehaviorConfig) -> Self {
        match behavior.quoting.parse::<QuotingStyle>() {
            Ok(style) => self.quoting = style,
            Err(e) => tracing::warn!("{}, keeping {:?}", e, self.quoting),
        }
        if let Some(check) = behavior.check_interpreter {
            self.verify_interpreter = check;
        }
        self
    }
}

/// Exit status of the child, in the platform exit-code domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitStatus(u32);

impl ExitStatus {
    pub fn new(code: u32) -> Self {
        Self(code)
    }

    pub fn code(self) -> u32 {
        self.0
    }

    pub fn success(self) -> bool {
        self.0 == 0
    }

    /// Value for `std::process::exit`. Bit-preserving, so Windows codes
    /// above `i32::MAX` (NTSTATUS values) reach the caller unchanged.
    pub fn as_process_code(self) -> i32 {
        self.0 as i32
    }
}

/// Inputs of a single spawn, shared by the platform back ends.
#[derive(Debug)]
pub(crate) struct SpawnRequest<'a> {
    /// Interpreter resolved against the application root.
    pub application: PathBuf,
    pub command_line: &'a CommandLine,
    /// `command_line` re-split with the Windows rules, so both back ends see
    /// the same elements under every quoting style. Only the non-Windows
    /// back end spawns from it.
    #[cfg_attr(target_os = "windows", allow(dead_code))]
    pub argv: Vec<String>,
    pub working_dir: &'a Path,
    pub console: ConsoleMode,
}

/// Build the command line for `args` under `policy`.
pub fn command_line_for(
    config: &LauncherConfig,
    args: &ArgumentVector,
    policy: &LaunchPolicy,
) -> CommandLine {
    CommandLine::build(config.interpreter(), config.entry_script(), args, policy.quoting)
}

/// Spawn the interpreter in the application root, block until it exits
/// (no timeout) and return its exit status.
///
/// Process and thread handles are owned by the child value and closed on
/// every path, including errors.
pub fn launch(
    config: &LauncherConfig,
    args: &ArgumentVector,
    policy: &LaunchPolicy,
) -> Result<ExitStatus, LaunchError> {
    let application = config.interpreter_path();
    if policy.verify_interpreter && !application.exists() {
        return Err(LaunchError::InterpreterNotFound { path: application });
    }

    let command_line = command_line_for(config, args, policy);
    tracing::debug!(
        console = policy.console.as_str(),
        cwd = %config.app_root().display(),
        "Command line: {}",
        command_line
    );

    // Back ends without a raw command line get exactly what it re-splits to.
    let argv = split_command_line(command_line.as_str());

    let request = SpawnRequest {
        application,
        command_line: &command_line,
        argv,
        working_dir: config.app_root(),
        console: policy.console,
    };
    let child = spawn(&request)?;
    tracing::info!(pid = child.id(), "Started {}", request.application.display());

    let status = child.wait()?;
    tracing::info!(code = status.code(), "Child exited");
    Ok(status)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_for_mode() {
        let hidden = LaunchPolicy::for_mode(ConsoleMode::Hidden);
        assert!(!hidden.verify_interpreter);
        assert_eq!(hidden.quoting, QuotingStyle::Escaped);

        let visible = LaunchPolicy::for_mode(ConsoleMode::Visible);
        assert!(visible.verify_interpreter);
        assert_eq!(visible.console, ConsoleMode::Visible);
    }

    #[test]
    fn test_policy_overrides() {
        let behavior = BehaviorConfig {
            quoting: "legacy".to_string(),
            check_interpreter: Some(true),
        };
        let policy = LaunchPolicy::for_mode(ConsoleMode::Hidden).with_behavior(&behavior);
        assert!(policy.verify_interpreter);
        assert_eq!(policy.quoting, QuotingStyle::Legacy);
    }

    #[test]
    fn test_unknown_quoting_keeps_default() {
        let behavior = BehaviorConfig {
            quoting: "posix".to_string(),
            check_interpreter: None,
        };
        let policy = LaunchPolicy::for_mode(ConsoleMode::Visible).with_behavior(&behavior);
        assert_eq!(policy.quoting, QuotingStyle::Escaped);
        assert!(policy.verify_interpreter);
    }

    #[test]
    fn test_exit_status_bits_preserved() {
        let status = ExitStatus::new(0xC000_0005);
        assert_eq!(status.as_process_code() as u32, 0xC000_0005);
        assert!(!status.success());
        assert!(ExitStatus::new(0).success());
        assert_eq!(ExitStatus::new(3).code(), 3);
    }

    #[test]
    fn test_missing_interpreter_checked_before_spawn() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("program")).unwrap();
        let layout = pylaunch_core::config::LayoutConfig {
            app_dir: "program".to_string(),
            interpreter: "runtime/missing-python".to_string(),
            entry_script: "main.py".to_string(),
        };
        let config = LauncherConfig::from_executable(dir.path().join("launcher"), &layout).unwrap();
        let policy = LaunchPolicy::for_mode(ConsoleMode::Visible);
        let err = launch(&config, &ArgumentVector::default(), &policy).unwrap_err();
        match err {
            LaunchError::InterpreterNotFound { path } => {
                assert_eq!(path, dir.path().join("program").join("runtime/missing-python"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_missing_interpreter_without_check_fails_at_spawn() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("program")).unwrap();
        let layout = pylaunch_core::config::LayoutConfig {
            app_dir: "program".to_string(),
            interpreter: "runtime/missing-python".to_string(),
            entry_script: "main.py".to_string(),
        };
        let config = LauncherConfig::from_executable(dir.path().join("launcher"), &layout).unwrap();
        let policy = LaunchPolicy::for_mode(ConsoleMode::Hidden);
        let err = launch(&config, &ArgumentVector::new(["x"]), &policy).unwrap_err();
        match err {
            LaunchError::ProcessSpawn { command_line, .. } => {
                assert!(command_line.contains("\"runtime/missing-python\""));
                assert!(command_line.ends_with("\"x\""));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
