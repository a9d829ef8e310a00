//! Non-Windows back end on `std::process::Command`.
//!
//! There is no command-line string at the OS level here, so the child gets
//! the built command line re-split with the Windows rules, with argv[0] set
//! to the relative interpreter path. Legacy quoting therefore loses embedded
//! quotes here exactly as it does on Windows.

#![cfg(not(target_os = "windows"))]

use std::process::{Child, Command, Stdio};

use crate::error::LaunchError;
use crate::process::{ConsoleMode, ExitStatus, SpawnRequest};

/// Exclusively owned child. Dropping it without waiting leaves the process
/// running; the launcher always waits.
#[derive(Debug)]
pub(crate) struct ChildProcess {
    child: Child,
}

pub(crate) fn spawn(request: &SpawnRequest<'_>) -> Result<ChildProcess, LaunchError> {
    let mut cmd = Command::new(&request.application);
    cmd.args(request.argv.iter().skip(1))
        .current_dir(request.working_dir);

    #[cfg(unix)]
    {
        use std::os::unix::process::CommandExt;
        if let Some(arg0) = request.argv.first() {
            cmd.arg0(arg0);
        }
    }

    match request.console {
        ConsoleMode::Hidden => {
            cmd.stdin(Stdio::null())
                .stdout(Stdio::null())
                .stderr(Stdio::null());
        }
        ConsoleMode::Visible => {
            cmd.stdin(Stdio::inherit())
                .stdout(Stdio::inherit())
                .stderr(Stdio::inherit());
        }
    }

    let child = cmd.spawn().map_err(|source| LaunchError::ProcessSpawn {
        command_line: request.command_line.to_string(),
        source,
    })?;
    Ok(ChildProcess { child })
}

impl ChildProcess {
    pub(crate) fn id(&self) -> u32 {
        self.child.id()
    }

    /// Block until exit. A signal-terminated child maps to `128 + signal`.
    pub(crate) fn wait(mut self) -> Result<ExitStatus, LaunchError> {
        let status = self
            .child
            .wait()
            .map_err(|source| LaunchError::ExitCodeRetrieval { source })?;
        if let Some(code) = status.code() {
            return Ok(ExitStatus::new(code as u32));
        }
        #[cfg(unix)]
        {
            use std::os::unix::process::ExitStatusExt;
            if let Some(signal) = status.signal() {
                tracing::warn!(signal, "Child terminated by signal");
                return Ok(ExitStatus::new(128 + signal as u32));
            }
        }
        Err(LaunchError::ExitCodeRetrieval {
            source: std::io::Error::new(
                std::io::ErrorKind::Other,
                format!("child exited without an exit code: {status}"),
            ),
        })
    }
}
