//! Windows back end: raw Win32 for argument capture, process creation and
//! the error dialog.
//!
//! Every handle or allocation obtained here has an owner whose `Drop`
//! releases it, so early returns cannot leak:
//! - `CommandLineToArgvW` block → [`LocalArgv`] (`LocalFree`)
//! - process / primary thread → `OwnedHandle` (`CloseHandle`)

#![cfg(target_os = "windows")]

use std::ffi::{OsStr, OsString};
use std::io;
use std::os::windows::ffi::{OsStrExt, OsStringExt};
use std::os::windows::io::{AsRawHandle, FromRawHandle, OwnedHandle};

use windows_sys::core::PWSTR;
use windows_sys::Win32::Foundation::{LocalFree, FALSE, TRUE, WAIT_OBJECT_0};
use windows_sys::Win32::System::Environment::GetCommandLineW;
use windows_sys::Win32::System::Threading::{
    CreateProcessW, GetExitCodeProcess, WaitForSingleObject, CREATE_NO_WINDOW, INFINITE,
    NORMAL_PRIORITY_CLASS, PROCESS_INFORMATION, STARTF_USESHOWWINDOW, STARTF_USESTDHANDLES,
    STARTUPINFOW,
};
use windows_sys::Win32::UI::Shell::CommandLineToArgvW;
use windows_sys::Win32::UI::WindowsAndMessaging::{
    MessageBoxW, MB_ICONERROR, MB_OK, SW_HIDE, SW_SHOW,
};

use crate::error::LaunchError;
use crate::process::{ConsoleMode, ExitStatus, SpawnRequest};

/// NUL-terminated UTF-16 copy of `s`.
fn to_wide(s: &OsStr) -> Vec<u16> {
    s.encode_wide().chain(std::iter::once(0)).collect()
}

/// Length of a NUL-terminated UTF-16 string.
///
/// # Safety
/// `p` must point to a valid NUL-terminated buffer.
unsafe fn wide_len(p: *const u16) -> usize {
    let mut len = 0;
    while *p.add(len) != 0 {
        len += 1;
    }
    len
}

// ============================================================================
// Argument capture
// ============================================================================

/// Owner of the array returned by `CommandLineToArgvW`.
struct LocalArgv {
    ptr: *mut PWSTR,
    len: usize,
}

impl LocalArgv {
    fn entries(&self) -> impl Iterator<Item = &[u16]> + '_ {
        (0..self.len).map(move |i| unsafe {
            let arg = *self.ptr.add(i);
            std::slice::from_raw_parts(arg, wide_len(arg))
        })
    }
}

impl Drop for LocalArgv {
    fn drop(&mut self) {
        unsafe {
            LocalFree(self.ptr as _);
        }
    }
}

/// Split the process command line with `CommandLineToArgvW`. The program
/// name is still the first element.
pub(crate) fn command_line_args() -> Result<Vec<String>, LaunchError> {
    let mut argc: i32 = 0;
    let ptr = unsafe { CommandLineToArgvW(GetCommandLineW(), &mut argc) };
    if ptr.is_null() {
        return Err(LaunchError::ArgumentParse(format!(
            "CommandLineToArgvW failed: {}",
            io::Error::last_os_error()
        )));
    }
    let argv = LocalArgv {
        ptr,
        len: usize::try_from(argc).unwrap_or(0),
    };
    let raw = argv
        .entries()
        .map(|w| OsString::from_wide(w))
        .collect::<Vec<_>>();
    drop(argv);
    crate::args::decode_os_args(raw)
}

// ============================================================================
// Process creation
// ============================================================================

/// Exclusively owned child: process handle plus primary thread handle.
#[derive(Debug)]
pub(crate) struct ChildProcess {
    process: OwnedHandle,
    _thread: OwnedHandle,
    pid: u32,
}

pub(crate) fn spawn(request: &SpawnRequest<'_>) -> Result<ChildProcess, LaunchError> {
    let application = to_wide(request.application.as_os_str());
    // CreateProcessW may modify the command-line buffer in place.
    let mut command_line = to_wide(OsStr::new(request.command_line.as_str()));
    let working_dir = to_wide(request.working_dir.as_os_str());

    let mut si: STARTUPINFOW = unsafe { std::mem::zeroed() };
    si.cb = std::mem::size_of::<STARTUPINFOW>() as u32;

    let (inherit_handles, creation_flags) = match request.console {
        ConsoleMode::Hidden => {
            // No pipe and no inherited handles: standard handles stay null.
            si.dwFlags = STARTF_USESHOWWINDOW | STARTF_USESTDHANDLES;
            si.wShowWindow = SW_HIDE as u16;
            (FALSE, CREATE_NO_WINDOW)
        }
        ConsoleMode::Visible => {
            si.dwFlags = STARTF_USESHOWWINDOW;
            si.wShowWindow = SW_SHOW as u16;
            (TRUE, NORMAL_PRIORITY_CLASS)
        }
    };

    let mut pi: PROCESS_INFORMATION = unsafe { std::mem::zeroed() };
    let ok = unsafe {
        CreateProcessW(
            application.as_ptr(),
            command_line.as_mut_ptr(),
            std::ptr::null(),
            std::ptr::null(),
            inherit_handles,
            creation_flags,
            std::ptr::null(),
            working_dir.as_ptr(),
            &si,
            &mut pi,
        )
    };
    if ok == 0 {
        return Err(LaunchError::ProcessSpawn {
            command_line: request.command_line.to_string(),
            source: io::Error::last_os_error(),
        });
    }

    // SAFETY: both handles were just returned by a successful CreateProcessW
    // and are owned by nobody else.
    let (process, thread) = unsafe {
        (
            OwnedHandle::from_raw_handle(pi.hProcess as _),
            OwnedHandle::from_raw_handle(pi.hThread as _),
        )
    };
    Ok(ChildProcess {
        process,
        _thread: thread,
        pid: pi.dwProcessId,
    })
}

impl ChildProcess {
    pub(crate) fn id(&self) -> u32 {
        self.pid
    }

    /// Block until the child exits (no timeout), then read its exit code.
    pub(crate) fn wait(self) -> Result<ExitStatus, LaunchError> {
        let handle = self.process.as_raw_handle() as _;
        let waited = unsafe { WaitForSingleObject(handle, INFINITE) };
        if waited != WAIT_OBJECT_0 {
            return Err(LaunchError::ExitCodeRetrieval {
                source: io::Error::last_os_error(),
            });
        }
        let mut code: u32 = 0;
        if unsafe { GetExitCodeProcess(handle, &mut code) } == 0 {
            return Err(LaunchError::ExitCodeRetrieval {
                source: io::Error::last_os_error(),
            });
        }
        Ok(ExitStatus::new(code))
    }
}

// ============================================================================
// Error dialog
// ============================================================================

/// Modal error box. Blocks until the user dismisses it.
pub(crate) fn show_error_dialog(title: &str, message: &str) {
    let title = to_wide(OsStr::new(title));
    let message = to_wide(OsStr::new(message));
    unsafe {
        MessageBoxW(
            std::ptr::null_mut(),
            message.as_ptr(),
            title.as_ptr(),
            MB_OK | MB_ICONERROR,
        );
    }
}
