//! Failure reporting: the single sink for every fatal launcher error.

use std::sync::Mutex;

use crate::error::LaunchError;

/// Exit code of the launcher itself when it cannot run the child.
pub const FATAL_EXIT_CODE: i32 = 1;

/// Title of the error dialog.
pub const DIALOG_TITLE: &str = "Error";

/// Surfaces a fatal error to the user. Implementations block until the
/// message has been delivered (a modal dialog blocks until dismissed).
pub trait FailureReporter: Send + Sync {
    fn report(&self, error: &LaunchError);
}

/// Modal error dialog on Windows; stderr elsewhere.
#[derive(Debug, Clone, Copy, Default)]
pub struct DialogReporter;

impl FailureReporter for DialogReporter {
    fn report(&self, error: &LaunchError) {
        #[cfg(target_os = "windows")]
        {
            crate::windows::show_error_dialog(DIALOG_TITLE, &error.to_string());
        }
        #[cfg(not(target_os = "windows"))]
        {
            eprintln!("{}: {}", DIALOG_TITLE, error);
        }
    }
}

/// Non-blocking reporter that keeps the messages, for tests and embedders.
#[derive(Debug, Default)]
pub struct RecordingReporter {
    messages: Mutex<Vec<String>>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages
            .lock()
            .map(|m| m.clone())
            .unwrap_or_default()
    }
}

impl FailureReporter for RecordingReporter {
    fn report(&self, error: &LaunchError) {
        if let Ok(mut m) = self.messages.lock() {
            m.push(error.to_string());
        }
    }
}

/// Log, report and terminate with [`FATAL_EXIT_CODE`]. Never returns.
///
/// Callers drop every handle they own before getting here; `process::exit`
/// skips destructors.
pub fn fail(reporter: &dyn FailureReporter, error: &LaunchError) -> ! {
    tracing::error!(step = error.step(), "{}", error);
    reporter.report(error);
    std::process::exit(FATAL_EXIT_CODE)
}
