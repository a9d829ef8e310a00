//! pylaunch entry point, shared by the `pylaunch` (hidden) and
//! `pylaunch-cmd` (console) binaries.

use pylaunch_bootstrap::{fail, layout, Bootstrap, DialogReporter};
use pylaunch_core::config::{ObservabilityConfig, SettingsSource};
use pylaunch_core::observability;

pub use pylaunch_bootstrap::ConsoleMode;

/// Run the launcher and exit with the child's status. Fatal errors go to the
/// error dialog and exit with `FATAL_EXIT_CODE`.
pub fn run_launcher(mode: ConsoleMode) -> ! {
    let reporter = DialogReporter;

    let exe = match layout::resolve_own_executable() {
        Ok(exe) => exe,
        Err(e) => fail(&reporter, &e),
    };
    let settings = match layout::launcher_dir(&exe) {
        Ok(dir) => SettingsSource::load(dir),
        Err(e) => fail(&reporter, &e),
    };
    observability::init_tracing(&ObservabilityConfig::from_source(&settings));
    if let Some(warning) = settings.load_error() {
        tracing::warn!("{}", warning);
    }

    let status = match Bootstrap::from_settings(exe, &settings, mode).and_then(|b| b.run()) {
        Ok(status) => status,
        Err(e) => fail(&reporter, &e),
    };
    tracing::debug!(code = status.code(), mode = mode.as_str(), "Launcher exiting");
    std::process::exit(status.as_process_code())
}
