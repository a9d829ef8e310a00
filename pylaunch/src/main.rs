#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]

use pylaunch::{run_launcher, ConsoleMode};

fn main() {
    run_launcher(ConsoleMode::Hidden)
}
