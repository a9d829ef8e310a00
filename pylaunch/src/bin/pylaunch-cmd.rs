use pylaunch::{run_launcher, ConsoleMode};

fn main() {
    run_launcher(ConsoleMode::Visible)
}
