use std::process::ExitCode;

use static_fonts::{config, generate};

fn main() -> ExitCode {
    env_logger::init();

    let summary = generate::run(&config::families());
    if summary.is_complete() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
