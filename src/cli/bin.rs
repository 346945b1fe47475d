#[cfg(feature = "cli")]
use atlas::{init_logging, start_main_loop, Config};
#[cfg(feature = "cli")]
use std::process::ExitCode;

#[cfg(feature = "cli")]
pub fn main() -> ExitCode {
    init_logging();

    let config = match Config::from_current_dir() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{}", err);
            return ExitCode::from(2);
        }
    };

    // Errors inside the loop are handled there, only console failures reach here
    match start_main_loop(config) {
        Ok(exit) => ExitCode::from(exit.exit_code()),
        Err(err) => {
            eprintln!("{}", err);
            ExitCode::from(2)
        }
    }
}

// Placeholder for binary
#[cfg(not(feature = "cli"))]
pub fn main() {}
