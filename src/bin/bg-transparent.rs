//! bg-transparent CLI Tool
//!
//! Command-line interface making the uniform background of an image
//! transparent using the bg-transparent library.

#[cfg(feature = "cli")]
use bg_transparent::cli;
#[cfg(feature = "cli")]
use std::process::ExitCode;

#[cfg(feature = "cli")]
fn main() -> ExitCode {
    match cli::main() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::from(255)
        },
    }
}

#[cfg(not(feature = "cli"))]
fn main() {
    panic!("CLI feature not enabled. Please rebuild with --features cli");
}
