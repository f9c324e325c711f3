//! imy_bundler - packages pip install output into loader bundles.
//!
//! Usage: `imy_bundler <INPUT_DIR> <OUTPUT_DIR> <PYTHON_VERSION> "<ABI> ..."`

use imy_bundler::cli;
use std::{error::Error as _, process};

fn main() {
    // Initialize logging
    env_logger::init();

    // Run CLI and get exit code
    let exit_code = match cli::run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            let mut source = e.source();
            while let Some(cause) = source {
                eprintln!("  caused by: {}", cause);
                source = cause.source();
            }
            if e.is_usage_error() { 2 } else { 1 }
        }
    };

    process::exit(exit_code);
}
