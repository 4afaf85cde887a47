//! quotes - demo host for cmdroute
//!
//! CLI entry point.

#![forbid(unsafe_code)]
#![warn(clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

use std::process::ExitCode;

use cmdroute::cli::{self, Invocation};
use cmdroute::core::{logging, program_name};

fn main() -> ExitCode {
    logging::init_from_env();

    match cmdroute::run(&cli::app()) {
        Ok(Invocation::Root) => {
            let name = std::env::args_os()
                .next()
                .map_or_else(|| ".".to_string(), program_name);
            print!("{}", cli::usage(&name));
            ExitCode::SUCCESS
        }
        Ok(invocation) => match serde_json::to_string_pretty(&invocation) {
            Ok(json) => {
                println!("{json}");
                ExitCode::SUCCESS
            }
            Err(e) => {
                tracing::error!("{}", e);
                eprintln!("error: {e}");
                ExitCode::from(cmdroute::ExitCode::GeneralError as u8)
            }
        },
        Err(e) => {
            if let Some(usage) = e.usage() {
                print!("{usage}");
                return ExitCode::SUCCESS;
            }
            tracing::error!(code = e.error_code(), "{}", e);
            eprintln!("error: {e}");
            ExitCode::from(e.exit_code() as u8)
        }
    }
}
