//! Fixtures for the `quotes` demo and sample command trees.
#![allow(dead_code)]

use cmdroute::cli::{self, Invocation};
use cmdroute::test_utils::{TestDir, process_argv};
use cmdroute::{Result, run_from};

/// Program name used when driving the app in-process.
pub const APP_NAME: &str = "QUOTES";

/// Run the `quotes` app on `line`, as if invoked as `QUOTES <line>`.
pub fn run_quotes(line: &str) -> Result<Invocation> {
    run_from(&cli::app(), process_argv(APP_NAME, line))
}

/// A temp dir holding `quotes.toml`, `quotes.json` and an extension-less
/// `quotes` file with JSON content.
pub fn config_dir() -> TestDir {
    let dir = TestDir::new();
    dir.create_file("quotes.toml", &cmdroute::test_utils::make_test_config_toml());
    dir.create_file("quotes.json", &cmdroute::test_utils::make_test_config_json());
    dir.create_file("quotes", &cmdroute::test_utils::make_test_config_json());
    dir
}

/// Path of `name` in `dir` as a string argument.
pub fn path_arg(dir: &TestDir, name: &str) -> String {
    dir.file_path(name).display().to_string()
}
