//! Process entry point.

use std::ffi::OsStr;
use std::path::Path;

use super::command::Command;
use crate::error::Result;

/// Base name of a program path, as used for the root command name.
///
/// `"/usr/local/bin/quotes"` gives `"quotes"`; an empty path gives `"."`.
/// Bytes that are not UTF-8 are replaced with U+FFFD.
#[must_use]
pub fn program_name(argv0: impl AsRef<OsStr>) -> String {
    Path::new(argv0.as_ref())
        .file_name()
        .map_or_else(|| ".".to_string(), |name| name.to_string_lossy().into_owned())
}

/// Resolve `root` against the arguments of the current process.
///
/// Arguments that are not valid UTF-8 are converted lossily rather than
/// aborting the process.
///
/// # Errors
///
/// Whatever [`Command::resolve`] returns.
pub fn run<T>(root: &Command<T>) -> Result<T> {
    run_from(
        root,
        std::env::args_os().map(|arg| arg.to_string_lossy().into_owned()),
    )
}

/// Resolve `root` against an explicit argument vector whose first element is
/// the program path.
///
/// # Errors
///
/// Whatever [`Command::resolve`] returns.
pub fn run_from<T, I, S>(root: &Command<T>, argv: I) -> Result<T>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut argv = argv.into_iter().map(Into::into);
    let name = program_name(argv.next().unwrap_or_default());
    let args: Vec<String> = argv.collect();
    root.resolve(&name, &args)
}
