//! `sources` command.

use crate::error::Result;
use crate::flags::FlagSet;

/// Sources the quotes can be fetched from.
pub const KNOWN_SOURCES: [&str; 7] = [
    "borsaitaliana",
    "cryptonatorcom",
    "fondidocit",
    "fundsquarenet",
    "morningstarit",
    "investing",
    "yahoo",
];

#[must_use]
pub fn usage(name: &str) -> String {
    format!(
        r"Usage:
    {name}

Prints list of available sources.
"
    )
}

/// List the available sources.
///
/// # Errors
///
/// [`crate::Error::Help`] on `-h`, [`crate::Error::UnknownFlag`] on any
/// other flag.
pub fn execute(name: &str, arguments: &[String]) -> Result<Vec<String>> {
    let mut fs = FlagSet::new(name);
    fs.set_usage(usage);
    fs.parse(arguments)?;
    Ok(KNOWN_SOURCES.iter().map(ToString::to_string).collect())
}
