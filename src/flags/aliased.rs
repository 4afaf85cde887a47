//! Aliased flag registration.
//!
//! Each helper takes a comma-delimited list of names. The first name gets
//! the caller's usage text; every other name is attached to the same flag
//! with the usage `alias of "<primary>"`, so any of them sets the value and
//! the last one on the command line wins.
//!
//! ```
//! use cmdroute::flags::{FlagSet, aliased_int_var, is_passed};
//!
//! let mut workers = 0;
//! let mut fs = FlagSet::new("app get");
//! aliased_int_var(&mut fs, &mut workers, "workers,w", 1, "number of workers").unwrap();
//! fs.parse(&["-w".to_string(), "5".to_string()]).unwrap();
//! assert!(is_passed(&fs, "workers,w"));
//! drop(fs);
//! assert_eq!(workers, 5);
//! ```

use crate::core::alias::AliasSet;
use crate::error::{Error, Result};

use super::set::FlagSet;

/// Usage text given to every secondary alias.
#[must_use]
pub fn alias_usage(primary: &str) -> String {
    format!("alias of {primary:?}")
}

fn parse_names(fs: &FlagSet<'_>, names: &str) -> Result<AliasSet> {
    AliasSet::parse(names).ok_or_else(|| Error::InvalidFlagName {
        command: fs.name().to_string(),
        names: names.to_string(),
    })
}

fn attach_aliases(fs: &mut FlagSet<'_>, names: &AliasSet) -> Result<()> {
    let usage = alias_usage(names.primary());
    for alias in names.secondary() {
        fs.alias(names.primary(), alias, &usage)?;
    }
    Ok(())
}

/// Define a string flag under every name in `names`.
///
/// # Errors
///
/// [`Error::InvalidFlagName`] when `names` holds no name, or any
/// registration error of the flag-set.
pub fn aliased_string_var<'a>(
    fs: &mut FlagSet<'a>,
    slot: &'a mut String,
    names: &str,
    value: &str,
    usage: &str,
) -> Result<()> {
    let names = parse_names(fs, names)?;
    fs.string_var(slot, names.primary(), value, usage)?;
    attach_aliases(fs, &names)
}

/// Define an `i32` flag under every name in `names`.
///
/// # Errors
///
/// [`Error::InvalidFlagName`] when `names` holds no name, or any
/// registration error of the flag-set.
pub fn aliased_int_var<'a>(
    fs: &mut FlagSet<'a>,
    slot: &'a mut i32,
    names: &str,
    value: i32,
    usage: &str,
) -> Result<()> {
    let names = parse_names(fs, names)?;
    fs.int_var(slot, names.primary(), value, usage)?;
    attach_aliases(fs, &names)
}

/// Define an `i64` flag under every name in `names`.
///
/// # Errors
///
/// [`Error::InvalidFlagName`] when `names` holds no name, or any
/// registration error of the flag-set.
pub fn aliased_int64_var<'a>(
    fs: &mut FlagSet<'a>,
    slot: &'a mut i64,
    names: &str,
    value: i64,
    usage: &str,
) -> Result<()> {
    let names = parse_names(fs, names)?;
    fs.int64_var(slot, names.primary(), value, usage)?;
    attach_aliases(fs, &names)
}

/// Define a boolean flag under every name in `names`.
///
/// # Errors
///
/// [`Error::InvalidFlagName`] when `names` holds no name, or any
/// registration error of the flag-set.
pub fn aliased_bool_var<'a>(
    fs: &mut FlagSet<'a>,
    slot: &'a mut bool,
    names: &str,
    value: bool,
    usage: &str,
) -> Result<()> {
    let names = parse_names(fs, names)?;
    fs.bool_var(slot, names.primary(), value, usage)?;
    attach_aliases(fs, &names)
}

/// Define a list flag under every name in `names`.
///
/// There is no default: values parsed from every occurrence of every alias
/// are appended to `slot` in command-line order, each occurrence split on
/// commas.
///
/// # Errors
///
/// [`Error::InvalidFlagName`] when `names` holds no name, or any
/// registration error of the flag-set.
pub fn aliased_strings_var<'a>(
    fs: &mut FlagSet<'a>,
    slot: &'a mut Vec<String>,
    names: &str,
    usage: &str,
) -> Result<()> {
    let names = parse_names(fs, names)?;
    fs.strings_var(slot, names.primary(), usage)?;
    attach_aliases(fs, &names)
}

/// Whether any of the comma-delimited `names` was set on the command line.
///
/// Distinguishes a value explicitly given, even if equal to the default,
/// from the default itself.
#[must_use]
pub fn is_passed(fs: &FlagSet<'_>, names: &str) -> bool {
    let Some(names) = AliasSet::parse(names) else {
        return false;
    };
    let mut found = false;
    fs.visit(|flag| {
        if flag.names.iter().any(|n| names.contains(n)) {
            found = true;
        }
    });
    found
}
