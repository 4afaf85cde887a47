//! Single-level flag-set.
//!
//! [`FlagSet`] registers typed flags bound to caller-owned storage, then
//! parses an argument list with clap's builder API and writes the parsed
//! values back into that storage.
//!
//! Each logical flag is one entry with one storage slot. Alternate names
//! attached with [`FlagSet::alias`] resolve to the same entry, so repeated
//! occurrences under any of its names overwrite each other in command-line
//! order (lists append instead).
//!
//! # Command-line forms
//!
//! - any name, with one or two dashes: `-name value`, `--name value`,
//!   `-name=value`, `--name=value`
//! - booleans: `--flag` or `--flag=<bool>` (`true`, `false`, `1`, `0`, ...)
//! - `-h` / `--help` stop parsing with [`Error::Help`]
//! - the first non-flag argument, or `--`, ends flag parsing; what follows is
//!   available from [`FlagSet::args`]
//!
//! Single-dash arguments are never clustered: `-ab` is the flag `ab`, not
//! `-a -b`.

use std::collections::BTreeSet;
use std::fmt::Write as _;

use clap::builder::BoolishValueParser;
use clap::error::{ContextKind, ContextValue, ErrorKind as ClapErrorKind};
use clap::parser::ValueSource;
use clap::{Arg, ArgAction, ArgMatches, value_parser};
use tracing::trace;

use crate::core::alias::{ALIAS_SEPARATOR, split_trim};
use crate::error::{Error, Result};

/// Clap id of the trailing arguments. Starts with `-` so no flag can use it.
const REST_ID: &str = "-args";
const HELP_ID: &str = "-help";
const HELP_NAMES: [&str; 2] = ["help", "h"];

/// Caller-owned storage a flag writes into.
enum Slot<'a> {
    Text(&'a mut String),
    Int(&'a mut i32),
    Int64(&'a mut i64),
    Bool(&'a mut bool),
    Strings(&'a mut Vec<String>),
}

impl Slot<'_> {
    /// Type shown next to the flag name in the defaults listing.
    const fn type_name(&self) -> &'static str {
        match self {
            Self::Text(_) => "string",
            Self::Int(_) | Self::Int64(_) => "int",
            Self::Bool(_) => "",
            Self::Strings(_) => "value",
        }
    }
}

struct Flag<'a> {
    /// Primary name first.
    names: Vec<String>,
    /// Usage text, parallel to `names`.
    usages: Vec<String>,
    /// Default value as shown in the defaults listing.
    default: Option<String>,
    slot: Slot<'a>,
}

impl Flag<'_> {
    fn primary(&self) -> &str {
        &self.names[0]
    }

    /// Whether the flag reads the next argument when given without `=`.
    const fn takes_value(&self) -> bool {
        !matches!(self.slot, Slot::Bool(_))
    }

    /// Clap argument reached through `--<name>` for every name. Values
    /// always arrive attached with `=`, see [`FlagSet::normalize`].
    fn arg(&self) -> Arg {
        let primary = self.primary().to_string();
        let mut arg = Arg::new(primary.clone()).long(primary);
        for alias in &self.names[1..] {
            arg = arg.alias(alias.clone());
        }

        match self.slot {
            Slot::Text(_) => arg
                .action(ArgAction::Set)
                .value_parser(value_parser!(String)),
            Slot::Int(_) => arg.action(ArgAction::Set).value_parser(value_parser!(i32)),
            Slot::Int64(_) => arg.action(ArgAction::Set).value_parser(value_parser!(i64)),
            Slot::Bool(_) => arg
                .action(ArgAction::Set)
                .num_args(0..=1)
                .require_equals(true)
                .default_missing_value("true")
                .value_parser(BoolishValueParser::new()),
            Slot::Strings(_) => arg
                .action(ArgAction::Append)
                .value_parser(value_parser!(String)),
        }
    }

    /// Write the parsed value into the slot. Returns false when the flag was
    /// not on the command line.
    fn apply(&mut self, matches: &ArgMatches) -> bool {
        let id = self.names[0].as_str();
        if matches.value_source(id) != Some(ValueSource::CommandLine) {
            return false;
        }
        match &mut self.slot {
            Slot::Text(slot) => {
                if let Some(value) = matches.get_one::<String>(id) {
                    (**slot).clone_from(value);
                }
            }
            Slot::Int(slot) => {
                if let Some(value) = matches.get_one::<i32>(id) {
                    **slot = *value;
                }
            }
            Slot::Int64(slot) => {
                if let Some(value) = matches.get_one::<i64>(id) {
                    **slot = *value;
                }
            }
            Slot::Bool(slot) => {
                if let Some(value) = matches.get_one::<bool>(id) {
                    **slot = *value;
                }
            }
            Slot::Strings(slot) => {
                if let Some(values) = matches.get_many::<String>(id) {
                    for value in values {
                        slot.extend(split_trim(value, ALIAS_SEPARATOR));
                    }
                }
            }
        }
        true
    }
}

/// One flag occurrence as it was typed, kept to name it in error messages.
struct Occurrence {
    flag: usize,
    /// The argument up to `=`, e.g. `-c` or `--config`.
    shown: String,
    value: Option<String>,
}

/// Read-only view of a registered flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlagInfo<'f> {
    /// Primary name.
    pub name: &'f str,
    /// All names, primary first.
    pub names: &'f [String],
    /// Usage text of the primary name.
    pub usage: &'f str,
}

type UsageFn<'a> = Box<dyn Fn(&str) -> String + 'a>;

/// A set of flags bound to storage borrowed for `'a`.
pub struct FlagSet<'a> {
    name: String,
    flags: Vec<Flag<'a>>,
    usage: Option<UsageFn<'a>>,
    set: BTreeSet<usize>,
    args: Vec<String>,
    parsed: bool,
}

impl std::fmt::Debug for FlagSet<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FlagSet")
            .field("name", &self.name)
            .field("flags", &self.flags.iter().map(|fl| &fl.names).collect::<Vec<_>>())
            .field("parsed", &self.parsed)
            .finish_non_exhaustive()
    }
}

fn single_char(name: &str) -> Option<char> {
    let mut chars = name.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

/// Name as typed on the command line: `-x` or `--name`.
fn dashed(name: &str) -> String {
    if single_char(name).is_some() {
        format!("-{name}")
    } else {
        format!("--{name}")
    }
}

impl<'a> FlagSet<'a> {
    /// An empty flag-set. `name` is the full command name used in messages.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            flags: Vec::new(),
            usage: None,
            set: BTreeSet::new(),
            args: Vec::new(),
            parsed: false,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Replace the usage printer. It receives the flag-set name and returns
    /// the text carried by [`Error::Help`].
    pub fn set_usage<F>(&mut self, usage: F)
    where
        F: Fn(&str) -> String + 'a,
    {
        self.usage = Some(Box::new(usage));
    }

    /// Define a string flag and store `value` in `slot`.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidFlagName`] or [`Error::FlagRedefined`].
    pub fn string_var(
        &mut self,
        slot: &'a mut String,
        name: &str,
        value: &str,
        usage: &str,
    ) -> Result<()> {
        self.check_name(name)?;
        value.clone_into(slot);
        let default = (!value.is_empty()).then(|| format!("{value:?}"));
        self.define(name, usage, default, Slot::Text(slot));
        Ok(())
    }

    /// Define an `i32` flag and store `value` in `slot`.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidFlagName`] or [`Error::FlagRedefined`].
    pub fn int_var(
        &mut self,
        slot: &'a mut i32,
        name: &str,
        value: i32,
        usage: &str,
    ) -> Result<()> {
        self.check_name(name)?;
        *slot = value;
        let default = (value != 0).then(|| value.to_string());
        self.define(name, usage, default, Slot::Int(slot));
        Ok(())
    }

    /// Define an `i64` flag and store `value` in `slot`.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidFlagName`] or [`Error::FlagRedefined`].
    pub fn int64_var(
        &mut self,
        slot: &'a mut i64,
        name: &str,
        value: i64,
        usage: &str,
    ) -> Result<()> {
        self.check_name(name)?;
        *slot = value;
        let default = (value != 0).then(|| value.to_string());
        self.define(name, usage, default, Slot::Int64(slot));
        Ok(())
    }

    /// Define a boolean flag and store `value` in `slot`.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidFlagName`] or [`Error::FlagRedefined`].
    pub fn bool_var(
        &mut self,
        slot: &'a mut bool,
        name: &str,
        value: bool,
        usage: &str,
    ) -> Result<()> {
        self.check_name(name)?;
        *slot = value;
        let default = value.then(|| "true".to_string());
        self.define(name, usage, default, Slot::Bool(slot));
        Ok(())
    }

    /// Define a list flag. Each occurrence is split on commas; the pieces
    /// are trimmed, blanks dropped, and the rest appended to `slot`.
    ///
    /// `slot` is left as it is.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidFlagName`] or [`Error::FlagRedefined`].
    pub fn strings_var(
        &mut self,
        slot: &'a mut Vec<String>,
        name: &str,
        usage: &str,
    ) -> Result<()> {
        self.check_name(name)?;
        let default = (!slot.is_empty()).then(|| format!("[{}]", slot.join(", ")));
        self.define(name, usage, default, Slot::Strings(slot));
        Ok(())
    }

    /// Make `alias` another name of the flag already registered as
    /// `existing`.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidFlagName`] when `existing` is not registered or
    /// `alias` is malformed, [`Error::FlagRedefined`] when `alias` is taken.
    pub fn alias(&mut self, existing: &str, alias: &str, usage: &str) -> Result<()> {
        let Some(index) = self.position(existing) else {
            return Err(Error::InvalidFlagName {
                command: self.name.clone(),
                names: existing.to_string(),
            });
        };
        self.check_name(alias)?;
        let flag = &mut self.flags[index];
        flag.names.push(alias.to_string());
        flag.usages.push(usage.to_string());
        Ok(())
    }

    fn define(&mut self, name: &str, usage: &str, default: Option<String>, slot: Slot<'a>) {
        self.flags.push(Flag {
            names: vec![name.to_string()],
            usages: vec![usage.to_string()],
            default,
            slot,
        });
    }

    fn check_name(&self, name: &str) -> Result<()> {
        let malformed = name.is_empty()
            || name.starts_with('-')
            || name.contains('=')
            || name.contains(ALIAS_SEPARATOR)
            || name.chars().any(char::is_whitespace);
        if malformed {
            return Err(Error::InvalidFlagName {
                command: self.name.clone(),
                names: name.to_string(),
            });
        }
        if self.position(name).is_some() {
            return Err(Error::FlagRedefined {
                command: self.name.clone(),
                name: name.to_string(),
            });
        }
        Ok(())
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.flags
            .iter()
            .position(|flag| flag.names.iter().any(|n| n == name))
    }

    /// The flag registered under `name`, if any.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<FlagInfo<'_>> {
        self.position(name).map(|index| self.info(index))
    }

    fn info(&self, index: usize) -> FlagInfo<'_> {
        let flag = &self.flags[index];
        FlagInfo {
            name: flag.primary(),
            names: &flag.names,
            usage: &flag.usages[0],
        }
    }

    /// Call `f` for each flag set on the command line by the last parse, in
    /// registration order.
    pub fn visit<F>(&self, mut f: F)
    where
        F: FnMut(FlagInfo<'_>),
    {
        for &index in &self.set {
            f(self.info(index));
        }
    }

    /// Call `f` for every registered flag, in registration order.
    pub fn visit_all<F>(&self, mut f: F)
    where
        F: FnMut(FlagInfo<'_>),
    {
        for index in 0..self.flags.len() {
            f(self.info(index));
        }
    }

    /// Whether the flag named `name` was set on the command line.
    #[must_use]
    pub fn is_set(&self, name: &str) -> bool {
        self.position(name).is_some_and(|index| self.set.contains(&index))
    }

    /// Arguments left after flag parsing.
    #[must_use]
    pub fn args(&self) -> &[String] {
        &self.args
    }

    #[must_use]
    pub const fn parsed(&self) -> bool {
        self.parsed
    }

    /// One entry per registered name, sorted by name:
    ///
    /// ```text
    ///   --workers int
    ///     	number of workers (default 1)
    ///   -w int
    ///     	alias of "workers"
    /// ```
    #[must_use]
    pub fn defaults(&self) -> String {
        let mut entries: Vec<(&str, &Flag<'a>, usize)> = self
            .flags
            .iter()
            .flat_map(|flag| {
                flag.names
                    .iter()
                    .enumerate()
                    .map(move |(i, name)| (name.as_str(), flag, i))
            })
            .collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));

        let mut out = String::new();
        for (name, flag, i) in entries {
            let _ = write!(out, "  {}", dashed(name));
            let type_name = flag.slot.type_name();
            if !type_name.is_empty() {
                let _ = write!(out, " {type_name}");
            }
            let _ = write!(out, "\n    \t{}", flag.usages[i]);
            match &flag.default {
                Some(default) if i == 0 => {
                    let _ = write!(out, " (default {default})");
                }
                _ => {}
            }
            out.push('\n');
        }
        out
    }

    /// Usage text: the custom printer's output, or `Usage of <name>:`
    /// followed by [`FlagSet::defaults`].
    #[must_use]
    pub fn usage_text(&self) -> String {
        match &self.usage {
            Some(usage) => usage(&self.name),
            None => format!("Usage of {}:\n{}", self.name, self.defaults()),
        }
    }

    fn command(&self) -> clap::Command {
        let mut cmd = clap::Command::new(self.name.clone())
            .no_binary_name(true)
            .disable_help_flag(true)
            .disable_version_flag(true)
            .args_override_self(true);
        for flag in &self.flags {
            cmd = cmd.arg(flag.arg());
        }

        let mut free = HELP_NAMES.into_iter().filter(|name| self.is_help(name));
        if let Some(first) = free.next() {
            let mut help = Arg::new(HELP_ID).action(ArgAction::Help).long(first);
            for other in free {
                help = help.alias(other);
            }
            cmd = cmd.arg(help);
        }

        cmd.arg(
            Arg::new(REST_ID)
                .num_args(1..)
                .trailing_var_arg(true)
                .value_parser(value_parser!(String)),
        )
    }

    /// Parse `arguments`, which must not include the command name.
    ///
    /// Values are written into the bound slots only when the whole list
    /// parses.
    ///
    /// # Errors
    ///
    /// [`Error::Help`], [`Error::UnknownFlag`], [`Error::InvalidFlagValue`],
    /// [`Error::MissingFlagValue`] or [`Error::FlagParse`].
    pub fn parse(&mut self, arguments: &[String]) -> Result<()> {
        self.parsed = true;
        let (normalized, occurrences) = self.normalize(arguments)?;
        let matches = match self.command().try_get_matches_from(&normalized) {
            Ok(matches) => matches,
            Err(err) => {
                trace!(command = %self.name, kind = ?err.kind(), "flag parsing failed");
                return Err(self.convert_error(&err, &occurrences));
            }
        };

        self.set.clear();
        for (index, flag) in self.flags.iter_mut().enumerate() {
            if flag.apply(&matches) {
                self.set.insert(index);
            }
        }
        self.args = matches
            .get_many::<String>(REST_ID)
            .map(|values| values.cloned().collect())
            .unwrap_or_default();

        trace!(command = %self.name, set = self.set.len(), rest = self.args.len(), "flags parsed");
        Ok(())
    }

    /// `-h`/`--help` are help requests unless registered as flags.
    fn is_help(&self, name: &str) -> bool {
        HELP_NAMES.contains(&name) && self.position(name).is_none()
    }

    /// Rewrite the flag part of `arguments` as `--name` / `--name=value`,
    /// the only forms clap is given.
    ///
    /// Unknown names and value-taking flags left without a value are
    /// reported here, named as typed. A help request ends the scan; clap
    /// reports it after any error in the flags before it.
    fn normalize(&self, arguments: &[String]) -> Result<(Vec<String>, Vec<Occurrence>)> {
        let mut normalized = Vec::with_capacity(arguments.len());
        let mut occurrences = Vec::new();
        let mut index = 0;

        while let Some(arg) = arguments.get(index) {
            let body = arg
                .strip_prefix("--")
                .or_else(|| arg.strip_prefix('-'))
                .unwrap_or_default();
            // Non-flag, `-` or `--`: flags end here.
            if body.is_empty() {
                break;
            }
            let (name, inline) = match body.split_once('=') {
                Some((name, value)) => (name, Some(value)),
                None => (body, None),
            };
            if name.is_empty() || name.starts_with('-') {
                return Err(Error::FlagParse {
                    command: self.name.clone(),
                    message: format!("bad flag syntax: {arg}"),
                });
            }
            let shown = arg[..arg.len() - body.len() + name.len()].to_string();
            index += 1;

            if self.is_help(name) {
                normalized.push(format!("--{name}"));
                return Ok((normalized, occurrences));
            }
            let Some(flag) = self.position(name) else {
                return Err(Error::UnknownFlag {
                    command: self.name.clone(),
                    flag: shown,
                });
            };

            let value = match inline {
                Some(value) => Some(value.to_string()),
                None if self.flags[flag].takes_value() => {
                    let Some(value) = arguments.get(index) else {
                        return Err(Error::MissingFlagValue {
                            command: self.name.clone(),
                            flag: shown,
                        });
                    };
                    index += 1;
                    Some(value.clone())
                }
                None => None,
            };
            normalized.push(match &value {
                Some(value) => format!("--{name}={value}"),
                None => format!("--{name}"),
            });
            occurrences.push(Occurrence { flag, shown, value });
        }

        normalized.extend(arguments[index..].iter().cloned());
        Ok((normalized, occurrences))
    }

    fn convert_error(&self, err: &clap::Error, occurrences: &[Occurrence]) -> Error {
        let context = |kind| match err.get(kind) {
            Some(ContextValue::String(s)) => Some(s.clone()),
            _ => None,
        };
        let value = context(ContextKind::InvalidValue).unwrap_or_default();
        // clap names the canonical "--name=<name>"; report the occurrence as
        // typed instead.
        let canonical = context(ContextKind::InvalidArg)
            .and_then(|arg| {
                arg.split([' ', '='])
                    .next()
                    .map(|flag| flag.trim_start_matches('-').to_string())
            })
            .unwrap_or_default();
        let flag = occurrences
            .iter()
            .rev()
            .find(|o| {
                self.flags[o.flag].primary() == canonical
                    && o.value.as_deref().unwrap_or_default() == value
            })
            .map_or_else(|| dashed(&canonical), |o| o.shown.clone());
        let command = self.name.clone();

        match err.kind() {
            ClapErrorKind::DisplayHelp => Error::Help {
                usage: self.usage_text(),
            },
            ClapErrorKind::UnknownArgument => Error::UnknownFlag { command, flag },
            ClapErrorKind::InvalidValue
            | ClapErrorKind::ValueValidation
            | ClapErrorKind::NoEquals => {
                if err.kind() == ClapErrorKind::InvalidValue && value.is_empty() {
                    Error::MissingFlagValue { command, flag }
                } else {
                    let reason = std::error::Error::source(err).map_or_else(
                        || err.kind().as_str().unwrap_or("invalid value").to_string(),
                        ToString::to_string,
                    );
                    Error::InvalidFlagValue {
                        command,
                        flag,
                        value,
                        reason,
                    }
                }
            }
            other => Error::FlagParse {
                command,
                message: other.as_str().unwrap_or("invalid arguments").to_string(),
            },
        }
    }
}
