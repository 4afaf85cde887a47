//! `get` command: options for fetching quotes.

use serde::Serialize;

use super::config::{DEFAULT_CONFIG_TYPE, QuotesConfig};
use crate::error::{Error, Result};
use crate::flags::{
    FlagSet, aliased_bool_var, aliased_int_var, aliased_string_var, aliased_strings_var,
    is_passed,
};

pub const DEFAULT_WORKERS: i32 = 1;
pub const DEFAULT_MODE: &str = "1";
/// Accepted values of `--mode`.
pub const MODES: [&str; 3] = ["1", "U", "A"];

/// Options of the `get` command after merging the config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GetArgs {
    pub config: String,
    pub config_type: String,
    pub database: String,
    pub dry_run: bool,
    pub isins: Vec<String>,
    pub proxy: String,
    pub sources: Vec<String>,
    pub workers: i32,
    pub mode: String,
}

impl GetArgs {
    /// Options as they are with no flag and no config file.
    #[must_use]
    pub fn defaults() -> Self {
        Self {
            config_type: DEFAULT_CONFIG_TYPE.to_string(),
            workers: DEFAULT_WORKERS,
            mode: DEFAULT_MODE.to_string(),
            ..Self::default()
        }
    }
}

/// Flags given explicitly on the command line, among those the config file
/// can also set.
#[derive(Debug, Clone, Copy, Default)]
struct Passed {
    proxy: bool,
    workers: bool,
    database: bool,
    mode: bool,
    sources: bool,
    isins: bool,
}

#[must_use]
pub fn usage(name: &str) -> String {
    format!(
        r#"Usage:
    {name} [options]

Options:
    -c, --config      path     config file
        --config-type string   format of a config file without extension: TOML or JSON
    -d, --database    dsn      database used to save the quotes
    -i, --isins       strings  isins to get the quotes of
    -m, --mode        char     result mode: "1" first success or last error (default)
                                            "U" all errors until first success
                                            "A" all
    -n, --dry-run              trial run with no request or update made
    -p, --proxy       url      default proxy
    -s, --sources     strings  sources to get the quotes from
    -w, --workers     int      number of workers (default 1)
"#
    )
}

/// Parse the `get` options.
///
/// # Errors
///
/// Flag-set errors (including [`Error::Help`]), config file errors, and
/// [`Error::InvalidFlagValue`] for a bad mode or worker count.
pub fn execute(name: &str, arguments: &[String]) -> Result<GetArgs> {
    let mut args = GetArgs::default();

    let passed = {
        let mut fs = FlagSet::new(name);
        fs.set_usage(usage);
        aliased_string_var(&mut fs, &mut args.config, "config,c", "", "config file")?;
        aliased_string_var(
            &mut fs,
            &mut args.config_type,
            "config-type",
            DEFAULT_CONFIG_TYPE,
            "format of a config file without extension: TOML or JSON",
        )?;
        aliased_bool_var(
            &mut fs,
            &mut args.dry_run,
            "dry-run,n",
            false,
            "trial run with no request or update made",
        )?;
        aliased_string_var(&mut fs, &mut args.proxy, "proxy,p", "", "default proxy")?;
        aliased_int_var(
            &mut fs,
            &mut args.workers,
            "workers,w",
            DEFAULT_WORKERS,
            "number of workers",
        )?;
        aliased_string_var(
            &mut fs,
            &mut args.database,
            "database,d",
            "",
            "database used to save the quotes",
        )?;
        aliased_string_var(
            &mut fs,
            &mut args.mode,
            "mode,m",
            DEFAULT_MODE,
            "result mode: 1, U or A",
        )?;
        aliased_strings_var(&mut fs, &mut args.isins, "isins,i", "isins to get the quotes of")?;
        aliased_strings_var(
            &mut fs,
            &mut args.sources,
            "sources,s",
            "sources to get the quotes from",
        )?;

        fs.parse(arguments)?;

        Passed {
            proxy: is_passed(&fs, "proxy,p"),
            workers: is_passed(&fs, "workers,w"),
            database: is_passed(&fs, "database,d"),
            mode: is_passed(&fs, "mode,m"),
            sources: is_passed(&fs, "sources,s"),
            isins: is_passed(&fs, "isins,i"),
        }
    };

    if let Some(config) = QuotesConfig::discover(&args.config, &args.config_type)? {
        merge(&mut args, config, passed);
    }
    validate(name, &args)?;

    tracing::debug!(?args, "get options resolved");
    Ok(args)
}

fn merge(args: &mut GetArgs, config: QuotesConfig, passed: Passed) {
    if !passed.proxy
        && let Some(proxy) = config.proxy
    {
        args.proxy = proxy;
    }
    if !passed.workers
        && let Some(workers) = config.workers
    {
        args.workers = workers;
    }
    if !passed.database
        && let Some(database) = config.database
    {
        args.database = database;
    }
    if !passed.mode
        && let Some(mode) = config.mode
    {
        args.mode = mode;
    }
    if !passed.sources && !config.sources.is_empty() {
        args.sources = config.sources;
    }
    if !passed.isins && !config.isins.is_empty() {
        args.isins = config.isins;
    }
}

fn validate(name: &str, args: &GetArgs) -> Result<()> {
    if !MODES.contains(&args.mode.as_str()) {
        return Err(Error::InvalidFlagValue {
            command: name.to_string(),
            flag: "--mode".to_string(),
            value: args.mode.clone(),
            reason: "accepted values are 1, U and A".to_string(),
        });
    }
    if args.workers < 1 {
        return Err(Error::InvalidFlagValue {
            command: name.to_string(),
            flag: "--workers".to_string(),
            value: args.workers.to_string(),
            reason: "must be at least 1".to_string(),
        });
    }
    Ok(())
}
