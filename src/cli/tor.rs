//! `tor` command: options for checking whether quotes go through Tor.

use serde::Serialize;

use super::config::{DEFAULT_CONFIG_TYPE, QuotesConfig};
use crate::error::Result;
use crate::flags::{FlagSet, aliased_string_var, is_passed};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TorArgs {
    pub config: String,
    pub config_type: String,
    pub proxy: String,
}

#[must_use]
pub fn usage(name: &str) -> String {
    format!(
        r"Usage:
    {name} [options]

Checks if Tor network will be used to get the quotes.

To use the Tor network the proxy must be defined through:
    1. proxy argument parameter
    2. proxy config file parameter

Options:
    -c, --config      path    config file (default is $HOME/.quotes.toml)
        --config-type string  format of a config file without extension: TOML or JSON
    -p, --proxy       url     proxy to test the Tor network
"
    )
}

/// Parse the `tor` options.
///
/// # Errors
///
/// Flag-set errors (including [`crate::Error::Help`]) and config file errors.
pub fn execute(name: &str, arguments: &[String]) -> Result<TorArgs> {
    let mut args = TorArgs::default();

    let proxy_passed = {
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
        aliased_string_var(
            &mut fs,
            &mut args.proxy,
            "proxy,p",
            "",
            "proxy to test the Tor network",
        )?;
        fs.parse(arguments)?;
        is_passed(&fs, "proxy,p")
    };

    if !proxy_passed
        && let Some(QuotesConfig { proxy: Some(proxy), .. }) =
            QuotesConfig::discover(&args.config, &args.config_type)?
    {
        args.proxy = proxy;
    }

    tracing::debug!(?args, "tor options resolved");
    Ok(args)
}
