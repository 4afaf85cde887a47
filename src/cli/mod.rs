//! The `quotes` demo application.
//!
//! A root command with three children, each parsing its own flags with the
//! aliased helpers and returning what it parsed as an [`Invocation`].

pub mod config;
pub mod get;
pub mod sources;
pub mod tor;

use serde::Serialize;

use crate::core::command::Command;
use crate::flags::FlagSet;

pub use config::{ConfigType, QuotesConfig};
pub use get::GetArgs;
pub use tor::TorArgs;

/// Outcome of one `quotes` invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum Invocation {
    /// No sub-command given.
    Root,
    Get(GetArgs),
    Tor(TorArgs),
    Sources { sources: Vec<String> },
}

#[must_use]
pub fn usage(name: &str) -> String {
    format!(
        r"Usage:
    {name} <command> [options]

Available commands:
    get      Get the quotes of the specified isins
    sources  Show available sources
    tor      Checks if Tor network will be used
"
    )
}

/// Build the `quotes` command tree.
#[must_use]
pub fn app() -> Command<Invocation> {
    Command::new()
        .handler(|name, arguments| {
            let mut fs = FlagSet::new(name);
            fs.set_usage(usage);
            fs.parse(arguments)?;
            Ok(Invocation::Root)
        })
        .subcommand(
            "get,g",
            Command::new()
                .handler(|name, arguments| get::execute(name, arguments).map(Invocation::Get)),
        )
        .subcommand(
            "tor,t",
            Command::new()
                .handler(|name, arguments| tor::execute(name, arguments).map(Invocation::Tor)),
        )
        .subcommand(
            "sources,s",
            Command::new().handler(|name, arguments| {
                sources::execute(name, arguments).map(|sources| Invocation::Sources { sources })
            }),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tree_is_valid() {
        app().validate("quotes").unwrap();
    }

    #[test]
    fn invocation_serializes_with_command_tag() {
        let json = serde_json::to_value(Invocation::Sources {
            sources: vec!["yahoo".to_string()],
        })
        .unwrap();
        assert_eq!(json["command"], "sources");
        assert_eq!(json["sources"][0], "yahoo");

        let json = serde_json::to_value(Invocation::Tor(TorArgs::default())).unwrap();
        assert_eq!(json["command"], "tor");
        assert_eq!(json["proxy"], "");
    }
}
