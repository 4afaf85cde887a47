//! cmdroute - command tree routing and aliased flags
//!
//! A root [`Command`] owns named children; [`run`] walks the tree using the
//! leading non-flag arguments and hands the rest to the handler of the node
//! it stops on. Handlers parse their own flags with [`flags::FlagSet`], where
//! the `aliased_*` helpers register one flag under several names.
//!
//! ```
//! use cmdroute::{Command, run_from};
//!
//! let root: Command<String> = Command::new()
//!     .subcommand("get,g", Command::new().handler(|name, args| Ok(format!("{name} {args:?}"))));
//! let out = run_from(&root, ["/bin/quotes", "g", "-h"]).unwrap();
//! assert_eq!(out, r#"quotes get ["-h"]"#);
//! ```

// Note: deny (not forbid) to allow #[allow(unsafe_code)] in test helpers for env var manipulation
#![deny(unsafe_code)]
#![warn(clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod core;
pub mod error;
pub mod flags;

/// Test utilities module - included in test builds or when test-utils feature is enabled.
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use crate::core::{AliasSet, Command, SubCommand, run, run_from};
pub use error::{Error, ErrorCategory, ErrorKind, ExitCode, Result};
pub use flags::{
    FlagSet, aliased_bool_var, aliased_int64_var, aliased_int_var, aliased_string_var,
    aliased_strings_var, is_passed,
};
