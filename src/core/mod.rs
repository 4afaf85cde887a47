//! Command tree, alias sets, entry point and logging.

pub mod alias;
pub mod command;
pub mod dispatch;
pub mod logging;

pub use alias::{ALIAS_SEPARATOR, AliasSet, split_trim};
pub use command::{Command, FLAG_PREFIX, Handler, SubCommand};
pub use dispatch::{program_name, run, run_from};
