//! Flag registration and parsing.
//!
//! - [`set`]: the single-level [`FlagSet`] bound to caller-owned storage
//! - [`aliased`]: helpers that register one flag under several names

pub mod aliased;
pub mod set;

pub use aliased::{
    alias_usage, aliased_bool_var, aliased_int64_var, aliased_int_var, aliased_string_var,
    aliased_strings_var, is_passed,
};
pub use set::{FlagInfo, FlagSet};
