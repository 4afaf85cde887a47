//! Test utilities for cmdroute.
//!
//! Shared helpers for building argument vectors, sample command trees and
//! temporary config files.
//!
//! # Usage
//!
//! ```rust,ignore
//! use cmdroute::test_utils::*;
//!
//! let tree = make_test_tree();
//! let dir = TestDir::new();
//! let config = dir.create_file("quotes.toml", &make_test_config_toml());
//! ```

use std::fs;
use std::io::Write as IoWrite;
use std::path::{Path, PathBuf};

use crate::core::alias::split_trim;
use crate::core::command::Command;

// =============================================================================
// Argument Helpers
// =============================================================================

/// Split a command line on spaces, dropping empty tokens.
///
/// `argv("get -w 5")` gives `["get", "-w", "5"]`.
#[must_use]
pub fn argv(line: &str) -> Vec<String> {
    split_trim(line, " ")
}

/// A full process argument vector: `program` followed by `argv(line)`.
#[must_use]
pub fn process_argv(program: &str, line: &str) -> Vec<String> {
    std::iter::once(program.to_string()).chain(argv(line)).collect()
}

// =============================================================================
// Command Tree Factories
// =============================================================================

/// Handler that echoes its full name and arguments as `"<name>|a,b,c"`.
pub fn echo(name: &str, args: &[String]) -> crate::Result<String> {
    Ok(format!("{name}|{}", args.join(",")))
}

/// A two-level tree with echo handlers:
///
/// ```text
/// root
/// ├── get,g
/// ├── tor,t
/// └── cmd0,c0 (no handler)
///     └── cmd1,c1
/// ```
#[must_use]
pub fn make_test_tree() -> Command<String> {
    Command::new()
        .handler(echo)
        .subcommand("get,g", Command::new().handler(echo))
        .subcommand("tor,t", Command::new().handler(echo))
        .subcommand(
            "cmd0,c0",
            Command::new().subcommand("cmd1,c1", Command::new().handler(echo)),
        )
}

// =============================================================================
// Config Fixtures
// =============================================================================

/// TOML config for the `quotes` demo.
#[must_use]
pub fn make_test_config_toml() -> String {
    r#"proxy = "socks5://127.0.0.1:9050"
workers = 4
mode = "U"
sources = ["yahoo", "investing"]
"#
    .to_string()
}

/// JSON config for the `quotes` demo.
#[must_use]
pub fn make_test_config_json() -> String {
    r#"{"database": "/var/lib/quotes.db", "workers": 2, "isins": ["IE00B4L5Y983"]}"#.to_string()
}

// =============================================================================
// Temp Directory Utilities
// =============================================================================

/// A temporary directory for tests with automatic cleanup.
///
/// ```rust,ignore
/// use cmdroute::test_utils::TestDir;
///
/// let dir = TestDir::new();
/// let path = dir.create_file("quotes.toml", "workers = 3");
/// assert!(path.exists());
/// ```
pub struct TestDir {
    inner: tempfile::TempDir,
}

impl TestDir {
    /// Create a new isolated temporary directory.
    ///
    /// # Panics
    ///
    /// Panics if the temporary directory cannot be created.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: tempfile::tempdir().expect("Failed to create temp directory"),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        self.inner.path()
    }

    /// Create a file with the given content and return its full path.
    ///
    /// # Panics
    ///
    /// Panics if the file cannot be created or written.
    pub fn create_file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.inner.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        let mut file = fs::File::create(&path).expect("Failed to create test file");
        file.write_all(content.as_bytes())
            .expect("Failed to write test file");
        path
    }

    #[must_use]
    pub fn file_path(&self, name: &str) -> PathBuf {
        self.inner.path().join(name)
    }
}

impl Default for TestDir {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Assertion Macros
// =============================================================================

/// Assert that a string contains a substring.
#[macro_export]
macro_rules! assert_contains {
    ($haystack:expr, $needle:expr) => {
        let haystack = $haystack;
        let needle = $needle;
        assert!(
            haystack.contains(needle),
            "Expected string to contain {:?}\n\nActual string:\n{:?}",
            needle,
            haystack
        );
    };
}

/// Assert that a result is an error of the given [`crate::ErrorKind`].
#[macro_export]
macro_rules! assert_error_kind {
    ($result:expr, $kind:expr) => {
        match $result {
            Ok(value) => panic!("Expected {:?} error, got Ok({:?})", $kind, value),
            Err(err) => assert_eq!(err.kind(), $kind, "unexpected error: {err}"),
        }
    };
}
