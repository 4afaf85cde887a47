//! Error types for cmdroute.
//!
//! Uses `thiserror` for structured error types that map to exit codes.
//!
//! ## Error Taxonomy
//!
//! Errors are categorized into four categories:
//! - **Routing**: the command tree could not route the argument vector
//! - **Flag**: a handler's flag-set rejected its arguments (including help)
//! - **Configuration**: a config file could not be read or decoded
//! - **Internal**: I/O failures and errors raised by handlers
//!
//! Each error has a stable error code (e.g., `CMDR-R001`) for programmatic
//! handling, and an [`ErrorKind`] for identity checks that survive the
//! command-name context carried in the message.

use thiserror::Error;

// =============================================================================
// Error Categories
// =============================================================================

/// High-level error categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Command tree routing failures.
    Routing,
    /// Flag registration and parsing failures.
    Flag,
    /// Configuration file failures.
    Configuration,
    /// I/O and handler errors.
    Internal,
}

impl ErrorCategory {
    /// Returns a human-readable description of the category.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Routing => "Routing error",
            Self::Flag => "Flag error",
            Self::Configuration => "Configuration error",
            Self::Internal => "Internal error",
        }
    }

    /// Returns a short code prefix for this category.
    #[must_use]
    pub const fn code_prefix(&self) -> &'static str {
        match self {
            Self::Routing => "R",
            Self::Flag => "F",
            Self::Configuration => "C",
            Self::Internal => "X",
        }
    }
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description())
    }
}

// =============================================================================
// Exit Codes
// =============================================================================

/// Process exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Success, or help was requested
    Success = 0,
    /// Unexpected failure
    GeneralError = 1,
    /// Bad command line: unknown command, unknown flag, bad value
    UsageError = 2,
    /// Config file missing or malformed
    ConfigError = 3,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code as Self
    }
}

// =============================================================================
// Error Kinds
// =============================================================================

/// Identity of an [`Error`] without its context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidCommandName,
    NoExecFunc,
    CommandNotFound,
    DuplicateCommandName,
    Help,
    UnknownFlag,
    InvalidFlagValue,
    MissingFlagValue,
    FlagRedefined,
    InvalidFlagName,
    FlagParse,
    Config,
    Io,
    Other,
}

/// Main error type for cmdroute operations.
#[derive(Error, Debug)]
pub enum Error {
    // ==========================================================================
    // Routing errors (Category: Routing)
    // ==========================================================================
    /// A sub-command key holds no usable name.
    #[error("{command}: invalid command name {name:?}")]
    InvalidCommandName { command: String, name: String },

    /// Routing ended on a node without a handler.
    #[error("{command}: exec function undefined")]
    NoExecFunc { command: String },

    /// No sub-command answers to the requested name.
    #[error("{command}: command not found {name:?}")]
    CommandNotFound { command: String, name: String },

    /// Two sibling sub-commands share a name.
    #[error("{command}: duplicate command name {name:?}")]
    DuplicateCommandName { command: String, name: String },

    // ==========================================================================
    // Flag errors (Category: Flag)
    // ==========================================================================
    /// `-h` or `--help` was given. `usage` holds the rendered usage text.
    #[error("flag: help requested")]
    Help { usage: String },

    /// A flag that was never registered.
    #[error("{command}: flag provided but not defined: {flag}")]
    UnknownFlag { command: String, flag: String },

    /// A flag value that does not parse as the flag's type, or that a
    /// handler rejected after parsing.
    #[error("{command}: invalid value {value:?} for flag {flag}: {reason}")]
    InvalidFlagValue {
        command: String,
        flag: String,
        value: String,
        reason: String,
    },

    /// A value-taking flag was last on the command line.
    #[error("{command}: flag needs an argument: {flag}")]
    MissingFlagValue { command: String, flag: String },

    /// A flag name registered twice on one flag-set.
    #[error("{command}: flag redefined: {name}")]
    FlagRedefined { command: String, name: String },

    /// A flag name that is empty or malformed.
    #[error("{command}: invalid flag name {names:?}")]
    InvalidFlagName { command: String, names: String },

    /// Any other rejection from the flag parser.
    #[error("{command}: {message}")]
    FlagParse { command: String, message: String },

    // ==========================================================================
    // Configuration errors (Category: Configuration)
    // ==========================================================================
    /// Config file could not be loaded.
    #[error("config error at {path}: {message}")]
    Config { path: String, message: String },

    // ==========================================================================
    // Internal errors (Category: Internal)
    // ==========================================================================
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Catch-all for handler errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for cmdroute operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Identity of this error, independent of the command name it carries.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidCommandName { .. } => ErrorKind::InvalidCommandName,
            Self::NoExecFunc { .. } => ErrorKind::NoExecFunc,
            Self::CommandNotFound { .. } => ErrorKind::CommandNotFound,
            Self::DuplicateCommandName { .. } => ErrorKind::DuplicateCommandName,
            Self::Help { .. } => ErrorKind::Help,
            Self::UnknownFlag { .. } => ErrorKind::UnknownFlag,
            Self::InvalidFlagValue { .. } => ErrorKind::InvalidFlagValue,
            Self::MissingFlagValue { .. } => ErrorKind::MissingFlagValue,
            Self::FlagRedefined { .. } => ErrorKind::FlagRedefined,
            Self::InvalidFlagName { .. } => ErrorKind::InvalidFlagName,
            Self::FlagParse { .. } => ErrorKind::FlagParse,
            Self::Config { .. } => ErrorKind::Config,
            Self::Io(_) => ErrorKind::Io,
            Self::Other(_) => ErrorKind::Other,
        }
    }

    /// True when the flag parser stopped because help was requested.
    #[must_use]
    pub const fn is_help(&self) -> bool {
        matches!(self, Self::Help { .. })
    }

    /// Usage text attached to a help request.
    #[must_use]
    pub fn usage(&self) -> Option<&str> {
        match self {
            Self::Help { usage } => Some(usage),
            _ => None,
        }
    }

    /// Full command name the error was raised under, when known.
    #[must_use]
    pub fn command(&self) -> Option<&str> {
        match self {
            Self::InvalidCommandName { command, .. }
            | Self::NoExecFunc { command }
            | Self::CommandNotFound { command, .. }
            | Self::DuplicateCommandName { command, .. }
            | Self::UnknownFlag { command, .. }
            | Self::InvalidFlagValue { command, .. }
            | Self::MissingFlagValue { command, .. }
            | Self::FlagRedefined { command, .. }
            | Self::InvalidFlagName { command, .. }
            | Self::FlagParse { command, .. } => Some(command),
            Self::Help { .. } | Self::Config { .. } | Self::Io(_) | Self::Other(_) => None,
        }
    }

    /// Returns the error category.
    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidCommandName { .. }
            | Self::NoExecFunc { .. }
            | Self::CommandNotFound { .. }
            | Self::DuplicateCommandName { .. } => ErrorCategory::Routing,

            Self::Help { .. }
            | Self::UnknownFlag { .. }
            | Self::InvalidFlagValue { .. }
            | Self::MissingFlagValue { .. }
            | Self::FlagRedefined { .. }
            | Self::InvalidFlagName { .. }
            | Self::FlagParse { .. } => ErrorCategory::Flag,

            Self::Config { .. } => ErrorCategory::Configuration,

            Self::Io(_) | Self::Other(_) => ErrorCategory::Internal,
        }
    }

    /// Stable error code, e.g. `CMDR-R003`.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidCommandName { .. } => "CMDR-R001",
            Self::NoExecFunc { .. } => "CMDR-R002",
            Self::CommandNotFound { .. } => "CMDR-R003",
            Self::DuplicateCommandName { .. } => "CMDR-R004",
            Self::Help { .. } => "CMDR-F001",
            Self::UnknownFlag { .. } => "CMDR-F002",
            Self::InvalidFlagValue { .. } => "CMDR-F003",
            Self::MissingFlagValue { .. } => "CMDR-F004",
            Self::FlagRedefined { .. } => "CMDR-F005",
            Self::InvalidFlagName { .. } => "CMDR-F006",
            Self::FlagParse { .. } => "CMDR-F007",
            Self::Config { .. } => "CMDR-C001",
            Self::Io(_) => "CMDR-X001",
            Self::Other(_) => "CMDR-X002",
        }
    }

    /// Map error to process exit code.
    ///
    /// Registration mistakes (`FlagRedefined`, `InvalidFlagName`,
    /// `InvalidCommandName`, `DuplicateCommandName`, `NoExecFunc`) are bugs in
    /// the host program and map to a general error rather than a usage error.
    #[must_use]
    pub const fn exit_code(&self) -> ExitCode {
        match self {
            Self::Help { .. } => ExitCode::Success,

            Self::CommandNotFound { .. }
            | Self::UnknownFlag { .. }
            | Self::InvalidFlagValue { .. }
            | Self::MissingFlagValue { .. }
            | Self::FlagParse { .. } => ExitCode::UsageError,

            Self::Config { .. } => ExitCode::ConfigError,

            Self::InvalidCommandName { .. }
            | Self::NoExecFunc { .. }
            | Self::DuplicateCommandName { .. }
            | Self::FlagRedefined { .. }
            | Self::InvalidFlagName { .. }
            | Self::Io(_)
            | Self::Other(_) => ExitCode::GeneralError,
        }
    }
}
