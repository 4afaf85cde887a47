//! Logging setup for hosts built on cmdroute.
//!
//! The library only emits `tracing` events; a host program calls [`init`]
//! once at startup to route them to stderr or a file.

use std::fs::OpenOptions;
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;

pub const LOG_LEVEL_ENV: &str = "CMDROUTE_LOG";
pub const LOG_FORMAT_ENV: &str = "CMDROUTE_LOG_FORMAT";
pub const LOG_FILE_ENV: &str = "CMDROUTE_LOG_FILE";
pub const VERBOSE_ENV: &str = "CMDROUTE_VERBOSE";

/// Targets enabled by the default filter: the library and the demo binary.
const DEFAULT_TARGETS: [&str; 2] = ["cmdroute", "quotes"];

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable logs.
    #[default]
    Human,
    /// JSON logs (one event per line).
    Json,
    /// Compact logs (single line, terse).
    Compact,
}

impl LogFormat {
    /// Parse from string (case-insensitive).
    #[must_use]
    pub fn from_arg(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "human" => Some(Self::Human),
            "json" => Some(Self::Json),
            "compact" => Some(Self::Compact),
            _ => None,
        }
    }
}

/// Log verbosity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    #[default]
    Warn,
    Error,
}

impl LogLevel {
    #[must_use]
    pub fn from_arg(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "trace" => Some(Self::Trace),
            "verbose" | "debug" => Some(Self::Debug),
            "info" => Some(Self::Info),
            "warn" | "warning" => Some(Self::Warn),
            "error" => Some(Self::Error),
            _ => None,
        }
    }

    /// Convert to tracing filter string.
    #[must_use]
    pub const fn as_filter(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }

    #[must_use]
    pub const fn as_tracing_level(self) -> Level {
        match self {
            Self::Trace => Level::TRACE,
            Self::Debug => Level::DEBUG,
            Self::Info => Level::INFO,
            Self::Warn => Level::WARN,
            Self::Error => Level::ERROR,
        }
    }
}

/// Trimmed, non-empty value of an environment variable.
fn env_value(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Parse log level from `CMDROUTE_LOG`.
#[must_use]
pub fn parse_log_level_from_env() -> Option<LogLevel> {
    env_value(LOG_LEVEL_ENV).and_then(|v| LogLevel::from_arg(&v))
}

/// Parse log format from `CMDROUTE_LOG_FORMAT`.
#[must_use]
pub fn parse_log_format_from_env() -> Option<LogFormat> {
    env_value(LOG_FORMAT_ENV).and_then(|v| LogFormat::from_arg(&v))
}

/// Parse log file path from `CMDROUTE_LOG_FILE`.
#[must_use]
pub fn parse_log_file_from_env() -> Option<PathBuf> {
    env_value(LOG_FILE_ENV).map(PathBuf::from)
}

/// Whether `CMDROUTE_VERBOSE` is set to `1`, `true`, `yes` or `on`.
#[must_use]
pub fn parse_verbose_from_env() -> bool {
    env_value(VERBOSE_ENV).is_some_and(|v| {
        matches!(v.to_lowercase().as_str(), "1" | "true" | "yes" | "on")
    })
}

/// Filter directives used when `RUST_LOG` is not set.
#[must_use]
pub fn default_filter(level: LogLevel) -> String {
    DEFAULT_TARGETS
        .iter()
        .map(|target| format!("{target}={}", level.as_filter()))
        .collect::<Vec<_>>()
        .join(",")
}

/// Initialize logging from the environment alone.
pub fn init_from_env() {
    init(
        parse_log_level_from_env().unwrap_or_default(),
        parse_log_format_from_env().unwrap_or_default(),
        parse_log_file_from_env(),
        parse_verbose_from_env(),
    );
}

/// Initialize logging with the given settings.
///
/// `verbose` raises `level` to at least debug. `RUST_LOG`, when set,
/// overrides both. Calling this twice is harmless: the second subscriber is
/// ignored.
pub fn init(level: LogLevel, format: LogFormat, log_file: Option<PathBuf>, verbose: bool) {
    let level = if verbose && matches!(level, LogLevel::Info | LogLevel::Warn | LogLevel::Error) {
        LogLevel::Debug
    } else {
        level
    };

    let file = log_file.and_then(|path| {
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .ok()
    });

    let writer = match file {
        Some(file) => BoxMakeWriter::new(file),
        None => BoxMakeWriter::new(std::io::stderr),
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(level)));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer);

    match format {
        LogFormat::Json => {
            builder.json().try_init().ok();
        }
        LogFormat::Compact => {
            builder.compact().with_target(true).try_init().ok();
        }
        LogFormat::Human => {
            builder.with_target(false).without_time().try_init().ok();
        }
    }
}
