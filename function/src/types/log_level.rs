//! Per-invocation log verbosity

use strum::{Display, EnumString};
use tracing::{level_filters::LevelFilter, Level};

/// Log verbosity accepted by `S3_HTTP_LOG_LEVEL`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum LogLevel {
    /// Everything, including key resolution decisions
    Debug,
    /// Client state and errors
    #[default]
    Info,
    /// Warnings and errors
    Warn,
    /// Errors only
    Error,
    /// Only process-fatal events, of which the function has none
    Fatal,
}

impl LogLevel {
    /// Parses a configured level, falling back to `info` for anything unrecognized
    #[must_use]
    pub fn parse_or_default(value: &str) -> Self {
        value.parse().unwrap_or_default()
    }

    /// Most verbose level this setting lets through
    #[must_use]
    pub const fn level_filter(self) -> LevelFilter {
        match self {
            Self::Debug => LevelFilter::DEBUG,
            Self::Info => LevelFilter::INFO,
            Self::Warn => LevelFilter::WARN,
            Self::Error => LevelFilter::ERROR,
            Self::Fatal => LevelFilter::OFF,
        }
    }
}

/// Logging context threaded through a single invocation.
///
/// Each invocation builds its own from the configuration it resolved, so
/// concurrent invocations with different `S3_HTTP_LOG_LEVEL` values never
/// affect each other. The process-wide subscriber filter still applies on top.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvocationLog {
    filter: LevelFilter,
}

impl InvocationLog {
    /// Creates a logging context for the given verbosity
    #[must_use]
    pub const fn new(level: LogLevel) -> Self {
        Self {
            filter: level.level_filter(),
        }
    }

    /// Whether events at `level` should be emitted for this invocation
    #[must_use]
    pub fn enabled(&self, level: Level) -> bool {
        self.filter >= level
    }
}
