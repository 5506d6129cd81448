//! Logging utilities
//!
//! Installs the `tracing` subscriber and bridges the telephony engine's log
//! stream into it. Engine messages are filtered by a level mask that depends
//! on the debug preference; application messages always go through, except
//! debug messages while debug logging is off.

use std::fs::OpenOptions;
use std::sync::Mutex;

use thiserror::Error;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::shared::config::LoggingConfig;

/// Logging setup error
#[derive(Error, Debug)]
pub enum LoggingError {
    /// Log file could not be opened
    #[error("Cannot open log file: {0}")]
    Io(#[from] std::io::Error),

    /// A global subscriber is already installed
    #[error("Cannot install subscriber: {0}")]
    Init(String),
}

/// Install the global `tracing` subscriber.
///
/// RUST_LOG takes precedence over the configured filter.
pub fn init(config: &LoggingConfig) -> Result<(), LoggingError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.default_filter()));

    let (file_layer, stderr_layer) = match &config.log_file {
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            let layer = fmt::layer().with_writer(Mutex::new(file)).with_ansi(false);
            (Some(layer), None)
        }
        None => (None, Some(fmt::layer().with_writer(std::io::stderr))),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(stderr_layer)
        .try_init()
        .map_err(|e| LoggingError::Init(e.to_string()))
}

/// Severity of an engine log message, with the engine's bit values
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EngineLogLevel {
    Debug = 1,
    Trace = 2,
    Message = 4,
    Warning = 8,
    Error = 16,
    Fatal = 32,
}

impl EngineLogLevel {
    pub const ALL: [EngineLogLevel; 6] = [
        EngineLogLevel::Debug,
        EngineLogLevel::Trace,
        EngineLogLevel::Message,
        EngineLogLevel::Warning,
        EngineLogLevel::Error,
        EngineLogLevel::Fatal,
    ];

    /// Engine bit value
    pub fn bits(self) -> u32 {
        self as u32
    }

    /// Name used in formatted lines
    pub fn label(self) -> &'static str {
        match self {
            EngineLogLevel::Debug => "Debug",
            EngineLogLevel::Trace => "Trace",
            EngineLogLevel::Message => "Message",
            EngineLogLevel::Warning => "Warning",
            EngineLogLevel::Error => "Error",
            EngineLogLevel::Fatal => "Fatal",
        }
    }

    /// Matching `tracing` level
    pub fn tracing_level(self) -> tracing::Level {
        match self {
            EngineLogLevel::Debug => tracing::Level::DEBUG,
            EngineLogLevel::Trace | EngineLogLevel::Message => tracing::Level::INFO,
            EngineLogLevel::Warning => tracing::Level::WARN,
            EngineLogLevel::Error | EngineLogLevel::Fatal => tracing::Level::ERROR,
        }
    }
}

/// Set of engine levels that are forwarded
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LogMask(u32);

impl LogMask {
    /// Everything with debug on; Fatal, Error and Warning otherwise
    pub fn for_debug(debug_enabled: bool) -> Self {
        let levels: &[EngineLogLevel] = if debug_enabled {
            &EngineLogLevel::ALL
        } else {
            &[
                EngineLogLevel::Fatal,
                EngineLogLevel::Error,
                EngineLogLevel::Warning,
            ]
        };
        LogMask(levels.iter().fold(0, |mask, level| mask | level.bits()))
    }

    /// Raw mask, as handed to the engine
    pub fn bits(self) -> u32 {
        self.0
    }

    /// Whether messages of `level` pass
    pub fn contains(self, level: EngineLogLevel) -> bool {
        self.0 & level.bits() != 0
    }
}

/// Forwards engine and application messages to `tracing`
#[derive(Clone, Debug)]
pub struct EngineLogBridge {
    domain: String,
    debug_enabled: bool,
    mask: LogMask,
}

impl EngineLogBridge {
    /// Create a bridge for the given application domain
    pub fn new(domain: impl Into<String>, debug_enabled: bool) -> Self {
        Self {
            domain: domain.into(),
            debug_enabled,
            mask: LogMask::for_debug(debug_enabled),
        }
    }

    /// Create a bridge from logging preferences
    pub fn from_config(config: &LoggingConfig) -> Self {
        Self::new(config.domain.clone(), config.debug)
    }

    /// Application domain
    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Current mask
    pub fn mask(&self) -> LogMask {
        self.mask
    }

    /// Whether debug logging is on
    pub fn debug_enabled(&self) -> bool {
        self.debug_enabled
    }

    /// Toggle debug logging and recompute the mask
    pub fn set_debug_enabled(&mut self, enabled: bool) {
        self.debug_enabled = enabled;
        self.mask = LogMask::for_debug(enabled);
    }

    /// Render a line as `[domain][Level] message`
    pub fn format_line(domain: &str, level: EngineLogLevel, message: &str) -> String {
        format!("[{}][{}] {}", domain, level.label(), message)
    }

    /// Engine callback. Returns whether the message was forwarded.
    pub fn on_log_message_written(&self, domain: &str, level: EngineLogLevel, message: &str) -> bool {
        if !self.mask.contains(level) {
            return false;
        }
        emit(level, &Self::format_line(domain, level, message));
        true
    }

    pub fn debug(&self, message: &str) {
        if self.debug_enabled {
            self.output(EngineLogLevel::Debug, message);
        }
    }

    pub fn info(&self, message: &str) {
        self.output(EngineLogLevel::Message, message);
    }

    pub fn warn(&self, message: &str) {
        self.output(EngineLogLevel::Warning, message);
    }

    pub fn error(&self, message: &str) {
        self.output(EngineLogLevel::Error, message);
    }

    pub fn fatal(&self, message: &str) {
        self.output(EngineLogLevel::Fatal, message);
    }

    fn output(&self, level: EngineLogLevel, message: &str) {
        emit(level, &Self::format_line(&self.domain, level, message));
    }
}

fn emit(level: EngineLogLevel, line: &str) {
    let fatal = level == EngineLogLevel::Fatal;
    let tracing_level = level.tracing_level();

    if tracing_level == tracing::Level::DEBUG {
        tracing::debug!(target: "engine", "{}", line);
    } else if tracing_level == tracing::Level::INFO {
        tracing::info!(target: "engine", "{}", line);
    } else if tracing_level == tracing::Level::WARN {
        tracing::warn!(target: "engine", "{}", line);
    } else {
        tracing::error!(target: "engine", fatal, "{}", line);
    }
}
