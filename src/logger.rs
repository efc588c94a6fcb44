// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Logger contracts.
//!
//! Application code depends on [`Logger`] (structured, field-based) and reaches
//! the printf-style [`SugaredLogger`] through [`Logger::sugar`]. The concrete
//! backend lives in [`crate::adapter`].
//!
//! ```
//! use fieldlog::{field, Logger, NoOpLogger};
//! use fieldlog::log_info;
//! use std::sync::Arc;
//!
//! let logger: Arc<dyn Logger> = Arc::new(NoOpLogger);
//! logger.info("segment flushed", &[field::uint64("bytes", 4096)]);
//! log_info!(logger.sugar(), "flushed {} segments", 3);
//! ```

use crate::field::Field;
use serde::Deserialize;
use std::fmt::{self, Arguments};

/// Severity of a leveled write.
///
/// `Panic` and `Fatal` carry control-flow effects in addition to the write:
/// see [`Logger::panic`] and [`Logger::fatal`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Debug,
    Info,
    Warn,
    Error,
    Panic,
    Fatal,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Debug => "debug",
            Severity::Info => "info",
            Severity::Warn => "warn",
            Severity::Error => "error",
            Severity::Panic => "panic",
            Severity::Fatal => "fatal",
        }
    }

    /// Level the record is emitted at. `tracing` stops at `ERROR`, so panic and
    /// fatal records share it and carry their own severity as a field.
    pub fn tracing_level(&self) -> tracing::Level {
        match self {
            Severity::Debug => tracing::Level::DEBUG,
            Severity::Info => tracing::Level::INFO,
            Severity::Warn => tracing::Level::WARN,
            Severity::Error | Severity::Panic | Severity::Fatal => tracing::Level::ERROR,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a logger does after writing a fatal record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FatalAction {
    /// Terminate the process with the given exit code.
    Exit(i32),
    /// Unwind like a panic-level record. Lets a harness catch the failure
    /// and decide on termination itself.
    Panic,
}

impl Default for FatalAction {
    fn default() -> Self {
        FatalAction::Exit(1)
    }
}

/// Structured logging interface.
///
/// Implementations must be `Send + Sync` so a single logger can be shared
/// across threads behind an `Arc<dyn Logger>`.
pub trait Logger: Send + Sync {
    /// Write one record. The leveled methods delegate here; implementations
    /// are responsible for the panic and fatal control flow.
    #[track_caller]
    fn log(&self, severity: Severity, msg: &str, fields: &[Field]);

    /// Printf-style view of this logger.
    fn sugar(&self) -> &dyn SugaredLogger;

    #[track_caller]
    fn debug(&self, msg: &str, fields: &[Field]) {
        self.log(Severity::Debug, msg, fields);
    }

    #[track_caller]
    fn info(&self, msg: &str, fields: &[Field]) {
        self.log(Severity::Info, msg, fields);
    }

    #[track_caller]
    fn warn(&self, msg: &str, fields: &[Field]) {
        self.log(Severity::Warn, msg, fields);
    }

    #[track_caller]
    fn error(&self, msg: &str, fields: &[Field]) {
        self.log(Severity::Error, msg, fields);
    }

    /// Write the record, then panic with `msg`.
    #[track_caller]
    fn panic(&self, msg: &str, fields: &[Field]) {
        self.log(Severity::Panic, msg, fields);
    }

    /// Write the record, then terminate the process.
    #[track_caller]
    fn fatal(&self, msg: &str, fields: &[Field]) {
        self.log(Severity::Fatal, msg, fields);
    }
}

/// Reduced, printf-style logging interface.
pub trait SugaredLogger: Send + Sync {
    #[track_caller]
    fn log_args(&self, severity: Severity, args: Arguments<'_>);

    #[track_caller]
    fn debugf(&self, args: Arguments<'_>) {
        self.log_args(Severity::Debug, args);
    }

    #[track_caller]
    fn infof(&self, args: Arguments<'_>) {
        self.log_args(Severity::Info, args);
    }

    #[track_caller]
    fn warnf(&self, args: Arguments<'_>) {
        self.log_args(Severity::Warn, args);
    }

    #[track_caller]
    fn errorf(&self, args: Arguments<'_>) {
        self.log_args(Severity::Error, args);
    }

    #[track_caller]
    fn panicf(&self, args: Arguments<'_>) {
        self.log_args(Severity::Panic, args);
    }

    #[track_caller]
    fn fatalf(&self, args: Arguments<'_>) {
        self.log_args(Severity::Fatal, args);
    }
}

#[macro_export]
macro_rules! log_debug {
    ($logger:expr, $($arg:tt)*) => {
        $logger.debugf(format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_info {
    ($logger:expr, $($arg:tt)*) => {
        $logger.infof(format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_warn {
    ($logger:expr, $($arg:tt)*) => {
        $logger.warnf(format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_error {
    ($logger:expr, $($arg:tt)*) => {
        $logger.errorf(format_args!($($arg)*))
    };
}
