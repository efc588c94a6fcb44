// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Logger construction.
//!
//! Sinks are `tracing-subscriber` fmt layers stacked on a registry and wrapped
//! in a [`Dispatch`] owned by the returned [`TracingLogger`]:
//!
//! * file sink: one JSON object per line, appended to the target file, with
//!   the logged fields nested under `fields`
//! * console sink: human-readable lines on stdout (or a supplied writer)
//!
//! Both sinks share one minimum level.

use crate::adapter::{LoggerOptions, TracingLogger};
use crate::errors::LogError;
use crate::logger::{FatalAction, Severity};
use crate::record::JsonRecord;
use serde::Deserialize;
use std::fs::{File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::Dispatch;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::layer::SubscriberExt;

/// Permission bits for a newly created log file.
pub const LOG_FILE_MODE: u32 = 0o644;

/// Deployment profile selecting the minimum level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoggingLevel {
    /// Info and above.
    #[default]
    Production,
    /// Debug and above.
    Development,
}

impl LoggingLevel {
    pub fn level_filter(&self) -> LevelFilter {
        match self {
            LoggingLevel::Production => LevelFilter::INFO,
            _ => LevelFilter::DEBUG,
        }
    }
}

/// Logger writing JSON records to `filename` and, unless `disable_console` is
/// set, human-readable records to stdout.
///
/// The file is created if missing and appended to otherwise.
///
/// # Errors
///
/// [`LogError::OpenLogFile`] if the file cannot be opened for appending.
pub fn get_logger(
    level: LoggingLevel,
    disable_console: bool,
    filename: impl AsRef<Path>,
) -> Result<TracingLogger, LogError> {
    LoggerBuilder::from_settings(level, disable_console, filename).build()
}

/// Console-only logger at debug level with caller and error stacktraces,
/// for tests and scratch binaries.
pub fn must_get_test_logger() -> TracingLogger {
    LoggerBuilder::new()
        .level_filter(LevelFilter::DEBUG)
        .assemble(None)
}

/// Step-by-step logger configuration.
///
/// ```
/// use fieldlog::{field, Logger, LoggerBuilder};
/// use tracing_subscriber::filter::LevelFilter;
///
/// let dir = tempfile::tempdir().unwrap();
/// let logger = LoggerBuilder::new()
///     .level_filter(LevelFilter::WARN)
///     .file(dir.path().join("app.log"))
///     .console(false)
///     .build()
///     .unwrap();
///
/// logger.warn("disk almost full", &[field::uint8("percent", 93)]);
/// ```
pub struct LoggerBuilder {
    level: LevelFilter,
    file: Option<PathBuf>,
    console: bool,
    console_writer: Option<BoxMakeWriter>,
    options: LoggerOptions,
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl LoggerBuilder {
    pub fn new() -> Self {
        Self {
            level: LevelFilter::DEBUG,
            file: None,
            console: true,
            console_writer: None,
            options: LoggerOptions::default(),
        }
    }

    /// Builder preconfigured the way [`get_logger`] configures it.
    pub fn from_settings(
        level: LoggingLevel,
        disable_console: bool,
        filename: impl AsRef<Path>,
    ) -> Self {
        Self::new()
            .level_filter(level.level_filter())
            .file(filename)
            .console(!disable_console)
    }

    pub fn level_filter(mut self, level: LevelFilter) -> Self {
        self.level = level;
        self
    }

    pub fn file(mut self, path: impl AsRef<Path>) -> Self {
        self.file = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn console(mut self, enabled: bool) -> Self {
        self.console = enabled;
        self
    }

    /// Replace stdout as the console destination.
    pub fn console_writer(mut self, writer: BoxMakeWriter) -> Self {
        self.console_writer = Some(writer);
        self
    }

    pub fn caller(mut self, enabled: bool) -> Self {
        self.options.caller = enabled;
        self
    }

    /// `None` disables stacktrace capture.
    pub fn stacktrace_level(mut self, level: Option<Severity>) -> Self {
        self.options.stacktrace_level = level;
        self
    }

    pub fn fatal_action(mut self, action: FatalAction) -> Self {
        self.options.fatal_action = action;
        self
    }

    pub fn build(self) -> Result<TracingLogger, LogError> {
        let file = self.file.as_deref().map(open_append).transpose()?;
        Ok(self.assemble(file))
    }

    fn assemble(self, file: Option<File>) -> TracingLogger {
        let file_layer = file.map(|file| {
            fmt::layer()
                .event_format(JsonRecord)
                .with_ansi(false)
                .with_writer(Arc::new(file))
        });

        let console_layer = if self.console {
            let writer = self
                .console_writer
                .unwrap_or_else(|| BoxMakeWriter::new(io::stdout));
            Some(
                fmt::layer()
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(writer),
            )
        } else {
            None
        };

        let subscriber = tracing_subscriber::registry()
            .with(self.level)
            .with(file_layer)
            .with(console_layer);

        TracingLogger::new(Dispatch::new(subscriber), self.options)
    }
}

fn open_append(path: &Path) -> Result<File, LogError> {
    let mut options = OpenOptions::new();
    options.create(true).append(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(LOG_FILE_MODE);
    }
    options.open(path).map_err(|source| LogError::OpenLogFile {
        path: path.to_path_buf(),
        source,
    })
}
