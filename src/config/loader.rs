// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::adapter::TracingLogger;
use crate::config::consts::{DEFAULT_CALLER, DEFAULT_LOGGING_LEVEL, DEFAULT_STACKTRACE_LEVEL};
use crate::errors::LogError;
use crate::logger::{FatalAction, Severity};
use crate::setup::{LoggerBuilder, LoggingLevel};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Logger configuration, typically loaded from a YAML file.
///
/// # Fields
/// * `level` - `production` (info and above) or `development` (debug and above)
/// * `disable_console` - Suppress the human-readable stdout sink (optional, defaults to false)
/// * `filename` - File receiving JSON records, created if missing and appended to
/// * `caller` - Attach the call site to each record (optional, defaults to true)
/// * `stacktrace_level` - Attach a stacktrace at this severity and above
///   (optional, defaults to `error`; `null` disables)
/// * `fatal_exit_code` - Exit code used after a fatal record (optional, defaults to 1)
///
/// # Example
/// ```yaml
/// level: development
/// disable_console: true
/// filename: /var/log/raftd/raftd.log
/// stacktrace_level: panic
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct LoggerConfig {
    #[serde(default = "default_level")]
    pub level: LoggingLevel,
    #[serde(default)]
    pub disable_console: bool,
    pub filename: PathBuf,
    pub caller: Option<bool>,
    #[serde(default = "default_stacktrace_level")]
    pub stacktrace_level: Option<Severity>,
    pub fatal_exit_code: Option<i32>,
}

fn default_level() -> LoggingLevel {
    DEFAULT_LOGGING_LEVEL
}

fn default_stacktrace_level() -> Option<Severity> {
    Some(DEFAULT_STACKTRACE_LEVEL)
}

impl LoggerConfig {
    /// Config equivalent to `get_logger(level, disable_console, filename)`.
    pub fn new(level: LoggingLevel, disable_console: bool, filename: impl Into<PathBuf>) -> Self {
        Self {
            level,
            disable_console,
            filename: filename.into(),
            caller: None,
            stacktrace_level: default_stacktrace_level(),
            fatal_exit_code: None,
        }
    }

    /// Get caller capture, using the built-in default if not configured.
    pub fn get_caller(&self) -> bool {
        self.caller.unwrap_or(DEFAULT_CALLER)
    }

    /// Get the action taken after a fatal record.
    pub fn get_fatal_action(&self) -> FatalAction {
        self.fatal_exit_code
            .map(FatalAction::Exit)
            .unwrap_or_default()
    }

    /// Builder carrying every setting of this config.
    pub fn to_builder(&self) -> LoggerBuilder {
        LoggerBuilder::from_settings(self.level, self.disable_console, &self.filename)
            .caller(self.get_caller())
            .stacktrace_level(self.stacktrace_level)
            .fatal_action(self.get_fatal_action())
    }
}

/// Load a logger config from a YAML file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<LoggerConfig, LogError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| LogError::ReadConfig {
        path: path.to_path_buf(),
        source,
    })?;
    let cfg: LoggerConfig = serde_yaml::from_str(&content)?;
    Ok(cfg)
}

/// Build the logger a config describes.
pub fn get_logger_from_config(cfg: &LoggerConfig) -> Result<TracingLogger, LogError> {
    cfg.to_builder().build()
}
