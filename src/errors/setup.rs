// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Errors raised while building a logger.
//!
//! Writing a record never fails from the caller's point of view; the only
//! fallible step is construction (opening the log file, reading its config).

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LogError {
    /// The log file could not be opened for appending.
    #[error("cannot open log file '{}': {source}", .path.display())]
    OpenLogFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The logger configuration file could not be read.
    #[error("cannot read logger config '{}': {source}", .path.display())]
    ReadConfig {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The logger configuration is not valid YAML for [`crate::LoggerConfig`].
    #[error("invalid logger config: {0}")]
    ParseConfig(#[from] serde_yaml::Error),
}

impl LogError {
    /// Underlying I/O error, if this is an I/O failure.
    pub fn io_error(&self) -> Option<&std::io::Error> {
        match self {
            LogError::OpenLogFile { source, .. } | LogError::ReadConfig { source, .. } => {
                Some(source)
            }
            LogError::ParseConfig(_) => None,
        }
    }
}
