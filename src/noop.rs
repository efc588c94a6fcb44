// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Logger that discards every record.

use crate::field::Field;
use crate::logger::{Logger, Severity, SugaredLogger};
use std::fmt::Arguments;

/// A logger that writes nothing.
///
/// Panic and fatal records still unwind, so code paths that rely on them
/// behave the same with logging switched off.
///
/// ```
/// use fieldlog::{field, Logger, NoOpLogger};
///
/// let logger = NoOpLogger;
/// logger.error("dropped", &[field::string("why", "quiet mode")]);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpLogger;

impl Logger for NoOpLogger {
    fn log(&self, severity: Severity, msg: &str, _fields: &[Field]) {
        if severity >= Severity::Panic {
            panic!("{}", msg);
        }
    }

    fn sugar(&self) -> &dyn SugaredLogger {
        self
    }
}

impl SugaredLogger for NoOpLogger {
    fn log_args(&self, severity: Severity, args: Arguments<'_>) {
        if severity >= Severity::Panic {
            panic!("{}", args);
        }
    }
}
