// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Structured logging through a small, engine-independent facade.
//!
//! Call sites build typed [`Field`]s and hand them to a [`Logger`]. The only
//! engine adapter, [`TracingLogger`], converts them into `tracing` events
//! written to a JSON file sink and an optional human-readable console sink.
//!
//! ```
//! use fieldlog::{field, get_logger, Logger, LoggingLevel};
//! use std::time::Duration;
//!
//! let dir = tempfile::tempdir().unwrap();
//! let logger = get_logger(LoggingLevel::Production, true, dir.path().join("node.log")).unwrap();
//!
//! logger.info(
//!     "snapshot taken",
//!     &[
//!         field::uint64("index", 1024),
//!         field::duration("took", Duration::from_millis(38)),
//!     ],
//! );
//! ```

pub mod adapter;    // Field -> tracing conversion
pub mod config;     // YAML logger config
pub mod errors;     // error handling
pub mod field;      // typed key-value fields
pub mod logger;     // Logger / SugaredLogger contracts
pub mod noop;
pub mod record;     // JSON file-sink format
pub mod setup;      // sink assembly

#[cfg(test)]
mod integration_tests;
#[cfg(test)]
mod test_support;

pub use adapter::{
    convert_field, convert_fields, JsonFields, LoggerOptions, NativeField, NativeValue,
    TracingLogger,
};
pub use config::{get_logger_from_config, load_config, LoggerConfig};
pub use errors::LogError;
pub use field::{Field, FieldType, FieldValue};
pub use logger::{FatalAction, Logger, Severity, SugaredLogger};
pub use noop::NoOpLogger;
pub use setup::{get_logger, must_get_test_logger, LoggerBuilder, LoggingLevel};
