// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Adapter from the field facade to `tracing`.
//!
//! [`TracingLogger`] owns one [`tracing::Dispatch`] and, for every leveled
//! write, converts the caller's [`Field`]s into [`NativeField`]s (the value
//! kinds `tracing` records natively), then emits a single event through that
//! dispatch. This is the only module that knows about `tracing`'s field
//! vocabulary; swapping the engine means replacing this file and
//! [`crate::setup`].
//!
//! Converted fields travel as a single `fields` event value holding a JSON
//! object, since `tracing` field names are fixed per callsite. The file sink
//! nests that object into its record (see [`crate::record`]).
//!
//! The dispatch is entered per call with [`tracing::dispatcher::with_default`]
//! instead of being installed globally, so several loggers with different
//! sinks can live in one process.

use crate::field::{Field, FieldValue};
use crate::logger::{FatalAction, Logger, Severity, SugaredLogger};
use chrono::SecondsFormat;
use serde_json::{Map, Number, Value};
use std::backtrace::Backtrace;
use std::borrow::Cow;
use std::fmt::{self, Arguments};
use std::io::{self, Write};
use std::panic::Location;
use tracing::field::display;
use tracing::{Dispatch, Level};

/// Target attached to every event this crate emits.
pub const LOG_TARGET: &str = "fieldlog";

/// A value in the shape `tracing` records it.
#[derive(Debug, Clone, PartialEq)]
pub enum NativeValue<'a> {
    I64(i64),
    U64(u64),
    F64(f64),
    /// Kept apart from `F64` so it renders at single precision.
    F32(f32),
    Bool(bool),
    Str(Cow<'a, str>),
    Error(String),
    Debug(String),
    /// Rendered as nothing; the field is omitted from the record.
    Skip,
}

impl NativeValue<'_> {
    /// JSON form of the value; `None` for [`NativeValue::Skip`].
    ///
    /// Non-finite floats have no JSON number and are written as strings.
    pub fn to_json(&self) -> Option<Value> {
        let value = match self {
            NativeValue::I64(v) => Value::from(*v),
            NativeValue::U64(v) => Value::from(*v),
            NativeValue::F64(v) => float_json(*v, v.to_string()),
            NativeValue::F32(v) => {
                // shortest single-precision text, so 0.1f32 stays 0.1
                let text = v.to_string();
                float_json(text.parse().unwrap_or(f64::from(*v)), text)
            }
            NativeValue::Bool(v) => Value::Bool(*v),
            NativeValue::Str(v) => Value::String(v.to_string()),
            NativeValue::Error(v) | NativeValue::Debug(v) => Value::String(v.clone()),
            NativeValue::Skip => return None,
        };
        Some(value)
    }
}

fn float_json(value: f64, text: String) -> Value {
    Number::from_f64(value)
        .map(Value::Number)
        .unwrap_or(Value::String(text))
}

/// A converted field, borrowing from the [`Field`] it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct NativeField<'a> {
    pub key: &'a str,
    pub value: NativeValue<'a>,
}

impl NativeField<'_> {
    pub fn is_skipped(&self) -> bool {
        matches!(self.value, NativeValue::Skip)
    }
}

/// Convert one field. Total: every payload maps to exactly one native value.
pub fn convert_field(field: &Field) -> NativeField<'_> {
    let value = match field.value() {
        FieldValue::String(v) => NativeValue::Str(Cow::Borrowed(v.as_ref())),
        FieldValue::Int64(v) => NativeValue::I64(*v),
        FieldValue::Int(v) => NativeValue::I64(*v as i64),
        FieldValue::Int32(v) => NativeValue::I64(i64::from(*v)),
        FieldValue::Int16(v) => NativeValue::I64(i64::from(*v)),
        FieldValue::Int8(v) => NativeValue::I64(i64::from(*v)),
        FieldValue::Uint64(v) => NativeValue::U64(*v),
        FieldValue::Uint32(v) => NativeValue::U64(u64::from(*v)),
        FieldValue::Uint16(v) => NativeValue::U64(u64::from(*v)),
        FieldValue::Uint8(v) => NativeValue::U64(u64::from(*v)),
        FieldValue::Uint(v) => NativeValue::U64(*v as u64),
        FieldValue::Float64(v) => NativeValue::F64(*v),
        FieldValue::Float32(v) => NativeValue::F32(*v),
        FieldValue::Bool(v) => NativeValue::Bool(*v),
        FieldValue::Error(Some(err)) => NativeValue::Error(err.to_string()),
        FieldValue::Error(None) => NativeValue::Skip,
        FieldValue::Duration(v) => NativeValue::Debug(format!("{:?}", v)),
        FieldValue::Time(v) => {
            NativeValue::Str(Cow::Owned(v.to_rfc3339_opts(SecondsFormat::Millis, true)))
        }
        FieldValue::ByteString(v) => NativeValue::Str(String::from_utf8_lossy(v)),
        FieldValue::Stringer(v) => NativeValue::Str(Cow::Owned(v.to_string())),
        FieldValue::Any(v) => NativeValue::Debug(format!("{:?}", v)),
    };

    NativeField {
        key: field.key(),
        value,
    }
}

/// Convert a field list, preserving order.
pub fn convert_fields(fields: &[Field]) -> Vec<NativeField<'_>> {
    fields.iter().map(convert_field).collect()
}

/// Converted fields as one JSON object, in call order, skipped fields omitted.
///
/// A repeated key keeps its first position and takes the last value.
pub struct JsonFields<'a>(pub &'a [NativeField<'a>]);

impl JsonFields<'_> {
    pub fn to_map(&self) -> Map<String, Value> {
        self.0
            .iter()
            .filter_map(|field| Some((field.key.to_string(), field.value.to_json()?)))
            .collect()
    }
}

impl fmt::Display for JsonFields<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = serde_json::to_string(&self.to_map()).map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}

/// Per-logger behavior layered on top of the dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoggerOptions {
    /// Attach the caller's `file:line:column` to every record.
    pub caller: bool,
    /// Attach a captured backtrace at this severity and above.
    pub stacktrace_level: Option<Severity>,
    pub fatal_action: FatalAction,
}

impl Default for LoggerOptions {
    fn default() -> Self {
        Self {
            caller: true,
            stacktrace_level: Some(Severity::Error),
            fatal_action: FatalAction::default(),
        }
    }
}

/// [`Logger`] backed by a dedicated `tracing` dispatch.
#[derive(Debug, Clone)]
pub struct TracingLogger {
    dispatch: Dispatch,
    options: LoggerOptions,
}

impl TracingLogger {
    /// Wrap an already configured dispatch.
    pub fn new(dispatch: Dispatch, options: LoggerOptions) -> Self {
        Self { dispatch, options }
    }

    pub fn options(&self) -> &LoggerOptions {
        &self.options
    }

    fn wants_stacktrace(&self, severity: Severity) -> bool {
        self.options
            .stacktrace_level
            .is_some_and(|threshold| severity >= threshold)
    }

    fn emit(&self, severity: Severity, msg: &str, fields: &[Field], location: &Location<'_>) {
        let native = convert_fields(fields);
        let rendered = native
            .iter()
            .any(|field| !field.is_skipped())
            .then(|| display(JsonFields(&native)));
        let caller = self.options.caller.then(|| display(location));
        let stacktrace = self
            .wants_stacktrace(severity)
            .then(Backtrace::force_capture);
        let stacktrace = stacktrace.as_ref().map(display);
        let marker =
            matches!(severity, Severity::Panic | Severity::Fatal).then(|| severity.as_str());

        macro_rules! emit_at {
            ($level:expr) => {
                tracing::event!(
                    target: LOG_TARGET,
                    $level,
                    severity = marker,
                    fields = rendered,
                    caller = caller,
                    stacktrace = stacktrace,
                    "{}",
                    msg
                )
            };
        }

        tracing::dispatcher::with_default(&self.dispatch, || match severity {
            Severity::Debug => emit_at!(Level::DEBUG),
            Severity::Info => emit_at!(Level::INFO),
            Severity::Warn => emit_at!(Level::WARN),
            Severity::Error | Severity::Panic | Severity::Fatal => emit_at!(Level::ERROR),
        });
    }
}

impl Logger for TracingLogger {
    fn log(&self, severity: Severity, msg: &str, fields: &[Field]) {
        self.emit(severity, msg, fields, Location::caller());

        match severity {
            Severity::Panic => panic!("{}", msg),
            Severity::Fatal => match self.options.fatal_action {
                FatalAction::Exit(code) => {
                    let _ = io::stdout().lock().flush();
                    std::process::exit(code);
                }
                FatalAction::Panic => panic!("{}", msg),
            },
            _ => {}
        }
    }

    fn sugar(&self) -> &dyn SugaredLogger {
        self
    }
}

impl SugaredLogger for TracingLogger {
    fn log_args(&self, severity: Severity, args: Arguments<'_>) {
        let msg = match args.as_str() {
            Some(text) => Cow::Borrowed(text),
            None => Cow::Owned(args.to_string()),
        };
        self.log(severity, &msg, &[]);
    }
}
