// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Typed key-value annotations for structured log records.
//!
//! A [`Field`] is built at the call site with one of the constructor functions
//! in this module and consumed once by the logger that receives it. The payload
//! is a [`FieldValue`] variant, so the value a field carries always agrees with
//! its [`FieldType`].
//!
//! ```
//! use fieldlog::field;
//! use std::time::Duration;
//!
//! let fields = [
//!     field::string("node", "replica-2"),
//!     field::uint64("term", 7),
//!     field::duration("elapsed", Duration::from_millis(15)),
//! ];
//!
//! assert_eq!(fields[1].field_type(), field::FieldType::Uint64);
//! ```

use chrono::{DateTime, Utc};
use std::borrow::Cow;
use std::error::Error;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Key used by [`error`] for the error field.
pub const ERROR_KEY: &str = "error";

/// Kind of value carried by a [`Field`].
///
/// The discriminants are stable and can be used as a compact tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum FieldType {
    #[default]
    Unknown = 0,
    String,
    Int64,
    Int,
    Int32,
    Int16,
    Int8,
    Uint64,
    Uint32,
    Uint16,
    Uint8,
    Uint,
    Float64,
    Float32,
    Bool,
    Error,
    Duration,
    Time,
    ByteString,
    Stringer,
    Any,
}

impl FieldType {
    /// Every kind, in tag order.
    pub const ALL: [FieldType; 21] = [
        FieldType::Unknown,
        FieldType::String,
        FieldType::Int64,
        FieldType::Int,
        FieldType::Int32,
        FieldType::Int16,
        FieldType::Int8,
        FieldType::Uint64,
        FieldType::Uint32,
        FieldType::Uint16,
        FieldType::Uint8,
        FieldType::Uint,
        FieldType::Float64,
        FieldType::Float32,
        FieldType::Bool,
        FieldType::Error,
        FieldType::Duration,
        FieldType::Time,
        FieldType::ByteString,
        FieldType::Stringer,
        FieldType::Any,
    ];

    /// Map a raw tag back to its kind. Tags outside the enumeration map to
    /// [`FieldType::Unknown`].
    pub fn from_repr(tag: u8) -> FieldType {
        Self::ALL
            .get(tag as usize)
            .copied()
            .unwrap_or(FieldType::Unknown)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Unknown => "unknown",
            FieldType::String => "string",
            FieldType::Int64 => "int64",
            FieldType::Int => "int",
            FieldType::Int32 => "int32",
            FieldType::Int16 => "int16",
            FieldType::Int8 => "int8",
            FieldType::Uint64 => "uint64",
            FieldType::Uint32 => "uint32",
            FieldType::Uint16 => "uint16",
            FieldType::Uint8 => "uint8",
            FieldType::Uint => "uint",
            FieldType::Float64 => "float64",
            FieldType::Float32 => "float32",
            FieldType::Bool => "bool",
            FieldType::Error => "error",
            FieldType::Duration => "duration",
            FieldType::Time => "time",
            FieldType::ByteString => "byte_string",
            FieldType::Stringer => "stringer",
            FieldType::Any => "any",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payload of a [`Field`], one variant per kind.
#[derive(Clone)]
pub enum FieldValue {
    String(Cow<'static, str>),
    Int64(i64),
    Int(isize),
    Int32(i32),
    Int16(i16),
    Int8(i8),
    Uint64(u64),
    Uint32(u32),
    Uint16(u16),
    Uint8(u8),
    Uint(usize),
    Float64(f64),
    Float32(f32),
    Bool(bool),
    /// `None` means "no error".
    Error(Option<Arc<dyn Error + Send + Sync>>),
    Duration(Duration),
    Time(DateTime<Utc>),
    ByteString(Vec<u8>),
    Stringer(Arc<dyn fmt::Display + Send + Sync>),
    Any(Arc<dyn fmt::Debug + Send + Sync>),
}

impl FieldValue {
    pub fn field_type(&self) -> FieldType {
        match self {
            FieldValue::String(_) => FieldType::String,
            FieldValue::Int64(_) => FieldType::Int64,
            FieldValue::Int(_) => FieldType::Int,
            FieldValue::Int32(_) => FieldType::Int32,
            FieldValue::Int16(_) => FieldType::Int16,
            FieldValue::Int8(_) => FieldType::Int8,
            FieldValue::Uint64(_) => FieldType::Uint64,
            FieldValue::Uint32(_) => FieldType::Uint32,
            FieldValue::Uint16(_) => FieldType::Uint16,
            FieldValue::Uint8(_) => FieldType::Uint8,
            FieldValue::Uint(_) => FieldType::Uint,
            FieldValue::Float64(_) => FieldType::Float64,
            FieldValue::Float32(_) => FieldType::Float32,
            FieldValue::Bool(_) => FieldType::Bool,
            FieldValue::Error(_) => FieldType::Error,
            FieldValue::Duration(_) => FieldType::Duration,
            FieldValue::Time(_) => FieldType::Time,
            FieldValue::ByteString(_) => FieldType::ByteString,
            FieldValue::Stringer(_) => FieldType::Stringer,
            FieldValue::Any(_) => FieldType::Any,
        }
    }
}

impl fmt::Debug for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::String(v) => f.debug_tuple("String").field(v).finish(),
            FieldValue::Int64(v) => f.debug_tuple("Int64").field(v).finish(),
            FieldValue::Int(v) => f.debug_tuple("Int").field(v).finish(),
            FieldValue::Int32(v) => f.debug_tuple("Int32").field(v).finish(),
            FieldValue::Int16(v) => f.debug_tuple("Int16").field(v).finish(),
            FieldValue::Int8(v) => f.debug_tuple("Int8").field(v).finish(),
            FieldValue::Uint64(v) => f.debug_tuple("Uint64").field(v).finish(),
            FieldValue::Uint32(v) => f.debug_tuple("Uint32").field(v).finish(),
            FieldValue::Uint16(v) => f.debug_tuple("Uint16").field(v).finish(),
            FieldValue::Uint8(v) => f.debug_tuple("Uint8").field(v).finish(),
            FieldValue::Uint(v) => f.debug_tuple("Uint").field(v).finish(),
            FieldValue::Float64(v) => f.debug_tuple("Float64").field(v).finish(),
            FieldValue::Float32(v) => f.debug_tuple("Float32").field(v).finish(),
            FieldValue::Bool(v) => f.debug_tuple("Bool").field(v).finish(),
            FieldValue::Error(v) => f.debug_tuple("Error").field(v).finish(),
            FieldValue::Duration(v) => f.debug_tuple("Duration").field(v).finish(),
            FieldValue::Time(v) => f.debug_tuple("Time").field(v).finish(),
            FieldValue::ByteString(v) => f
                .debug_tuple("ByteString")
                .field(&String::from_utf8_lossy(v))
                .finish(),
            FieldValue::Stringer(v) => f
                .debug_tuple("Stringer")
                .field(&format_args!("{}", v))
                .finish(),
            FieldValue::Any(v) => f.debug_tuple("Any").field(v).finish(),
        }
    }
}

/// A single structured key-value annotation attached to a log record.
#[derive(Debug, Clone)]
pub struct Field {
    key: Cow<'static, str>,
    value: FieldValue,
}

impl Field {
    pub fn new(key: impl Into<Cow<'static, str>>, value: FieldValue) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &FieldValue {
        &self.value
    }

    pub fn field_type(&self) -> FieldType {
        self.value.field_type()
    }
}

pub fn string(key: impl Into<Cow<'static, str>>, val: impl Into<Cow<'static, str>>) -> Field {
    Field::new(key, FieldValue::String(val.into()))
}

pub fn int64(key: impl Into<Cow<'static, str>>, val: i64) -> Field {
    Field::new(key, FieldValue::Int64(val))
}

pub fn int(key: impl Into<Cow<'static, str>>, val: isize) -> Field {
    Field::new(key, FieldValue::Int(val))
}

pub fn int32(key: impl Into<Cow<'static, str>>, val: i32) -> Field {
    Field::new(key, FieldValue::Int32(val))
}

pub fn int16(key: impl Into<Cow<'static, str>>, val: i16) -> Field {
    Field::new(key, FieldValue::Int16(val))
}

pub fn int8(key: impl Into<Cow<'static, str>>, val: i8) -> Field {
    Field::new(key, FieldValue::Int8(val))
}

pub fn uint64(key: impl Into<Cow<'static, str>>, val: u64) -> Field {
    Field::new(key, FieldValue::Uint64(val))
}

pub fn uint32(key: impl Into<Cow<'static, str>>, val: u32) -> Field {
    Field::new(key, FieldValue::Uint32(val))
}

pub fn uint16(key: impl Into<Cow<'static, str>>, val: u16) -> Field {
    Field::new(key, FieldValue::Uint16(val))
}

pub fn uint8(key: impl Into<Cow<'static, str>>, val: u8) -> Field {
    Field::new(key, FieldValue::Uint8(val))
}

pub fn uint(key: impl Into<Cow<'static, str>>, val: usize) -> Field {
    Field::new(key, FieldValue::Uint(val))
}

pub fn float64(key: impl Into<Cow<'static, str>>, val: f64) -> Field {
    Field::new(key, FieldValue::Float64(val))
}

pub fn float32(key: impl Into<Cow<'static, str>>, val: f32) -> Field {
    Field::new(key, FieldValue::Float32(val))
}

pub fn bool(key: impl Into<Cow<'static, str>>, val: bool) -> Field {
    Field::new(key, FieldValue::Bool(val))
}

/// Error field under the [`ERROR_KEY`] key.
///
/// A `None` input still yields a valid field of type [`FieldType::Error`]
/// with an empty payload, which loggers treat as "no error":
///
/// ```
/// use fieldlog::field::{self, FieldType};
///
/// let result: Result<(), std::io::Error> = Ok(());
/// let f = field::error(result.err());
/// assert_eq!(f.field_type(), FieldType::Error);
/// assert_eq!(f.key(), "error");
/// ```
pub fn error<E>(err: Option<E>) -> Field
where
    E: Error + Send + Sync + 'static,
{
    named_error(ERROR_KEY, err)
}

/// Error field under a caller-chosen key.
pub fn named_error<E>(key: impl Into<Cow<'static, str>>, err: Option<E>) -> Field
where
    E: Error + Send + Sync + 'static,
{
    let payload = err.map(|e| Arc::new(e) as Arc<dyn Error + Send + Sync>);
    Field::new(key, FieldValue::Error(payload))
}

pub fn duration(key: impl Into<Cow<'static, str>>, val: Duration) -> Field {
    Field::new(key, FieldValue::Duration(val))
}

/// Timestamp field. Accepts anything convertible to a UTC instant, including
/// [`std::time::SystemTime`].
pub fn time(key: impl Into<Cow<'static, str>>, val: impl Into<DateTime<Utc>>) -> Field {
    Field::new(key, FieldValue::Time(val.into()))
}

/// Raw bytes rendered as (lossy) UTF-8 text.
pub fn byte_string(key: impl Into<Cow<'static, str>>, val: impl Into<Vec<u8>>) -> Field {
    Field::new(key, FieldValue::ByteString(val.into()))
}

/// Value rendered through its `Display` implementation.
pub fn stringer<T>(key: impl Into<Cow<'static, str>>, val: T) -> Field
where
    T: fmt::Display + Send + Sync + 'static,
{
    Field::new(key, FieldValue::Stringer(Arc::new(val)))
}

/// Catch-all field rendered through its `Debug` implementation.
pub fn any<T>(key: impl Into<Cow<'static, str>>, val: T) -> Field
where
    T: fmt::Debug + Send + Sync + 'static,
{
    Field::new(key, FieldValue::Any(Arc::new(val)))
}
