// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! JSON line format for the file sink.
//!
//! Each event becomes one JSON object: `timestamp`, `level`, then the event's
//! own fields in callsite order. The `fields` value is carried through the
//! event as JSON text and lands in the record as a nested object, so every
//! converted field keeps its type and its key is escaped like any JSON key.

use chrono::{SecondsFormat, Utc};
use serde_json::{Map, Value};
use std::error::Error;
use std::fmt;
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;

/// Event field whose text is a JSON object to nest into the record.
pub const FIELDS_KEY: &str = "fields";

/// [`FormatEvent`] writing one JSON object per line.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRecord;

impl<S, N> FormatEvent<S, N> for JsonRecord
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let mut record = Map::new();
        record.insert(
            "timestamp".to_string(),
            Value::String(Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)),
        );
        record.insert(
            "level".to_string(),
            Value::String(event.metadata().level().to_string()),
        );
        event.record(&mut RecordVisitor {
            record: &mut record,
        });

        let line = serde_json::to_string(&record).map_err(|_| fmt::Error)?;
        writeln!(writer, "{}", line)
    }
}

struct RecordVisitor<'a> {
    record: &'a mut Map<String, Value>,
}

impl RecordVisitor<'_> {
    fn put(&mut self, field: &Field, value: Value) {
        self.record.insert(field.name().to_string(), value);
    }
}

impl Visit for RecordVisitor<'_> {
    fn record_i64(&mut self, field: &Field, value: i64) {
        self.put(field, Value::from(value));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.put(field, Value::from(value));
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        self.put(field, Value::from(value));
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.put(field, Value::from(value));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.put(field, Value::from(value));
    }

    fn record_error(&mut self, field: &Field, value: &(dyn Error + 'static)) {
        self.put(field, Value::String(value.to_string()));
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        let text = format!("{:?}", value);
        if field.name() == FIELDS_KEY {
            if let Ok(object @ Value::Object(_)) = serde_json::from_str::<Value>(&text) {
                self.put(field, object);
                return;
            }
        }
        self.put(field, Value::String(text));
    }
}
