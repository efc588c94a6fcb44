use crate::logger::Severity;
use crate::setup::LoggingLevel;

/// Minimum level used when a config omits `level`
pub const DEFAULT_LOGGING_LEVEL: LoggingLevel = LoggingLevel::Production;
/// Caller capture is on unless a config turns it off
pub const DEFAULT_CALLER: bool = true;
/// Records at this severity and above carry a stacktrace
pub const DEFAULT_STACKTRACE_LEVEL: Severity = Severity::Error;
