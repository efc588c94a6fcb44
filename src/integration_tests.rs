// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::env;
use std::fs;
use std::io;
use std::path::Path;
use std::process::{Command, Output};
use std::sync::Arc;
use std::thread;

use serde_json::Value;

use crate::field;
use crate::logger::{FatalAction, Logger};
use crate::setup::{get_logger, LoggerBuilder, LoggingLevel};
use crate::test_support::SharedBuffer;

/// End-to-end tests: facade calls through `tracing` into real file and console sinks
#[cfg(test)]
mod tests {
    use super::*;

    fn read_records(path: &Path) -> Vec<Value> {
        fs::read_to_string(path)
            .expect("Failed to read log file")
            .lines()
            .map(|line| serde_json::from_str(line).expect("record is not JSON"))
            .collect()
    }

    #[test]
    fn test_production_writes_info_to_file_and_console() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("node.log");
        let console = SharedBuffer::default();

        let logger = LoggerBuilder::from_settings(LoggingLevel::Production, false, &path)
            .console_writer(console.boxed())
            .build()
            .expect("Failed to build logger");

        logger.info("leader elected", &[field::uint64("term", 4)]);
        logger.debug("heartbeat sent", &[]);

        let records = read_records(&path);
        assert_eq!(records.len(), 1, "debug must be filtered: {:?}", records);
        assert_eq!(records[0]["level"], "INFO");
        assert_eq!(records[0]["message"], "leader elected");
        assert_eq!(records[0]["fields"]["term"], 4);
        assert!(records[0]["timestamp"].is_string());

        let output = console.contents();
        assert_eq!(output.lines().count(), 1);
        assert!(output.contains("INFO"));
        assert!(output.contains("leader elected"));
        assert!(output.contains(r#"fields={"term":4}"#), "console was {}", output);
        assert!(!output.contains("heartbeat sent"));
    }

    #[test]
    fn test_development_keeps_debug_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dev.log");

        let logger = get_logger(LoggingLevel::Development, true, &path).unwrap();
        logger.debug("snapshot scheduled", &[]);

        let records = read_records(&path);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["level"], "DEBUG");
    }

    #[test]
    fn test_disabled_console_never_writes_to_console() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quiet.log");
        let console = SharedBuffer::default();

        let logger = LoggerBuilder::from_settings(LoggingLevel::Development, true, &path)
            .console_writer(console.boxed())
            .build()
            .unwrap();

        logger.debug("d", &[]);
        logger.info("i", &[]);
        logger.warn("w", &[]);
        logger.error("e", &[]);

        assert_eq!(console.contents(), "");
        assert_eq!(read_records(&path).len(), 4);
    }

    #[test]
    fn test_unwritable_directory_returns_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("node.log");

        let result = get_logger(LoggingLevel::Production, false, &path);

        let err = result.expect_err("logger must not be built");
        assert_eq!(err.io_error().unwrap().kind(), io::ErrorKind::NotFound);
        assert!(!path.exists());
    }

    #[test]
    fn test_json_record_keeps_field_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("order.log");
        let logger = get_logger(LoggingLevel::Production, true, &path).unwrap();

        logger.warn(
            "append rejected",
            &[
                field::string("peer", "n3"),
                field::int64("index", 120),
                field::bool("retry", true),
            ],
        );

        let records = read_records(&path);
        let fields = records[0]["fields"].as_object().unwrap();
        let keys: Vec<&str> = fields.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["peer", "index", "retry"]);
        assert_eq!(fields["peer"], "n3");
        assert_eq!(fields["index"], 120);
        assert_eq!(fields["retry"], true);
        assert_eq!(records[0]["level"], "WARN");
    }

    #[test]
    fn test_awkward_keys_stay_separate_members() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("keys.log");
        let logger = get_logger(LoggingLevel::Production, true, &path).unwrap();

        logger.info(
            "m",
            &[
                field::uint64("term", 4),
                field::string("a b", "x=1"),
                field::string("k=v", "y"),
            ],
        );

        let records = read_records(&path);
        let fields = records[0]["fields"].as_object().unwrap();
        assert_eq!(fields.len(), 3);
        assert_eq!(fields["term"], 4);
        assert_eq!(fields["a b"], "x=1");
        assert_eq!(fields["k=v"], "y");
    }

    #[test]
    fn test_nil_error_is_omitted_from_record() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("errors.log");
        let logger = LoggerBuilder::from_settings(LoggingLevel::Production, true, &path)
            .stacktrace_level(None)
            .build()
            .unwrap();

        logger.info("no failure", &[field::error(None::<io::Error>)]);
        logger.info(
            "failure",
            &[
                field::string("op", "fsync"),
                field::error(Some(io::Error::other("disk gone"))),
            ],
        );

        let records = read_records(&path);
        assert!(records[0].get("fields").is_none());
        assert_eq!(records[1]["fields"]["op"], "fsync");
        assert_eq!(records[1]["fields"]["error"], "disk gone");
    }

    #[test]
    fn test_error_records_carry_caller_and_stacktrace() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trace.log");
        let logger = get_logger(LoggingLevel::Production, true, &path).unwrap();

        logger.info("plain", &[]);
        logger.error("commit failed", &[]);

        let records = read_records(&path);
        assert!(records[0].get("stacktrace").is_none());
        assert!(records[1]["stacktrace"].is_string());
        let caller = records[1]["caller"].as_str().unwrap();
        assert!(caller.starts_with("src/integration_tests.rs:"), "caller was {}", caller);
    }

    #[test]
    fn test_panic_record_is_written_before_unwinding() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("panic.log");
        let logger = get_logger(LoggingLevel::Production, true, &path).unwrap();

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            logger.panic("log diverged", &[field::uint64("index", 9)]);
        }));

        assert!(result.is_err());
        let records = read_records(&path);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["level"], "ERROR");
        assert_eq!(records[0]["severity"], "panic");
        assert_eq!(records[0]["message"], "log diverged");
    }

    #[test]
    fn test_fatal_record_with_panic_action() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fatal.log");
        let logger = LoggerBuilder::from_settings(LoggingLevel::Production, true, &path)
            .fatal_action(FatalAction::Panic)
            .build()
            .unwrap();

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            logger.fatal("storage corrupted", &[]);
        }));

        assert!(result.is_err());
        let records = read_records(&path);
        assert_eq!(records[0]["severity"], "fatal");
    }

    #[test]
    fn test_loggers_do_not_share_sinks() {
        let dir = tempfile::tempdir().unwrap();
        let first_path = dir.path().join("first.log");
        let second_path = dir.path().join("second.log");
        let first = get_logger(LoggingLevel::Production, true, &first_path).unwrap();
        let second = get_logger(LoggingLevel::Production, true, &second_path).unwrap();

        first.info("to first", &[]);
        second.info("to second", &[]);

        let first_records = read_records(&first_path);
        let second_records = read_records(&second_path);
        assert_eq!(first_records.len(), 1);
        assert_eq!(second_records.len(), 1);
        assert_eq!(first_records[0]["message"], "to first");
        assert_eq!(second_records[0]["message"], "to second");
    }

    #[test]
    fn test_shared_logger_across_threads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("threads.log");
        let logger: Arc<dyn Logger> =
            Arc::new(get_logger(LoggingLevel::Production, true, &path).unwrap());

        let handles: Vec<_> = (0..4)
            .map(|worker| {
                let logger = Arc::clone(&logger);
                thread::spawn(move || {
                    for seq in 0..25 {
                        logger.info(
                            "tick",
                            &[field::int("worker", worker), field::int("seq", seq)],
                        );
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let records = read_records(&path);
        assert_eq!(records.len(), 100);
        assert!(records.iter().all(|r| r["message"] == "tick"));
    }

    const CHILD_LOG_ENV: &str = "FIELDLOG_CHILD_LOG";
    const CHILD_CONSOLE_ENV: &str = "FIELDLOG_CHILD_CONSOLE";
    const CHILD_TEST: &str = "integration_tests::tests::fatal_child_process";

    /// Body of the child process started by the fatal tests; a no-op otherwise.
    #[test]
    fn fatal_child_process() {
        let Ok(path) = env::var(CHILD_LOG_ENV) else {
            return;
        };
        let disable_console = env::var(CHILD_CONSOLE_ENV).as_deref() == Ok("off");
        let logger = get_logger(LoggingLevel::Production, disable_console, &path).unwrap();

        logger.info("child started", &[]);
        logger.fatal("unrecoverable state", &[field::uint64("term", 9)]);
        unreachable!("fatal must end the process");
    }

    fn run_fatal_child(path: &Path, console: &str) -> Output {
        Command::new(env::current_exe().unwrap())
            .args(["--exact", CHILD_TEST, "--nocapture", "--test-threads=1"])
            .env(CHILD_LOG_ENV, path)
            .env(CHILD_CONSOLE_ENV, console)
            .output()
            .expect("Failed to start child process")
    }

    #[test]
    fn test_fatal_writes_record_then_exits_with_code_one() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fatal-exit.log");

        let output = run_fatal_child(&path, "off");

        assert_eq!(output.status.code(), Some(1), "child output: {:?}", output);
        let records = read_records(&path);
        assert_eq!(records.len(), 2);
        assert_eq!(records[1]["level"], "ERROR");
        assert_eq!(records[1]["severity"], "fatal");
        assert_eq!(records[1]["message"], "unrecoverable state");
        assert_eq!(records[1]["fields"]["term"], 9);
    }

    #[test]
    fn test_console_sink_writes_to_process_stdout() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stdout.log");

        let output = run_fatal_child(&path, "on");

        assert_eq!(output.status.code(), Some(1));
        let stdout = String::from_utf8_lossy(&output.stdout);
        let started = stdout
            .lines()
            .find(|line| line.contains("child started"))
            .unwrap_or_else(|| panic!("no console line in {}", stdout));
        assert!(started.contains("INFO"));
        assert!(!started.starts_with('{'), "console must not be JSON: {}", started);
        assert!(stdout.contains("unrecoverable state"));
        assert!(stdout.contains(r#"fields={"term":9}"#));
    }

    #[test]
    fn test_disabled_console_keeps_process_stdout_clean() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no-stdout.log");

        let output = run_fatal_child(&path, "off");

        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(!stdout.contains("child started"), "stdout was {}", stdout);
        assert!(!stdout.contains("unrecoverable state"));
        assert_eq!(read_records(&path).len(), 2);
    }
}
