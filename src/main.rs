// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use anyhow::Context;
use fieldlog::{field, get_logger_from_config, load_config, log_info, must_get_test_logger, Logger};
use std::env;
use std::time::{Instant, SystemTime};

const DEFAULT_MESSAGE: &str = "hello from fieldlog";

/// Write one record per non-terminating level plus a sugared line.
fn emit_sample(logger: &dyn Logger, message: &str) {
    let started = Instant::now();
    let fields = [
        field::string("message_source", "cli"),
        field::uint32("pid", std::process::id()),
        field::time("at", SystemTime::now()),
    ];

    logger.debug(message, &fields);
    logger.info(message, &fields);
    logger.warn(message, &fields);
    logger.error(message, &[field::error(None::<std::io::Error>)]);
    log_info!(logger.sugar(), "sample written in {:?}", started.elapsed());
}

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <logging.yaml> [message]", args[0]);
        eprintln!("       {} --console [message]", args[0]);
        eprintln!("Example: {} configs/logging.yaml \"node started\"", args[0]);
        std::process::exit(1);
    }

    let message = args.get(2).map(String::as_str).unwrap_or(DEFAULT_MESSAGE);

    if args[1] == "--console" {
        let logger = must_get_test_logger();
        emit_sample(&logger, message);
        return Ok(());
    }

    let cfg = load_config(&args[1])
        .with_context(|| format!("loading logger config from {}", args[1]))?;
    let logger = get_logger_from_config(&cfg)
        .with_context(|| format!("opening log file {}", cfg.filename.display()))?;

    emit_sample(&logger, message);
    Ok(())
}
