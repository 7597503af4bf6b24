// Copyright 2021 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use chrono::Local;
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};

/// Writes log lines to stdout:
///
/// ```text
/// 2021-06-01 12:00:00.042 INFO  [benchplot] wrote 2628 files
/// ```
///
/// Messages at info and above are tagged with the tool name, debug and trace
/// with the module that emitted them.
pub struct SimpleLogger {
    name: &'static str,
    level: LevelFilter,
}

impl SimpleLogger {
    pub fn new(name: &'static str, level: LevelFilter) -> Self {
        Self { name, level }
    }

    /// Installs the logger as the global `log` backend.
    pub fn init(self) -> Result<(), SetLoggerError> {
        let level = self.level;
        log::set_boxed_logger(Box::new(self))?;
        log::set_max_level(level);
        Ok(())
    }

    fn format(&self, record: &Record) -> String {
        let target = if record.level() >= Level::Debug {
            record.target()
        } else {
            self.name
        };
        format!(
            "{} {:<5} [{}] {}",
            Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
            record.level(),
            target,
            record.args()
        )
    }
}

impl Log for SimpleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            println!("{}", self.format(record));
        }
    }

    fn flush(&self) {}
}

/// Maps a count of `-v` flags onto a level, starting from info.
pub fn level(verbosity: u64) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}
