// Copyright 2021 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The single-line benchmark log record.
//!
//! ```text
//! procs 4, rank 0, elapsed (sec) 60.6, total (sec) 60.6
//! ```
//!
//! Timings are written with the shortest decimal form that parses back to the
//! same `f64`, so a record survives a write and re-read unchanged.

use core::fmt;
use regex::Regex;

const PATTERN: &str = r"procs (\d+), rank (\d+), elapsed \(sec\) (\d+(?:\.\d+)?), total \(sec\) (\d+(?:\.\d+)?)";

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Record {
    pub procs: u64,
    pub rank: u64,
    pub elapsed: f64,
    pub total: f64,
}

impl Record {
    pub fn new(procs: u64, rank: u64, elapsed: f64, total: f64) -> Self {
        Self {
            procs,
            rank,
            elapsed,
            total,
        }
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "procs {}, rank {}, elapsed (sec) {}, total (sec) {}",
            self.procs, self.rank, self.elapsed, self.total
        )
    }
}

/// Extracts records from log text. Holds the compiled pattern so callers
/// scanning many files compile it once.
pub struct Parser {
    regex: Regex,
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser {
    pub fn new() -> Self {
        Self {
            regex: Regex::new(PATTERN).expect("record pattern is valid"),
        }
    }

    /// Returns the first record found in `text`, or `None` if the text does
    /// not contain one.
    pub fn parse(&self, text: &str) -> Option<Record> {
        let captures = self.regex.captures(text.trim())?;

        Some(Record {
            procs: captures[1].parse().ok()?,
            rank: captures[2].parse().ok()?,
            elapsed: captures[3].parse().ok()?,
            total: captures[4].parse().ok()?,
        })
    }
}
