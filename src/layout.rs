// Copyright 2021 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! On-disk layout of a benchmark log tree:
//!
//! ```text
//! <root>/<process_count>/Rank_<rank>_benchmark_<timestamp>.log
//! ```

use crate::Error;

use chrono::{DateTime, Utc};

use std::fs;
use std::path::{Path, PathBuf};

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d-%H-%M-%S";

pub fn process_dir(root: &Path, procs: u64) -> PathBuf {
    root.join(procs.to_string())
}

pub fn rank_log_name(rank: u64, timestamp: &DateTime<Utc>) -> String {
    format!(
        "Rank_{}_benchmark_{}.log",
        rank,
        timestamp.format(TIMESTAMP_FORMAT)
    )
}

/// Process count directories are named by digits only.
pub fn is_process_dir_name(name: &str) -> bool {
    !name.is_empty() && name.bytes().all(|b| b.is_ascii_digit())
}

/// Lists the process count directories directly under `root`, ordered by
/// process count. Entries that are not directories, or whose names are not
/// all digits, are skipped.
pub fn discover(root: &Path) -> Result<Vec<(u64, PathBuf)>, Error> {
    let entries = fs::read_dir(root).map_err(|e| Error::io(root, e))?;

    let mut dirs = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| Error::io(root, e))?;
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        let name = match entry.file_name().into_string() {
            Ok(name) => name,
            Err(_) => continue,
        };
        if !is_process_dir_name(&name) {
            trace!("skipping {}", path.display());
            continue;
        }
        match name.parse::<u64>() {
            Ok(procs) => dirs.push((procs, path)),
            Err(_) => warn!("process count out of range: {}", path.display()),
        }
    }

    dirs.sort_by_key(|(procs, _)| *procs);
    Ok(dirs)
}

/// Finds the log written by `rank` in a process count directory. When a rank
/// has logs from several runs the newest timestamp wins.
pub fn find_rank_log(dir: &Path, rank: u64) -> Result<PathBuf, Error> {
    let prefix = format!("Rank_{}_benchmark_", rank);

    let mut candidates = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| Error::io(dir, e))? {
        let entry = entry.map_err(|e| Error::io(dir, e))?;
        let name = entry.file_name();
        let name = name.to_string_lossy();
        if name.starts_with(&prefix) && name.ends_with(".log") && entry.path().is_file() {
            candidates.push(entry.path());
        }
    }

    candidates.sort();
    candidates
        .pop()
        .ok_or_else(|| Error::MissingRankLog(dir.to_path_buf()))
}
