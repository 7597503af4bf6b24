// Copyright 2021 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Operations-per-second series extracted from a benchmark log tree.

use crate::layout;
use crate::record::Parser;
use crate::Error;

use std::fs;
use std::path::Path;

/// Whole operations per second, rounded down. `None` when the time is not
/// positive.
pub fn ops_per_second(total_ops: u64, total_time: f64) -> Option<u64> {
    if total_time > 0.0 {
        Some((total_ops as f64 / total_time).floor() as u64)
    } else {
        None
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Point {
    pub procs: u64,
    pub ops: u64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Series {
    label: String,
    points: Vec<Point>,
}

impl Series {
    pub fn new(label: impl AsRef<str>, points: Vec<Point>) -> Self {
        Self {
            label: label.as_ref().to_owned(),
            points,
        }
    }

    /// Reads the rank 0 log of every process count directory under `root`
    /// and converts its total time to operations per second.
    pub fn from_logs(
        root: impl AsRef<Path>,
        total_ops: u64,
        label: impl AsRef<str>,
    ) -> Result<Self, Error> {
        let root = root.as_ref();
        let parser = Parser::new();

        let dirs = layout::discover(root)?;
        if dirs.is_empty() {
            return Err(Error::EmptyTree(root.to_path_buf()));
        }

        let mut points = Vec::with_capacity(dirs.len());
        for (procs, dir) in dirs {
            let path = layout::find_rank_log(&dir, 0)?;
            let content = fs::read_to_string(&path).map_err(|e| Error::io(&path, e))?;
            let record = parser.parse(&content).ok_or_else(|| Error::MalformedRecord {
                path: path.clone(),
                line: content.trim().to_owned(),
            })?;
            let ops = ops_per_second(total_ops, record.total).ok_or(Error::ZeroTotal(path))?;
            trace!("procs: {} total: {} ops: {}", procs, record.total, ops);
            points.push(Point { procs, ops });
        }

        debug!("{}: {} points from {}", label.as_ref(), points.len(), root.display());

        Ok(Self::new(label, points))
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn max_procs(&self) -> u64 {
        self.points.iter().map(|p| p.procs).max().unwrap_or(0)
    }

    pub fn max_ops(&self) -> u64 {
        self.points.iter().map(|p| p.ops).max().unwrap_or(0)
    }
}
