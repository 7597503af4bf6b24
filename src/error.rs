// Copyright 2021 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("{path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("output directory already exists: {0}")]
    OutputExists(PathBuf),

    #[error("no rank 0 log in {0}")]
    MissingRankLog(PathBuf),

    #[error("{path}: malformed record: {line:?}")]
    MalformedRecord { path: PathBuf, line: String },

    #[error("{0}: total time is zero")]
    ZeroTotal(PathBuf),

    #[error("no process count directories under {0}")]
    EmptyTree(PathBuf),

    #[error("failed to parse config {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to render chart: {0}")]
    Plot(String),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}
