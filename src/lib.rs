// Copyright 2021 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Synthetic benchmark log generation and throughput plotting.
//!
//! A benchmark run leaves one log directory per process count, each holding
//! one single-line log per rank. The generator writes such trees with
//! randomized timings, and the plotters turn the rank 0 logs of one or two
//! trees into operations-per-second charts.

#[macro_use]
extern crate log;

#[macro_use]
mod macros;

pub mod config;
mod error;
pub mod generator;
pub mod layout;
pub mod logger;
pub mod options;
pub mod plot;
pub mod record;
pub mod throughput;

pub use crate::config::Config;
pub use crate::error::Error;
pub use crate::generator::{Generator, Summary};
pub use crate::plot::{Chart, Marker};
pub use crate::record::Record;
pub use crate::throughput::{ops_per_second, Point, Series};
