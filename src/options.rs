// Copyright 2021 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Command line arguments shared between the tools.

use crate::config::PlotConfig;
use crate::Chart;

use clap::{Arg, ArgMatches};

use std::str::FromStr;

pub fn config() -> Arg<'static, 'static> {
    Arg::with_name("config")
        .long("config")
        .value_name("FILE")
        .help("TOML config file")
        .takes_value(true)
}

pub fn verbose() -> Arg<'static, 'static> {
    Arg::with_name("verbose")
        .short("v")
        .long("verbose")
        .help("verbosity (stacking)")
        .multiple(true)
}

/// Flags understood by both plotters.
pub fn plot() -> Vec<Arg<'static, 'static>> {
    vec![
        Arg::with_name("total-ops")
            .long("total-ops")
            .short("o")
            .visible_alias("total_ops")
            .value_name("INT")
            .help("operations performed by each benchmark run [default: 15000]")
            .takes_value(true)
            .validator(positive),
        Arg::with_name("x-step")
            .long("x-step")
            .visible_alias("x_step")
            .value_name("INT")
            .help("process count distance between x axis labels [default: 1]")
            .takes_value(true)
            .validator(positive),
        Arg::with_name("caption")
            .long("caption")
            .value_name("TEXT")
            .help("chart title")
            .takes_value(true),
        Arg::with_name("x-desc")
            .long("x-desc")
            .value_name("TEXT")
            .help("x axis description")
            .takes_value(true),
        Arg::with_name("y-desc")
            .long("y-desc")
            .value_name("TEXT")
            .help("y axis description")
            .takes_value(true),
        Arg::with_name("width")
            .long("width")
            .value_name("PIXELS")
            .help("image width [default: 1080]")
            .takes_value(true)
            .validator(positive),
        Arg::with_name("height")
            .long("height")
            .value_name("PIXELS")
            .help("image height [default: 720]")
            .takes_value(true)
            .validator(positive),
    ]
}

fn positive(value: String) -> Result<(), String> {
    match value.parse::<u64>() {
        Ok(v) if v > 0 => Ok(()),
        _ => Err(format!("expected a positive integer, got '{}'", value)),
    }
}

/// Parses a flag value, falling back to `default` when the flag is absent.
/// Values that do not parse are fatal.
pub fn value_or<T: FromStr>(matches: &ArgMatches, name: &str, default: T) -> T {
    match matches.value_of(name) {
        Some(v) => match v.parse() {
            Ok(v) => v,
            Err(_) => fatal!("invalid value for '{}': {}", name, v),
        },
        None => default,
    }
}

/// Plot settings after applying command line overrides to the config file.
pub struct PlotOptions {
    pub total_ops: u64,
    pub x_step: u64,
    pub size: (u32, u32),
    pub caption: Option<String>,
    pub x_desc: Option<String>,
    pub y_desc: Option<String>,
}

impl PlotOptions {
    pub fn new(matches: &ArgMatches, config: &PlotConfig) -> Self {
        let (width, height) = config.size();
        Self {
            total_ops: value_or(matches, "total-ops", config.total_ops()),
            x_step: value_or(matches, "x-step", config.x_step()),
            size: (
                value_or(matches, "width", width),
                value_or(matches, "height", height),
            ),
            caption: matches
                .value_of("caption")
                .map(str::to_owned)
                .or_else(|| config.caption()),
            x_desc: matches.value_of("x-desc").map(str::to_owned),
            y_desc: matches.value_of("y-desc").map(str::to_owned),
        }
    }

    /// A chart carrying these options and no series yet.
    pub fn chart(&self) -> Chart {
        let mut chart = Chart::new();
        chart.size(self.size).x_step(self.x_step);
        if let Some(caption) = &self.caption {
            chart.caption(caption);
        }
        if let Some(x_desc) = &self.x_desc {
            chart.x_desc(x_desc);
        }
        if let Some(y_desc) = &self.y_desc {
            chart.y_desc(y_desc);
        }
        chart
    }
}
