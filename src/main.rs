// Copyright 2021 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#[macro_use]
extern crate log;

#[macro_use]
extern crate benchplot;

use benchplot::logger::{self, SimpleLogger};
use benchplot::options::{self, PlotOptions};
use benchplot::{Config, Error, Series};

use clap::{App, Arg, ArgMatches};

fn main() {
    let matches = App::new("benchplot")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Plots operations per second against process count for one log tree")
        .arg(
            Arg::with_name("LOGS")
                .help("root of the benchmark log tree")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::with_name("OUTPUT")
                .help("image to write (.png or .svg)")
                .required(true)
                .index(2),
        )
        .args(&options::plot())
        .arg(options::config())
        .arg(options::verbose())
        .get_matches();

    let level = logger::level(matches.occurrences_of("verbose"));
    if let Err(e) = SimpleLogger::new("benchplot", level).init() {
        eprintln!("failed to initialize log: {}", e);
    }

    if let Err(e) = run(&matches) {
        fatal!("{}", e);
    }
}

fn run(matches: &ArgMatches) -> Result<(), Error> {
    let config = Config::new(matches.value_of("config"))?;
    let options = PlotOptions::new(matches, config.plot());

    let logs = matches.value_of("LOGS").unwrap();
    let output = matches.value_of("OUTPUT").unwrap();

    let series = Series::from_logs(logs, options.total_ops, "")?;
    info!(
        "{}: {} process counts, peak {} ops/s",
        logs,
        series.points().len(),
        series.max_ops()
    );

    let mut chart = options.chart();
    chart.x_start(2).line(series);
    chart.render(output)?;

    info!("wrote {}", output);
    Ok(())
}
