// Copyright 2021 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#[macro_use]
extern crate log;

#[macro_use]
extern crate benchplot;

use benchplot::logger::{self, SimpleLogger};
use benchplot::options::{self, PlotOptions};
use benchplot::{Config, Error, Marker, Series};

use clap::{App, Arg, ArgMatches};

fn main() {
    let matches = App::new("benchplot-compare")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Plots centralized and decentralized stack throughput on one chart")
        .arg(
            Arg::with_name("CENTRALIZED")
                .help("log tree of the centralized stack runs")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::with_name("DECENTRALIZED")
                .help("log tree of the decentralized stack runs")
                .required(true)
                .index(2),
        )
        .arg(
            Arg::with_name("OUTPUT")
                .help("image to write (.png or .svg)")
                .required(true)
                .index(3),
        )
        .arg(
            Arg::with_name("centralized-label")
                .long("centralized-label")
                .value_name("TEXT")
                .help("legend entry for the centralized series")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("decentralized-label")
                .long("decentralized-label")
                .value_name("TEXT")
                .help("legend entry for the decentralized series")
                .takes_value(true),
        )
        .args(&options::plot())
        .arg(options::config())
        .arg(options::verbose())
        .get_matches();

    let level = logger::level(matches.occurrences_of("verbose"));
    if let Err(e) = SimpleLogger::new("benchplot-compare", level).init() {
        eprintln!("failed to initialize log: {}", e);
    }

    if let Err(e) = run(&matches) {
        fatal!("{}", e);
    }
}

fn run(matches: &ArgMatches) -> Result<(), Error> {
    let config = Config::new(matches.value_of("config"))?;
    let options = PlotOptions::new(matches, config.plot());

    let centralized_label = matches
        .value_of("centralized-label")
        .map(str::to_owned)
        .unwrap_or_else(|| config.plot().centralized_label());
    let decentralized_label = matches
        .value_of("decentralized-label")
        .map(str::to_owned)
        .unwrap_or_else(|| config.plot().decentralized_label());

    let centralized = Series::from_logs(
        matches.value_of("CENTRALIZED").unwrap(),
        options.total_ops,
        centralized_label,
    )?;
    let decentralized = Series::from_logs(
        matches.value_of("DECENTRALIZED").unwrap(),
        options.total_ops,
        decentralized_label,
    )?;

    for series in &[&centralized, &decentralized] {
        info!(
            "{}: {} process counts, peak {} ops/s",
            series.label(),
            series.points().len(),
            series.max_ops()
        );
    }
    if centralized.max_procs() != decentralized.max_procs() {
        warn!(
            "process counts differ: {} vs {}",
            centralized.max_procs(),
            decentralized.max_procs()
        );
    }

    let output = matches.value_of("OUTPUT").unwrap();

    let mut chart = options.chart();
    chart
        .dashed(centralized, Marker::Circle)
        .dashed(decentralized, Marker::Square);
    chart.render(output)?;

    info!("wrote {}", output);
    Ok(())
}
