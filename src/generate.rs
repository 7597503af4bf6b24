// Copyright 2021 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#[macro_use]
extern crate log;

#[macro_use]
extern crate benchplot;

use benchplot::logger::{self, SimpleLogger};
use benchplot::options::{self, value_or};
use benchplot::{Config, Error, Generator};

use clap::{App, Arg, ArgMatches};

fn main() {
    let matches = App::new("benchplot-gen")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Generates a synthetic benchmark log tree")
        .arg(
            Arg::with_name("procs")
                .long("procs")
                .value_name("INT")
                .help("largest process count [default: 72]")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("output")
                .long("output")
                .value_name("DIR")
                .help("root of the log tree [default: data/decentralized/producer_consumer_0]")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("shift")
                .long("shift")
                .value_name("INT")
                .help("bound of the random step multiplier [default: 5]")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("base")
                .long("base")
                .value_name("FLOAT")
                .help("base elapsed time step in seconds [default: 10.1]")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("seed")
                .long("seed")
                .value_name("INT")
                .help("seed for reproducible output")
                .takes_value(true),
        )
        .arg(options::config())
        .arg(options::verbose())
        .get_matches();

    let level = logger::level(matches.occurrences_of("verbose"));
    if let Err(e) = SimpleLogger::new("benchplot-gen", level).init() {
        eprintln!("failed to initialize log: {}", e);
    }

    if let Err(e) = run(&matches) {
        fatal!("{}", e);
    }
}

fn run(matches: &ArgMatches) -> Result<(), Error> {
    let config = Config::new(matches.value_of("config"))?;
    let defaults = config.generator();

    let mut generator = Generator::from_config(defaults)
        .procs(value_or(matches, "procs", defaults.procs()))
        .shift(value_or(matches, "shift", defaults.shift()))
        .base(value_or(matches, "base", defaults.base()));
    if let Some(output) = matches.value_of("output") {
        generator = generator.output(output);
    }
    if matches.is_present("seed") {
        generator = generator.seed(value_or(matches, "seed", 0));
    }

    info!("generating logs under {}", generator.root().display());
    let summary = generator.run()?;
    info!(
        "wrote {} directories, {} files, final elapsed {} sec",
        summary.directories, summary.files, summary.elapsed
    );

    Ok(())
}
