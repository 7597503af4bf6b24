// Copyright 2021 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use benchplot::layout;
use benchplot::record::Parser;
use benchplot::{ops_per_second, Generator, Series};

use std::fs;
use std::process::Command;

#[test]
fn generated_totals_survive_extraction() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path().join("decentralized");
    let summary = Generator::new(&root).procs(12).seed(2021).run().unwrap();

    let series = Series::from_logs(&root, 15_000, "decentralized").unwrap();
    assert_eq!(series.points().len(), 12);
    assert_eq!(series.max_procs(), 12);

    let parser = Parser::new();
    for (point, (procs, dir)) in series
        .points()
        .iter()
        .zip(layout::discover(&root).unwrap())
    {
        assert_eq!(point.procs, procs);
        let log = fs::read_to_string(layout::find_rank_log(&dir, 0).unwrap()).unwrap();
        let record = parser.parse(&log).unwrap();
        assert_eq!(record.procs, procs);
        assert_eq!(point.ops, ops_per_second(15_000, record.total).unwrap());
    }

    let last = series.points().last().unwrap();
    assert_eq!(last.ops, ops_per_second(15_000, summary.elapsed).unwrap());
}

#[test]
fn throughput_falls_as_elapsed_grows() {
    let tmp = tempfile::tempdir().unwrap();
    Generator::new(tmp.path()).procs(30).seed(7).run().unwrap();

    let series = Series::from_logs(tmp.path(), 15_000, "").unwrap();
    for pair in series.points().windows(2) {
        assert!(pair[1].ops <= pair[0].ops);
    }
}

#[test]
fn generator_binary() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path().join("centralized");

    let status = Command::new(env!("CARGO_BIN_EXE_benchplot-gen"))
        .args(&["--procs", "3", "--seed", "1", "--output"])
        .arg(&root)
        .status()
        .unwrap();
    assert!(status.success());

    let found: Vec<u64> = layout::discover(&root)
        .unwrap()
        .into_iter()
        .map(|(procs, _)| procs)
        .collect();
    assert_eq!(found, vec![1, 2, 3]);

    // a second run into the same tree must fail
    let status = Command::new(env!("CARGO_BIN_EXE_benchplot-gen"))
        .args(&["--procs", "3", "--output"])
        .arg(&root)
        .status()
        .unwrap();
    assert_eq!(status.code(), Some(1));
}

#[test]
fn plot_binary_missing_tree() {
    let tmp = tempfile::tempdir().unwrap();

    let status = Command::new(env!("CARGO_BIN_EXE_benchplot"))
        .arg(tmp.path().join("missing"))
        .arg(tmp.path().join("out.png"))
        .status()
        .unwrap();
    assert_eq!(status.code(), Some(1));
    assert!(!tmp.path().join("out.png").exists());
}

#[test]
fn compare_binary_requires_paths() {
    let output = Command::new(env!("CARGO_BIN_EXE_benchplot-compare"))
        .arg("only-one")
        .output()
        .unwrap();
    assert!(!output.status.success());
}

#[test]
fn plot_binary_renders_generated_tree() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path().join("decentralized");
    Generator::new(&root).procs(6).seed(11).run().unwrap();

    for name in &["single.png", "single.svg"] {
        let output = tmp.path().join(name);
        let status = Command::new(env!("CARGO_BIN_EXE_benchplot"))
            .arg(&root)
            .arg(&output)
            .args(&["--total-ops", "15000", "--x-step", "2"])
            .status()
            .unwrap();
        assert!(status.success());
        assert!(fs::metadata(&output).unwrap().len() > 0);
    }
}

#[test]
fn compare_binary_renders_generated_trees() {
    let tmp = tempfile::tempdir().unwrap();
    let centralized = tmp.path().join("centralized");
    let decentralized = tmp.path().join("decentralized");
    Generator::new(&centralized).procs(5).seed(1).run().unwrap();
    Generator::new(&decentralized).procs(5).seed(2).run().unwrap();

    for name in &["compare.png", "compare.svg"] {
        let output = tmp.path().join(name);
        let status = Command::new(env!("CARGO_BIN_EXE_benchplot-compare"))
            .arg(&centralized)
            .arg(&decentralized)
            .arg(&output)
            .status()
            .unwrap();
        assert!(status.success());
        assert!(fs::metadata(&output).unwrap().len() > 0);
    }
}
