// Copyright 2021 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Writes synthetic benchmark log trees.

use crate::config::GeneratorConfig;
use crate::layout;
use crate::{Error, Record};

use chrono::Utc;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// What a generator run wrote.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Summary {
    pub directories: u64,
    pub files: u64,
    /// Elapsed time recorded for the largest process count.
    pub elapsed: f64,
}

pub struct Generator {
    root: PathBuf,
    procs: u64,
    shift: u32,
    base: f64,
    rng: StdRng,
}

impl Generator {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self::from_config(&GeneratorConfig::default()).output(root)
    }

    pub fn from_config(config: &GeneratorConfig) -> Self {
        let rng = match config.seed() {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            root: config.output(),
            procs: config.procs(),
            shift: config.shift(),
            base: config.base(),
            rng,
        }
    }

    pub fn output(mut self, root: impl AsRef<Path>) -> Self {
        self.root = root.as_ref().to_path_buf();
        self
    }

    pub fn procs(mut self, procs: u64) -> Self {
        self.procs = procs;
        self
    }

    pub fn shift(mut self, shift: u32) -> Self {
        self.shift = shift;
        self
    }

    pub fn base(mut self, base: f64) -> Self {
        self.base = base;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Next elapsed time increment: the base step scaled by a random factor in
    /// `1 - shift ..= 1 + shift`, or 1 when that is not positive.
    fn delta(&mut self) -> f64 {
        let shift = i64::from(self.shift);
        let k: i64 = self.rng.gen_range(-shift..=shift);
        let value = (1 + k) as f64 * self.base;
        if value > 0.0 {
            value
        } else {
            1.0
        }
    }

    /// Writes the whole tree. Each process count directory must not exist
    /// yet; the first one that does aborts the run.
    pub fn run(&mut self) -> Result<Summary, Error> {
        fs::create_dir_all(&self.root).map_err(|e| Error::io(&self.root, e))?;

        let mut summary = Summary {
            directories: 0,
            files: 0,
            elapsed: 0.0,
        };

        for procs in 1..=self.procs {
            let dir = layout::process_dir(&self.root, procs);
            fs::create_dir(&dir).map_err(|e| match e.kind() {
                ErrorKind::AlreadyExists => Error::OutputExists(dir.clone()),
                _ => Error::io(&dir, e),
            })?;
            summary.directories += 1;

            summary.elapsed += self.delta();

            for rank in 0..procs {
                let record = Record::new(procs, rank, summary.elapsed, summary.elapsed);
                let path = dir.join(layout::rank_log_name(rank, &Utc::now()));
                fs::write(&path, record.to_string()).map_err(|e| Error::io(&path, e))?;
                summary.files += 1;
            }

            debug!(
                "procs: {} elapsed: {} dir: {}",
                procs,
                summary.elapsed,
                dir.display()
            );
        }

        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Parser;

    fn read_rank_log(root: &Path, procs: u64, rank: u64) -> String {
        let dir = layout::process_dir(root, procs);
        let path = layout::find_rank_log(&dir, rank).unwrap();
        fs::read_to_string(path).unwrap()
    }

    #[test]
    fn tree_shape() {
        let tmp = tempfile::tempdir().unwrap();
        let summary = Generator::new(tmp.path()).procs(4).seed(7).run().unwrap();

        assert_eq!(summary.directories, 4);
        assert_eq!(summary.files, 1 + 2 + 3 + 4);

        for procs in 1..=4 {
            let dir = layout::process_dir(tmp.path(), procs);
            assert_eq!(fs::read_dir(&dir).unwrap().count() as u64, procs);
        }
    }

    #[test]
    fn record_content() {
        let tmp = tempfile::tempdir().unwrap();
        let summary = Generator::new(tmp.path())
            .procs(1)
            .shift(0)
            .base(10.1)
            .run()
            .unwrap();

        assert_eq!(summary.elapsed, 10.1);
        assert_eq!(
            read_rank_log(tmp.path(), 1, 0),
            "procs 1, rank 0, elapsed (sec) 10.1, total (sec) 10.1"
        );
    }

    #[test]
    fn ranks_share_value() {
        let tmp = tempfile::tempdir().unwrap();
        Generator::new(tmp.path()).procs(3).seed(1).run().unwrap();

        let parser = Parser::new();
        let first = parser.parse(&read_rank_log(tmp.path(), 3, 0)).unwrap();
        for rank in 1..3 {
            let other = parser.parse(&read_rank_log(tmp.path(), 3, rank)).unwrap();
            assert_eq!(other.rank, rank);
            assert_eq!(other.procs, 3);
            assert_eq!(other.total, first.total);
            assert_eq!(other.elapsed, first.elapsed);
        }
    }

    #[test]
    fn elapsed_grows() {
        let tmp = tempfile::tempdir().unwrap();
        Generator::new(tmp.path()).procs(20).seed(3).run().unwrap();

        let parser = Parser::new();
        let mut previous = 0.0;
        for procs in 1..=20 {
            let record = parser.parse(&read_rank_log(tmp.path(), procs, 0)).unwrap();
            assert!(record.total - previous >= 1.0 - 1e-9);
            previous = record.total;
        }
    }

    #[test]
    fn seeded_runs_match() {
        let a = tempfile::tempdir().unwrap();
        let b = tempfile::tempdir().unwrap();
        let first = Generator::new(a.path()).procs(10).seed(42).run().unwrap();
        let second = Generator::new(b.path()).procs(10).seed(42).run().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn deltas_floor_at_one() {
        let mut generator = Generator::new("unused").shift(5).base(10.1).seed(9);
        for _ in 0..1000 {
            let delta = generator.delta();
            assert!(delta >= 1.0);
            assert!(delta <= 6.0 * 10.1 + 1e-9);
        }
    }

    #[test]
    fn existing_tree() {
        let tmp = tempfile::tempdir().unwrap();
        Generator::new(tmp.path()).procs(2).seed(5).run().unwrap();
        let before = read_rank_log(tmp.path(), 2, 1);

        match Generator::new(tmp.path()).procs(2).seed(6).run() {
            Err(Error::OutputExists(dir)) => assert_eq!(dir, tmp.path().join("1")),
            other => panic!("unexpected: {:?}", other),
        }
        assert_eq!(read_rank_log(tmp.path(), 2, 1), before);
    }

    #[test]
    fn creates_missing_root() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("data").join("centralized");
        Generator::new(&root).procs(1).seed(0).run().unwrap();
        assert!(layout::process_dir(&root, 1).is_dir());
    }
}
