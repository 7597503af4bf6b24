// Copyright 2021 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Optional TOML configuration shared by all three tools.
//!
//! ```toml
//! [generator]
//! procs = 72
//! output = "data/decentralized/producer_consumer_0"
//! shift = 5
//! base = 10.1
//!
//! [plot]
//! total_ops = 15000
//! x_step = 4
//! ```
//!
//! Every field is optional. Command line flags take precedence.

use crate::Error;

use serde_derive::*;

use std::path::{Path, PathBuf};

fn default_procs() -> u64 {
    72
}

fn default_output() -> PathBuf {
    PathBuf::from("data/decentralized/producer_consumer_0")
}

fn default_shift() -> u32 {
    5
}

fn default_base() -> f64 {
    10.1
}

fn default_total_ops() -> u64 {
    15_000
}

fn one() -> u64 {
    1
}

fn default_width() -> u32 {
    1080
}

fn default_height() -> u32 {
    720
}

fn default_centralized_label() -> String {
    "centralized stack".to_owned()
}

fn default_decentralized_label() -> String {
    "decentralized stack".to_owned()
}

#[derive(Deserialize, Default, Clone, Debug)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    generator: GeneratorConfig,
    #[serde(default)]
    plot: PlotConfig,
}

impl Config {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        toml::from_str(&content).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Loads the file if one is given, otherwise returns the defaults.
    pub fn new(path: Option<&str>) -> Result<Self, Error> {
        match path {
            Some(path) => Self::load_from_file(path),
            None => Ok(Self::default()),
        }
    }

    pub fn generator(&self) -> &GeneratorConfig {
        &self.generator
    }

    pub fn plot(&self) -> &PlotConfig {
        &self.plot
    }
}

#[derive(Deserialize, Clone, Debug)]
#[serde(deny_unknown_fields)]
pub struct GeneratorConfig {
    #[serde(default = "default_procs")]
    procs: u64,
    #[serde(default = "default_output")]
    output: PathBuf,
    #[serde(default = "default_shift")]
    shift: u32,
    #[serde(default = "default_base")]
    base: f64,
    seed: Option<u64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            procs: default_procs(),
            output: default_output(),
            shift: default_shift(),
            base: default_base(),
            seed: None,
        }
    }
}

impl GeneratorConfig {
    /// Largest process count to generate.
    pub fn procs(&self) -> u64 {
        self.procs
    }

    pub fn output(&self) -> PathBuf {
        self.output.clone()
    }

    /// Bound of the symmetric random factor applied to each step.
    pub fn shift(&self) -> u32 {
        self.shift
    }

    pub fn base(&self) -> f64 {
        self.base
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }
}

#[derive(Deserialize, Clone, Debug)]
#[serde(deny_unknown_fields)]
pub struct PlotConfig {
    #[serde(default = "default_total_ops")]
    total_ops: u64,
    #[serde(default = "one")]
    x_step: u64,
    #[serde(default = "default_width")]
    width: u32,
    #[serde(default = "default_height")]
    height: u32,
    caption: Option<String>,
    #[serde(default = "default_centralized_label")]
    centralized_label: String,
    #[serde(default = "default_decentralized_label")]
    decentralized_label: String,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            total_ops: default_total_ops(),
            x_step: one(),
            width: default_width(),
            height: default_height(),
            caption: None,
            centralized_label: default_centralized_label(),
            decentralized_label: default_decentralized_label(),
        }
    }
}

impl PlotConfig {
    /// Operations each benchmark run performed in total.
    pub fn total_ops(&self) -> u64 {
        self.total_ops
    }

    pub fn x_step(&self) -> u64 {
        self.x_step
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn caption(&self) -> Option<String> {
        self.caption.clone()
    }

    pub fn centralized_label(&self) -> String {
        self.centralized_label.clone()
    }

    pub fn decentralized_label(&self) -> String {
        self.decentralized_label.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::new(None).unwrap();
        assert_eq!(config.generator().procs(), 72);
        assert_eq!(config.generator().shift(), 5);
        assert_eq!(config.generator().base(), 10.1);
        assert_eq!(config.generator().seed(), None);
        assert_eq!(config.plot().total_ops(), 15_000);
        assert_eq!(config.plot().x_step(), 1);
        assert_eq!(config.plot().size(), (1080, 720));
    }

    #[test]
    fn partial_file() {
        let config: Config = toml::from_str(
            r#"
            [generator]
            procs = 8
            seed = 11

            [plot]
            x_step = 4
            caption = "producer/consumer"
            "#,
        )
        .unwrap();
        assert_eq!(config.generator().procs(), 8);
        assert_eq!(config.generator().seed(), Some(11));
        assert_eq!(config.generator().shift(), 5);
        assert_eq!(config.plot().x_step(), 4);
        assert_eq!(config.plot().total_ops(), 15_000);
        assert_eq!(config.plot().caption().as_deref(), Some("producer/consumer"));
    }

    #[test]
    fn unknown_field() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("bad.toml");
        std::fs::write(&path, "[plot]\nthreads = 4\n").unwrap();
        match Config::load_from_file(&path) {
            Err(Error::Config { .. }) => {}
            other => panic!("unexpected: {:?}", other),
        }
    }
}
