//! Configuration of [`KArmedBandit`](super::KArmedBandit).
use anyhow::Result;
use rollout_core::EnvironConfig;
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

/// Configuration of [`KArmedBandit`](super::KArmedBandit).
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct KArmedBanditConfig {
    /// Common configuration of environments.
    pub environ: EnvironConfig,

    /// Success probability of each arm.
    pub probs: Vec<f64>,

    /// The number of pulls in an episode.
    pub episode_len: usize,
}

impl Default for KArmedBanditConfig {
    fn default() -> Self {
        Self {
            environ: EnvironConfig::default().name("KArmedBandit"),
            probs: vec![0.4, 0.85, 0.75, 0.75],
            episode_len: 20,
        }
    }
}

impl KArmedBanditConfig {
    /// Sets the success probabilities.
    pub fn probs(mut self, probs: Vec<f64>) -> Self {
        self.probs = probs;
        self
    }

    /// Sets the number of pulls in an episode.
    pub fn episode_len(mut self, episode_len: usize) -> Self {
        self.episode_len = episode_len;
        self
    }

    /// Sets the discount factor.
    pub fn gamma(mut self, gamma: f32) -> Self {
        self.environ = self.environ.gamma(gamma);
        self
    }

    /// Sets the random seed.
    pub fn seed(mut self, seed: u64) -> Self {
        self.environ = self.environ.seed(seed);
        self
    }

    /// Constructs [`KArmedBanditConfig`] from YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        Ok(b)
    }

    /// Saves [`KArmedBanditConfig`].
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        Ok(())
    }
}
