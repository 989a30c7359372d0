//! Configuration of [`Frozenlake`](super::Frozenlake).
use anyhow::Result;
use rollout_core::EnvironConfig;
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

/// Configuration of [`Frozenlake`](super::Frozenlake).
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct FrozenlakeConfig {
    /// Common configuration of environments.
    pub environ: EnvironConfig,

    /// Relative weights of moving forward, turning left and turning right
    /// when the floor is rough.
    pub slip_weights: [f32; 3],

    /// Start with a rough floor.
    pub rough: bool,

    /// The number of moves after which an episode ends.
    pub max_epoch: usize,
}

impl Default for FrozenlakeConfig {
    fn default() -> Self {
        Self {
            environ: EnvironConfig::default().name("Frozenlake"),
            slip_weights: [1.0, 0.2, 0.2],
            rough: false,
            max_epoch: 100,
        }
    }
}

impl FrozenlakeConfig {
    /// Sets the slip weights.
    pub fn slip_weights(mut self, slip_weights: [f32; 3]) -> Self {
        self.slip_weights = slip_weights;
        self
    }

    /// Sets if the floor is rough at the beginning.
    pub fn rough(mut self, rough: bool) -> Self {
        self.rough = rough;
        self
    }

    /// Sets the number of moves after which an episode ends.
    pub fn max_epoch(mut self, max_epoch: usize) -> Self {
        self.max_epoch = max_epoch;
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

    /// Constructs [`FrozenlakeConfig`] from YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        Ok(b)
    }

    /// Saves [`FrozenlakeConfig`].
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        Ok(())
    }
}
