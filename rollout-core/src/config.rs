//! Configuration of [`EnvironState`](crate::EnvironState).
use crate::{error::RolloutError, Device};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

/// When [`Environ::get_multi_episodes`] resets the environment.
///
/// [`Environ::get_multi_episodes`]: crate::Environ::get_multi_episodes
#[derive(Debug, Deserialize, Serialize, PartialEq, Eq, Clone, Copy)]
pub enum ResetPolicy {
    /// Every episode of a batch starts from a reset, so episodes are
    /// independent of each other.
    PerEpisode,

    /// The environment is reset once before the batch. Later episodes start
    /// from the state where the previous one ended and the observation
    /// history is kept across the batch.
    PerBatch,
}

impl Default for ResetPolicy {
    fn default() -> Self {
        ResetPolicy::PerEpisode
    }
}

/// Configuration of [`EnvironState`](crate::EnvironState).
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
#[serde(default)]
pub struct EnvironConfig {
    /// Name of the environment.
    pub name: String,

    /// Discount factor in `[0, 1]`.
    pub gamma: f32,

    /// Device of observations and actions.
    pub device: Device,

    /// Ceiling on the number of steps of a rollout. `None` means no ceiling.
    pub max_steps: Option<usize>,

    /// Random seed.
    pub seed: u64,

    /// Reset policy of multi-episode rollouts.
    pub reset_policy: ResetPolicy,
}

impl Default for EnvironConfig {
    fn default() -> Self {
        Self {
            name: "environ".to_string(),
            gamma: 0.9,
            device: Device::Cpu,
            max_steps: None,
            seed: 42,
            reset_policy: ResetPolicy::PerEpisode,
        }
    }
}

impl EnvironConfig {
    /// Sets the name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the discount factor.
    pub fn gamma(mut self, gamma: f32) -> Self {
        self.gamma = gamma;
        self
    }

    /// Sets the device.
    pub fn device(mut self, device: Device) -> Self {
        self.device = device;
        self
    }

    /// Sets the step ceiling of a rollout.
    pub fn max_steps(mut self, max_steps: Option<usize>) -> Self {
        self.max_steps = max_steps;
        self
    }

    /// Sets the random seed.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Sets the reset policy.
    pub fn reset_policy(mut self, reset_policy: ResetPolicy) -> Self {
        self.reset_policy = reset_policy;
        self
    }

    /// Checks the values.
    pub fn validate(&self) -> Result<(), RolloutError> {
        if !(0.0..=1.0).contains(&self.gamma) {
            return Err(RolloutError::GammaOutOfRange(self.gamma));
        }
        if self.max_steps == Some(0) {
            return Err(RolloutError::InvalidConfig(
                "max_steps must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Constructs [`EnvironConfig`] from YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b: Self = serde_yaml::from_reader(rdr)?;
        b.validate()?;
        Ok(b)
    }

    /// Saves [`EnvironConfig`].
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        Ok(())
    }
}
