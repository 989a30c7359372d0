//! Multi-armed bandit.
mod config;
use anyhow::{bail, Result};
pub use config::KArmedBanditConfig;
use log::info;
use ndarray::{ArrayD, IxDyn};
use rand::Rng;
use rollout_core::{
    Action, BoxSpace, Discrete, Environ, EnvironState, Episode, Observation, Reward, Space,
};

/// A multi-armed bandit with Bernoulli-distributed arm rewards.
///
/// The action is the index of the arm to pull. The observation is
/// `[arm, win]`, where `win` is 1 if the pull succeeded and 0 otherwise, and
/// the reward is `win`. An episode consists of a fixed number of pulls and
/// its return is the undiscounted number of wins.
pub struct KArmedBandit {
    state: EnvironState<Discrete, BoxSpace>,
    probs: Vec<f64>,
    episode_len: usize,
}

impl KArmedBandit {
    /// Success probability of each arm.
    pub fn probs(&self) -> &[f64] {
        &self.probs
    }

    /// The number of pulls in an episode.
    pub fn episode_len(&self) -> usize {
        self.episode_len
    }

    /// The largest return an episode can have, obtained when every pull
    /// succeeds.
    pub fn max_return(&self) -> f32 {
        self.episode_len as f32
    }

    /// Expected return of always pulling the best arm.
    pub fn best_expected_return(&self) -> f32 {
        let best = self.probs.iter().copied().fold(0.0, f64::max);
        (best * self.episode_len as f64) as f32
    }
}

impl Environ for KArmedBandit {
    type Config = KArmedBanditConfig;
    type ActSpace = Discrete;
    type ObsSpace = BoxSpace;

    fn build(config: &Self::Config) -> Result<Self> {
        if config.probs.is_empty() {
            bail!("KArmedBandit requires at least one arm");
        }
        if let Some(p) = config.probs.iter().find(|p| !(0.0..=1.0).contains(*p)) {
            bail!("Success probability must be in [0, 1], got {}", p);
        }

        let k = config.probs.len();
        let high = vec![(k - 1).max(1) as f32, 1.0];
        let observation_space = BoxSpace::new(
            ArrayD::zeros(IxDyn(&[2])),
            ArrayD::from_shape_vec(IxDyn(&[2]), high)?,
        );
        let state =
            EnvironState::with_spaces(&config.environ, Discrete::new(k), observation_space)?;
        info!("Built {} with probabilities {:?}", state.name(), config.probs);

        Ok(Self {
            state,
            probs: config.probs.clone(),
            episode_len: config.episode_len,
        })
    }

    fn state(&self) -> &EnvironState<Discrete, BoxSpace> {
        &self.state
    }

    fn state_mut(&mut self) -> &mut EnvironState<Discrete, BoxSpace> {
        &mut self.state
    }

    fn update(&mut self, act: &Action) -> Result<Observation> {
        self.state.action_space()?.check(act.value())?;
        let arm = act.index().unwrap_or(0);
        let win = self.state.rng_mut().gen_bool(self.probs[arm]);
        Ok(Observation::from_slice(&[arm as f32, win as u8 as f32]))
    }

    fn get_reward(&self, obs: &Observation) -> Reward {
        Reward::new(obs.value().iter().nth(1).copied().unwrap_or(0.0))
    }

    fn is_complete(&self, epoch: usize) -> bool {
        epoch >= self.episode_len
    }

    fn discount_reward(&self, _episode: &Episode, _gamma: f32) -> f32 {
        1.0
    }
}
