//! Default implementation of the [`Evaluator`] trait.
use super::Evaluator;
use crate::{record::Record, Environ, Policy};
use anyhow::Result;

/// Runs a fixed number of episodes on its own environment and reports the
/// mean of their realized returns as `"Episode return"`.
///
/// ```ignore
/// let mut evaluator = DefaultEvaluator::<KArmedBandit>::new(&config, 20)?;
/// let record = evaluator.evaluate(&mut policy)?;
/// println!("Average return: {}", record.get_scalar("Episode return")?);
/// ```
pub struct DefaultEvaluator<E: Environ> {
    n_episodes: usize,
    env: E,
}

impl<E: Environ> Evaluator for DefaultEvaluator<E> {
    fn evaluate<P: Policy + ?Sized>(&mut self, policy: &mut P) -> Result<Record> {
        let episodes = self.env.get_multi_episodes(policy, self.n_episodes)?;
        let r_total: f32 = episodes
            .iter()
            .filter_map(|e| e.sum_reward())
            .map(|r| r.value())
            .sum();
        let n = episodes.len().max(1) as f32;
        Ok(Record::from_scalar("Episode return", r_total / n))
    }
}

impl<E: Environ> DefaultEvaluator<E> {
    /// Constructs a new [`DefaultEvaluator`] with an environment built from
    /// `config`.
    pub fn new(config: &E::Config, n_episodes: usize) -> Result<Self> {
        Ok(Self {
            n_episodes,
            env: E::build(config)?,
        })
    }

    /// The environment used for evaluation.
    pub fn env(&self) -> &E {
        &self.env
    }

    /// Mutable access to the environment used for evaluation.
    pub fn env_mut(&mut self) -> &mut E {
        &mut self.env
    }
}
