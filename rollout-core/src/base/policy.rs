//! Policy.
use super::{Action, Observation, Space};
use rand::{rngs::SmallRng, SeedableRng};

/// A policy on an environment.
///
/// Policy is a mapping from an observation to an action.
/// The mapping can be either of deterministic or stochastic.
pub trait Policy {
    /// Predicts an action given an observation.
    fn predict_action(&mut self, obs: &Observation) -> Action;
}

impl<F: FnMut(&Observation) -> Action> Policy for F {
    fn predict_action(&mut self, obs: &Observation) -> Action {
        self(obs)
    }
}

/// Ignores observations and samples actions uniformly from a space.
#[derive(Debug, Clone)]
pub struct RandomPolicy<S: Space> {
    space: S,
    rng: SmallRng,
}

impl<S: Space> RandomPolicy<S> {
    /// Constructs the policy.
    pub fn new(space: S, seed: u64) -> Self {
        Self {
            space,
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl<S: Space> Policy for RandomPolicy<S> {
    fn predict_action(&mut self, _obs: &Observation) -> Action {
        Action::new(self.space.sample(&mut self.rng))
    }
}
