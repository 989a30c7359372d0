//! Environment step.
use super::{Action, Observation, Reward};

/// Represents an action, observation and reward tuple `(a_t, o_t+1, r_t)`
/// with flags telling if the episode ended at this step.
///
/// An environment emits a [`Step`] object at every interaction tick.
#[derive(Clone, Debug, PartialEq)]
pub struct Step {
    /// Action.
    pub act: Action,

    /// Observation resulting from the action.
    pub obs: Observation,

    /// Reward.
    pub reward: Reward,

    /// Flag denoting if the environment reported completion.
    pub is_terminated: bool,

    /// Flag denoting if the episode was cut by the step ceiling.
    pub is_truncated: bool,
}

impl Step {
    /// Constructs a [`Step`] object.
    pub fn new(
        act: Action,
        obs: Observation,
        reward: Reward,
        is_terminated: bool,
        is_truncated: bool,
    ) -> Self {
        Step {
            act,
            obs,
            reward,
            is_terminated,
            is_truncated,
        }
    }

    #[inline]
    /// Terminated or truncated.
    pub fn is_done(&self) -> bool {
        self.is_terminated || self.is_truncated
    }
}
