//! Trajectory of steps.
use super::{Action, Reward, Step};
use crate::record::{Record, RecordValue};

/// Ordered sequence of [`Step`]s produced during one rollout.
///
/// Steps are kept in temporal order and never reordered. The realized
/// return, [`Episode::sum_reward`], is only available after the rollout
/// that produced the episode has ended.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Episode {
    steps: Vec<Step>,
    sum_reward: Option<Reward>,
}

impl Episode {
    /// Constructs an empty episode.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a step.
    pub fn push(&mut self, step: Step) {
        self.steps.push(step);
    }

    /// Steps in temporal order.
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// The number of steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// `true` if no step was recorded.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Undiscounted sum of the step rewards.
    pub fn raw_return(&self) -> Reward {
        self.steps.iter().map(|s| s.reward).sum()
    }

    /// The realized return, `None` while the rollout is in progress.
    pub fn sum_reward(&self) -> Option<Reward> {
        self.sum_reward
    }

    /// Sets the realized return. Called by the rollout driver.
    pub fn set_sum_reward(&mut self, sum_reward: Reward) {
        self.sum_reward = Some(sum_reward);
    }

    /// Actions taken in this episode.
    pub fn actions(&self) -> impl Iterator<Item = &Action> {
        self.steps.iter().map(|s| &s.act)
    }

    /// `true` if the last step was cut by the step ceiling.
    pub fn is_truncated(&self) -> bool {
        self.steps.last().map_or(false, |s| s.is_truncated)
    }

    /// Summary of this episode.
    pub fn to_record(&self) -> Record {
        let mut record = Record::from_scalar("episode_length", self.len() as f32);
        record.insert("raw_return", RecordValue::Scalar(self.raw_return().value()));
        if let Some(r) = self.sum_reward {
            record.insert("sum_reward", RecordValue::Scalar(r.value()));
        }
        record
    }
}
