//! Hooks of a training loop.
//!
//! The training loop itself lives outside this crate. It is expected to call
//! the hooks of a [`TrainerCallBack`] at the points below:
//!
//! 1. [`TrainerCallBack::on_train_start`]
//! 2. For each epoch:
//!     * [`TrainerCallBack::on_learn_start`], a learning step of the agent,
//!       [`TrainerCallBack::on_learn_end`] with the [`LearnOutcome`].
//!     * [`TrainerCallBack::on_val_start`], a batch of rollouts with
//!       [`Environ::get_multi_episodes`], [`TrainerCallBack::on_val_end`]
//!       with the episodes.
//!     * [`TrainerCallBack::on_save_start`], saving, and
//!       [`TrainerCallBack::on_save_end`], if the loop saves at this epoch.
//! 3. [`TrainerCallBack::on_train_end`]
//!
//! [`Environ::get_multi_episodes`]: crate::Environ::get_multi_episodes
use crate::{
    record::{AggregateRecorder, Record, RecordValue},
    Episode,
};
use log::info;

/// Result of one learning step of an agent.
#[derive(Debug, Clone, Default)]
pub struct LearnOutcome {
    /// Episodes the agent learned from.
    pub episodes: Vec<Episode>,

    /// Values reported by the agent, e.g. its loss.
    pub record: Record,
}

impl LearnOutcome {
    /// Constructs an outcome.
    pub fn new(episodes: Vec<Episode>, record: Record) -> Self {
        Self { episodes, record }
    }
}

/// Observer of the lifecycle of a training loop.
///
/// Every hook does nothing by default.
#[allow(unused_variables)]
pub trait TrainerCallBack {
    /// Training starts.
    fn on_train_start(&mut self) {}

    /// Training ended.
    fn on_train_end(&mut self) {}

    /// A learning step starts.
    fn on_learn_start(&mut self, epoch: usize) {}

    /// A learning step ended.
    fn on_learn_end(&mut self, epoch: usize, outcome: &LearnOutcome) {}

    /// Validation starts.
    fn on_val_start(&mut self, epoch: usize) {}

    /// Validation ended with `episodes`.
    fn on_val_end(&mut self, epoch: usize, episodes: &[Episode]) {}

    /// Saving starts.
    fn on_save_start(&mut self) {}

    /// Saving ended.
    fn on_save_end(&mut self) {}
}

fn mean_sum_reward(episodes: &[Episode]) -> f32 {
    if episodes.is_empty() {
        return 0.0;
    }
    episodes
        .iter()
        .filter_map(|e| e.sum_reward())
        .map(|r| r.value())
        .sum::<f32>()
        / episodes.len() as f32
}

/// Logs every hook and stores per-epoch summaries in an
/// [`AggregateRecorder`], which is flushed when training ends.
pub struct LoggingCallBack<R: AggregateRecorder> {
    recorder: R,
    last_epoch: usize,
}

impl<R: AggregateRecorder> LoggingCallBack<R> {
    /// Constructs the callback.
    pub fn new(recorder: R) -> Self {
        Self {
            recorder,
            last_epoch: 0,
        }
    }

    /// The recorder.
    pub fn recorder(&self) -> &R {
        &self.recorder
    }

    /// Returns the recorder.
    pub fn into_inner(self) -> R {
        self.recorder
    }
}

impl<R: AggregateRecorder> TrainerCallBack for LoggingCallBack<R> {
    fn on_train_start(&mut self) {
        info!("Training started");
    }

    fn on_train_end(&mut self) {
        info!("Training ended at epoch {}", self.last_epoch);
        self.recorder.flush(self.last_epoch as i64);
    }

    fn on_learn_start(&mut self, epoch: usize) {
        info!("Learning starts at epoch {}", epoch);
    }

    fn on_learn_end(&mut self, epoch: usize, outcome: &LearnOutcome) {
        self.last_epoch = epoch;
        let mut record = outcome.record.clone();
        record.insert(
            "learn_reward",
            RecordValue::Scalar(mean_sum_reward(&outcome.episodes)),
        );
        info!("Learning ended at epoch {}: {:?}", epoch, record);
        self.recorder.store(record);
    }

    fn on_val_start(&mut self, epoch: usize) {
        info!("Validation starts at epoch {}", epoch);
    }

    fn on_val_end(&mut self, epoch: usize, episodes: &[Episode]) {
        self.last_epoch = epoch;
        let reward = mean_sum_reward(episodes);
        info!(
            "Validation ended at epoch {}: {} episodes, mean sum reward {}",
            epoch,
            episodes.len(),
            reward
        );
        self.recorder
            .store(Record::from_scalar("eval_reward", reward));
    }

    fn on_save_start(&mut self) {
        info!("Saving starts");
    }

    fn on_save_end(&mut self) {
        info!("Saving ended");
    }
}
