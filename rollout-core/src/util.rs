//! Utilities for interaction of policies and environments.
use crate::{
    record::{Record, RecordValue, Recorder},
    Environ, Policy,
};
use anyhow::Result;

/// Runs episodes with a policy and writes one record per step to `recorder`.
///
/// After the steps of an episode, a summary from [`Episode::to_record`]
/// tagged with the episode index is written as well.
///
/// # Arguments
///
/// * `env` - The environment, reset before every episode
/// * `policy` - The policy to evaluate
/// * `n_episodes` - The number of episodes to run
/// * `recorder` - Destination of the records
///
/// # Returns
///
/// The realized return of each episode.
///
/// [`Episode::to_record`]: crate::Episode::to_record
pub fn eval_with_recorder<E, P, R>(
    env: &mut E,
    policy: &mut P,
    n_episodes: usize,
    recorder: &mut R,
) -> Result<Vec<f32>>
where
    E: Environ,
    P: Policy + ?Sized,
    R: Recorder,
{
    let mut rs = Vec::with_capacity(n_episodes);

    for episode_ix in 0..n_episodes {
        let episode = env.get_episode(policy)?;

        for (count_step, step) in episode.steps().iter().enumerate() {
            let mut record = Record::empty();
            record.insert("reward", RecordValue::Scalar(step.reward.value()));
            record.insert("episode", RecordValue::Scalar(episode_ix as _));
            record.insert("step", RecordValue::Scalar(count_step as _));
            record.insert("obs", RecordValue::from(&step.obs));
            recorder.write(record);
        }

        let mut record = episode.to_record();
        record.insert("episode", RecordValue::Scalar(episode_ix as _));
        recorder.write(record);

        rs.push(episode.sum_reward().map_or(0.0, |r| r.value()));
    }

    Ok(rs)
}
