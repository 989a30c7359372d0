//! Environment.
use super::{Action, Episode, EnvironState, Observation, Policy, Reward, Space, Step};
use crate::{config::ResetPolicy, error::RolloutError};
use anyhow::Result;
use log::{debug, info, warn};

#[cfg_attr(doc, aquamarine::aquamarine)]
/// Represents an environment, which provides observations to a policy and
/// scores its actions.
///
/// A concrete environment embeds an [`EnvironState`] and implements the
/// transition function ([`Environ::update`]), the reward function
/// ([`Environ::get_reward`]), the termination test ([`Environ::is_complete`])
/// and the discounting rule ([`Environ::discount_reward`]). Resetting,
/// stepping and rollouts are provided on top of them.
///
/// ```mermaid
/// stateDiagram-v2
///     Uninitialized --> Ready: spaces set
///     Ready --> Active: reset
///     Active --> Active: step
///     Active --> Terminal: is_complete(epoch)
///     Terminal --> Active: reset
/// ```
///
/// The core does not bound rollouts by itself. An implementation of
/// [`Environ::is_complete`] that never returns `true` makes
/// [`Environ::get_episode`] loop forever unless a step ceiling is given with
/// [`EnvironConfig::max_steps`](crate::EnvironConfig::max_steps).
pub trait Environ {
    /// Configurations.
    type Config: Clone;

    /// Action space.
    type ActSpace: Space;

    /// Observation space.
    type ObsSpace: Space;

    /// Builds an environment.
    fn build(config: &Self::Config) -> Result<Self>
    where
        Self: Sized;

    /// The state shared by all environments.
    fn state(&self) -> &EnvironState<Self::ActSpace, Self::ObsSpace>;

    /// Mutable access to the state shared by all environments.
    fn state_mut(&mut self) -> &mut EnvironState<Self::ActSpace, Self::ObsSpace>;

    /// Applies an action to the environment and returns the new observation.
    ///
    /// The result must depend only on the current state of the environment,
    /// its random number generator and `act`. The returned observation is
    /// recorded by the caller; implementations must not push it to the
    /// observation history.
    fn update(&mut self, act: &Action) -> Result<Observation>;

    /// Computes the reward of an observation.
    fn get_reward(&self, obs: &Observation) -> Reward;

    /// Returns `true` if the rollout has ended at `epoch`.
    ///
    /// `epoch` is the number of ticks taken since the rollout started.
    fn is_complete(&self, epoch: usize) -> bool;

    /// Returns the factor by which the summed reward of `episode` is scaled.
    fn discount_reward(&self, episode: &Episode, gamma: f32) -> f32;

    /// Restores environment specific state on [`Environ::reset`].
    fn on_reset(&mut self) -> Result<()> {
        Ok(())
    }

    /// Clears the history and sets the observation to
    /// [`Space::generate`] of the observation space and the reward to zero.
    ///
    /// # Errors
    ///
    /// Returns [`RolloutError::SpaceNotConfigured`] if either space is unset.
    fn reset(&mut self) -> Result<Observation> {
        self.state().ensure_configured()?;
        let value = self.state().observation_space()?.generate();
        self.on_reset()?;
        let state = self.state_mut();
        let obs = Observation::with_device(value, state.device());
        state.clear_observations();
        state.set_observation(obs.clone());
        state.set_reward(Reward::zero());
        debug!("{}: reset", state.name());
        Ok(obs)
    }

    /// Samples an action from the action space.
    fn sample(&mut self) -> Result<Action> {
        Ok(self.state_mut().sample_action()?)
    }

    /// Performs a tick with an action sampled from the action space.
    fn step(&mut self, epoch: usize) -> Result<Step> {
        let act = self.sample()?;
        self.step_with(act, epoch)
    }

    /// Performs a tick with the given action.
    ///
    /// The new observation and reward become current and the observation is
    /// appended to the history.
    fn step_with(&mut self, act: Action, epoch: usize) -> Result<Step> {
        self.state().ensure_configured()?;
        let device = self.state().device();
        let act = act.to(device);
        let obs = self.update(&act)?.to(device);
        let reward = self.get_reward(&obs);
        if !reward.is_finite() {
            warn!("{}: non-finite reward {}", self.state().name(), reward);
        }
        self.state_mut().commit(obs.clone(), reward);
        let is_terminated = self.is_complete(epoch);
        Ok(Step::new(act, obs, reward, is_terminated, false))
    }

    /// Runs a rollout from the current state, without resetting.
    ///
    /// Before every tick, [`Environ::is_complete`] is asked with the number
    /// of ticks taken so far, starting from 0. A tick asks `policy` for an
    /// action on the current observation, applies it with
    /// [`Environ::update`] and scores the result with
    /// [`Environ::get_reward`]. If a step ceiling is configured and reached
    /// first, the last step is flagged as truncated.
    ///
    /// # Arguments
    ///
    /// * `policy` - The policy choosing an action at every tick
    ///
    /// # Returns
    ///
    /// The [`Episode`] of the rollout. Its realized return is the sum of the
    /// step rewards multiplied by [`Environ::discount_reward`]. Non-finite
    /// rewards are kept as they are.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// * a space is not configured
    /// * the environment has no current observation, i.e., was never reset
    /// * [`Environ::update`] fails
    fn run_episode<P: Policy + ?Sized>(&mut self, policy: &mut P) -> Result<Episode> {
        self.state().ensure_configured()?;
        let device = self.state().device();
        let max_steps = self.state().max_steps();
        let mut episode = Episode::new();
        let mut epoch = 0;
        let mut done = self.is_complete(epoch);

        while !done {
            epoch += 1;
            let prev_obs = self
                .state()
                .observation()
                .ok_or(RolloutError::NotReset)?;
            let act = policy.predict_action(prev_obs).to(device);
            let obs = self.update(&act)?.to(device);
            let reward = self.get_reward(&obs);
            if !reward.is_finite() {
                warn!("{}: non-finite reward {}", self.state().name(), reward);
            }
            self.state_mut().commit(obs.clone(), reward);

            done = self.is_complete(epoch);
            let is_truncated = !done && max_steps.map_or(false, |m| epoch >= m);
            episode.push(Step::new(act, obs, reward, done, is_truncated));
            if is_truncated {
                warn!(
                    "{}: rollout truncated at the step ceiling ({})",
                    self.state().name(),
                    epoch
                );
                break;
            }
        }

        let gamma = self.state().gamma();
        let discount = self.discount_reward(&episode, gamma);
        let sum_reward = Reward::new(episode.raw_return().value() * discount);
        episode.set_sum_reward(sum_reward);
        debug!(
            "{}: episode of {} steps, sum reward {}",
            self.state().name(),
            episode.len(),
            sum_reward
        );
        Ok(episode)
    }

    /// Resets the environment and runs a rollout with `policy`.
    fn get_episode<P: Policy + ?Sized>(&mut self, policy: &mut P) -> Result<Episode> {
        self.reset()?;
        self.run_episode(policy)
    }

    /// Runs `n_episodes` rollouts in sequence.
    ///
    /// Resets happen according to
    /// [`EnvironConfig::reset_policy`](crate::EnvironConfig::reset_policy).
    fn get_multi_episodes<P: Policy + ?Sized>(
        &mut self,
        policy: &mut P,
        n_episodes: usize,
    ) -> Result<Vec<Episode>> {
        let episodes = match self.state().reset_policy() {
            ResetPolicy::PerEpisode => (0..n_episodes)
                .map(|_| self.get_episode(policy))
                .collect::<Result<Vec<_>>>()?,
            ResetPolicy::PerBatch => {
                self.reset()?;
                (0..n_episodes)
                    .map(|_| self.run_episode(policy))
                    .collect::<Result<Vec<_>>>()?
            }
        };

        if !episodes.is_empty() {
            let total: f32 = episodes
                .iter()
                .filter_map(|e| e.sum_reward())
                .map(|r| r.value())
                .sum();
            info!(
                "{}: {} episodes, mean sum reward {}",
                self.state().name(),
                episodes.len(),
                total / episodes.len() as f32
            );
        }
        Ok(episodes)
    }

    /// Length of the observation history.
    fn life(&self) -> usize {
        self.state().life()
    }

    /// Name and life of the environment, separated by a tab.
    fn summary(&self) -> String {
        format!("{}\tLife:{}", self.state().name(), self.life())
    }
}
