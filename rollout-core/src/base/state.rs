//! State owned by every environment.
use super::{Action, Device, Observation, Reward, Space};
use crate::{
    config::{EnvironConfig, ResetPolicy},
    error::RolloutError,
};
use log::trace;
use rand::{rngs::SmallRng, SeedableRng};

/// Change of an observable property of an environment.
#[derive(Clone, Debug, PartialEq)]
pub enum EnvironEvent {
    /// The name was changed.
    NameChanged(String),

    /// The current observation was replaced.
    ObservationChanged(Observation),

    /// The current reward was replaced.
    RewardChanged(Reward),

    /// The observation history was appended to or cleared.
    ObservationListChanged {
        /// Length of the history after the change.
        life: usize,
    },
}

/// Subscriber of [`EnvironEvent`]s.
///
/// Notifications are delivered synchronously, in the order of mutations.
pub trait EnvironObserver {
    /// Receives an event.
    fn notify(&mut self, event: &EnvironEvent);
}

impl<F: FnMut(&EnvironEvent)> EnvironObserver for F {
    fn notify(&mut self, event: &EnvironEvent) {
        self(event)
    }
}

/// Observation, reward, history and configuration of an environment.
///
/// Concrete environments embed this struct and hand it out through
/// [`Environ::state`] and [`Environ::state_mut`]. The action and
/// observation spaces start unset and must be given by the concrete
/// environment before the environment is reset or stepped.
///
/// [`Environ::state`]: crate::Environ::state
/// [`Environ::state_mut`]: crate::Environ::state_mut
pub struct EnvironState<A: Space, O: Space> {
    name: String,
    observation: Option<Observation>,
    reward: Reward,
    observation_list: Vec<Observation>,
    action_space: Option<A>,
    observation_space: Option<O>,
    gamma: f32,
    device: Device,
    max_steps: Option<usize>,
    reset_policy: ResetPolicy,
    rng: SmallRng,
    observers: Vec<Box<dyn EnvironObserver>>,
}

impl<A: Space, O: Space> EnvironState<A, O> {
    /// Constructs the state without spaces.
    pub fn new(config: &EnvironConfig) -> Result<Self, RolloutError> {
        config.validate()?;
        Ok(Self {
            name: config.name.clone(),
            observation: None,
            reward: Reward::zero(),
            observation_list: Vec::new(),
            action_space: None,
            observation_space: None,
            gamma: config.gamma,
            device: config.device,
            max_steps: config.max_steps,
            reset_policy: config.reset_policy,
            rng: SmallRng::seed_from_u64(config.seed),
            observers: Vec::new(),
        })
    }

    /// Constructs the state with both spaces set.
    ///
    /// # Arguments
    ///
    /// * `config` - Name, discount factor, device, step ceiling, seed and
    ///   reset policy of the environment
    /// * `action_space` - Domain of actions
    /// * `observation_space` - Domain of observations
    ///
    /// # Errors
    ///
    /// Returns an error if `config` does not pass
    /// [`EnvironConfig::validate`].
    pub fn with_spaces(
        config: &EnvironConfig,
        action_space: A,
        observation_space: O,
    ) -> Result<Self, RolloutError> {
        let mut state = Self::new(config)?;
        state.set_action_space(action_space);
        state.set_observation_space(observation_space);
        Ok(state)
    }

    fn emit(&mut self, event: EnvironEvent) {
        trace!("{}: {:?}", self.name, event);
        for observer in self.observers.iter_mut() {
            observer.notify(&event);
        }
    }

    /// Subscribes to property changes.
    pub fn subscribe(&mut self, observer: Box<dyn EnvironObserver>) {
        self.observers.push(observer);
    }

    /// Name of the environment.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Renames the environment.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.emit(EnvironEvent::NameChanged(self.name.clone()));
    }

    /// The current observation, `None` before the first reset.
    pub fn observation(&self) -> Option<&Observation> {
        self.observation.as_ref()
    }

    /// Replaces the current observation.
    pub fn set_observation(&mut self, observation: Observation) {
        self.observation = Some(observation.clone());
        self.emit(EnvironEvent::ObservationChanged(observation));
    }

    /// The current reward.
    pub fn reward(&self) -> Reward {
        self.reward
    }

    /// Replaces the current reward.
    pub fn set_reward(&mut self, reward: Reward) {
        self.reward = reward;
        self.emit(EnvironEvent::RewardChanged(reward));
    }

    /// Observations recorded since the last reset, oldest first.
    pub fn observation_list(&self) -> &[Observation] {
        &self.observation_list
    }

    /// Length of the observation history.
    pub fn life(&self) -> usize {
        self.observation_list.len()
    }

    pub(crate) fn clear_observations(&mut self) {
        self.observation_list.clear();
        self.emit(EnvironEvent::ObservationListChanged { life: 0 });
    }

    /// Makes `observation` and `reward` current and appends the observation
    /// to the history.
    pub(crate) fn commit(&mut self, observation: Observation, reward: Reward) {
        self.observation_list.push(observation.clone());
        let life = self.life();
        self.emit(EnvironEvent::ObservationListChanged { life });
        self.set_observation(observation);
        self.set_reward(reward);
    }

    /// Sets the action space.
    pub fn set_action_space(&mut self, space: A) {
        self.action_space = Some(space);
    }

    /// Sets the observation space.
    pub fn set_observation_space(&mut self, space: O) {
        self.observation_space = Some(space);
    }

    /// The action space.
    pub fn action_space(&self) -> Result<&A, RolloutError> {
        self.action_space
            .as_ref()
            .ok_or(RolloutError::SpaceNotConfigured("action"))
    }

    /// The observation space.
    pub fn observation_space(&self) -> Result<&O, RolloutError> {
        self.observation_space
            .as_ref()
            .ok_or(RolloutError::SpaceNotConfigured("observation"))
    }

    /// Returns an error unless both spaces are set.
    pub fn ensure_configured(&self) -> Result<(), RolloutError> {
        self.action_space()?;
        self.observation_space()?;
        Ok(())
    }

    /// Samples an action from the action space.
    pub fn sample_action(&mut self) -> Result<Action, RolloutError> {
        let space = self
            .action_space
            .as_ref()
            .ok_or(RolloutError::SpaceNotConfigured("action"))?;
        Ok(Action::with_device(space.sample(&mut self.rng), self.device))
    }

    /// The discount factor.
    pub fn gamma(&self) -> f32 {
        self.gamma
    }

    /// Sets the discount factor.
    pub fn set_gamma(&mut self, gamma: f32) -> Result<(), RolloutError> {
        if !(0.0..=1.0).contains(&gamma) {
            return Err(RolloutError::GammaOutOfRange(gamma));
        }
        self.gamma = gamma;
        Ok(())
    }

    /// Device of observations and actions.
    pub fn device(&self) -> Device {
        self.device
    }

    /// Sets the device. Takes effect from the next tick.
    pub fn set_device(&mut self, device: Device) {
        self.device = device;
    }

    /// Ceiling on the number of steps of a rollout.
    pub fn max_steps(&self) -> Option<usize> {
        self.max_steps
    }

    /// Reset policy of multi-episode rollouts.
    pub fn reset_policy(&self) -> ResetPolicy {
        self.reset_policy
    }

    /// Random number generator of the environment.
    pub fn rng_mut(&mut self) -> &mut SmallRng {
        &mut self.rng
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{BoxSpace, Discrete};
    use std::{cell::RefCell, rc::Rc};

    type State = EnvironState<Discrete, BoxSpace>;

    #[test]
    fn test_unset_spaces() {
        let mut state = State::new(&EnvironConfig::default()).unwrap();
        assert_eq!(
            state.sample_action(),
            Err(RolloutError::SpaceNotConfigured("action"))
        );
        state.set_action_space(Discrete::new(2));
        assert_eq!(
            state.ensure_configured(),
            Err(RolloutError::SpaceNotConfigured("observation"))
        );
        state.set_observation_space(BoxSpace::uniform(&[1], 0.0, 1.0));
        assert!(state.ensure_configured().is_ok());
        assert!(state.sample_action().is_ok());
    }

    #[test]
    fn test_invalid_gamma() {
        let config = EnvironConfig::default().gamma(-0.1);
        assert!(State::new(&config).is_err());

        let mut state = State::new(&EnvironConfig::default()).unwrap();
        assert!(state.set_gamma(2.0).is_err());
        assert_eq!(state.gamma(), 0.9);
    }

    #[test]
    fn test_notifications_in_mutation_order() {
        let events = Rc::new(RefCell::new(Vec::new()));
        let mut state = State::new(&EnvironConfig::default()).unwrap();
        let sink = events.clone();
        state.subscribe(Box::new(move |e: &EnvironEvent| sink.borrow_mut().push(e.clone())));

        let obs = Observation::from_slice(&[0.5]);
        state.set_name("renamed");
        state.commit(obs.clone(), Reward::new(1.0));
        state.clear_observations();

        assert_eq!(
            *events.borrow(),
            vec![
                EnvironEvent::NameChanged("renamed".to_string()),
                EnvironEvent::ObservationListChanged { life: 1 },
                EnvironEvent::ObservationChanged(obs),
                EnvironEvent::RewardChanged(Reward::new(1.0)),
                EnvironEvent::ObservationListChanged { life: 0 },
            ]
        );
        assert_eq!(state.life(), 0);
        assert_eq!(state.name(), "renamed");
    }
}
