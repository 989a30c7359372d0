use anyhow::Result;
use rollout_core::{
    callback::{LearnOutcome, LoggingCallBack, TrainerCallBack},
    error::RolloutError,
    evaluator::{DefaultEvaluator, Evaluator},
    record::{BufferedRecorder, Record, RecordValue, RecordingObserver},
    util::eval_with_recorder,
    Action, BoxSpace, Device, Discrete, Environ, EnvironConfig, EnvironEvent, EnvironState,
    Episode, Observation, RandomPolicy, ResetPolicy, Reward, Space,
};
use std::{cell::RefCell, rc::Rc};
use test_log::test;

#[derive(Clone)]
struct CounterConfig {
    environ: EnvironConfig,
    horizon: usize,
    configured: bool,
    nan_reward: bool,
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self {
            environ: EnvironConfig::default().name("counter").gamma(0.5),
            horizon: 5,
            configured: true,
            nan_reward: false,
        }
    }
}

/// Adds the chosen index to a counter; the reward is the counter value.
struct Counter {
    state: EnvironState<Discrete, BoxSpace>,
    counter: f32,
    horizon: usize,
    nan_reward: bool,
    complete_calls: RefCell<Vec<usize>>,
}

impl Environ for Counter {
    type Config = CounterConfig;
    type ActSpace = Discrete;
    type ObsSpace = BoxSpace;

    fn build(config: &Self::Config) -> Result<Self> {
        let mut state = EnvironState::new(&config.environ)?;
        if config.configured {
            state.set_action_space(Discrete::new(3));
            state.set_observation_space(BoxSpace::uniform(&[1], 0.0, 1000.0));
        }
        Ok(Self {
            state,
            counter: 0.0,
            horizon: config.horizon,
            nan_reward: config.nan_reward,
            complete_calls: RefCell::new(vec![]),
        })
    }

    fn state(&self) -> &EnvironState<Discrete, BoxSpace> {
        &self.state
    }

    fn state_mut(&mut self) -> &mut EnvironState<Discrete, BoxSpace> {
        &mut self.state
    }

    fn on_reset(&mut self) -> Result<()> {
        self.counter = 0.0;
        Ok(())
    }

    fn update(&mut self, act: &Action) -> Result<Observation> {
        self.state.action_space()?.check(act.value())?;
        self.counter += act.index().unwrap_or(0) as f32;
        Ok(Observation::from_slice(&[self.counter]))
    }

    fn get_reward(&self, obs: &Observation) -> Reward {
        if self.nan_reward {
            Reward::new(f32::NAN)
        } else {
            Reward::new(obs.to_vec()[0])
        }
    }

    fn is_complete(&self, epoch: usize) -> bool {
        self.complete_calls.borrow_mut().push(epoch);
        epoch >= self.horizon
    }

    fn discount_reward(&self, episode: &Episode, gamma: f32) -> f32 {
        gamma.powi(episode.len() as i32)
    }
}

fn counter(config: CounterConfig) -> Counter {
    Counter::build(&config).unwrap()
}

fn always(ix: usize) -> impl FnMut(&Observation) -> Action {
    move |_: &Observation| Action::discrete(ix)
}

#[test]
fn test_reset_clears_history() -> Result<()> {
    let mut env = counter(CounterConfig::default());
    env.step(1)?;
    env.step(2)?;
    assert_eq!(env.life(), 2);

    let obs = env.reset()?;
    assert_eq!(env.life(), 0);
    assert_eq!(obs.value(), &env.state().observation_space()?.generate());
    assert_eq!(env.state().observation(), Some(&obs));
    assert_eq!(env.state().reward(), Reward::zero());
    assert_eq!(env.summary(), "counter\tLife:0");
    Ok(())
}

#[test]
fn test_step_commits_state() -> Result<()> {
    let mut env = counter(CounterConfig::default());
    env.reset()?;
    let step = env.step_with(Action::discrete(2), 1)?;
    assert_eq!(step.obs.to_vec(), vec![2.0]);
    assert_eq!(step.reward, Reward::new(2.0));
    assert!(!step.is_done());
    assert_eq!(env.state().observation(), Some(&step.obs));
    assert_eq!(env.state().reward(), Reward::new(2.0));
    assert_eq!(env.life(), 1);

    let step = env.step_with(Action::discrete(0), 5)?;
    assert!(step.is_terminated);
    assert!(!step.is_truncated);

    let step = env.step(1)?;
    assert!(env.state().action_space()?.contains(step.act.value()));
    Ok(())
}

#[test]
fn test_unconfigured_spaces_fail_fast() {
    let mut env = counter(CounterConfig {
        configured: false,
        ..CounterConfig::default()
    });
    let err = env.reset().unwrap_err();
    assert_eq!(
        err.downcast_ref::<RolloutError>(),
        Some(&RolloutError::SpaceNotConfigured("action"))
    );
    let err = env.sample().unwrap_err();
    assert_eq!(
        err.downcast_ref::<RolloutError>(),
        Some(&RolloutError::SpaceNotConfigured("action"))
    );
    assert!(env.step(1).is_err());
    assert!(env.step_with(Action::discrete(0), 1).is_err());
    assert!(env.get_episode(&mut always(1)).is_err());
}

#[test]
fn test_reset_requires_both_spaces() -> Result<()> {
    let mut env = counter(CounterConfig {
        configured: false,
        ..CounterConfig::default()
    });
    env.state_mut()
        .set_observation_space(BoxSpace::uniform(&[1], 0.0, 1000.0));
    let err = env.reset().unwrap_err();
    assert_eq!(
        err.downcast_ref::<RolloutError>(),
        Some(&RolloutError::SpaceNotConfigured("action"))
    );
    assert_eq!(env.state().observation(), None);

    env.state_mut().set_action_space(Discrete::new(3));
    env.reset()?;
    assert_eq!(env.life(), 0);
    Ok(())
}

#[test]
fn test_non_finite_rewards_pass_through() -> Result<()> {
    let mut env = counter(CounterConfig {
        nan_reward: true,
        ..CounterConfig::default()
    });
    env.reset()?;
    let step = env.step_with(Action::discrete(1), 1)?;
    assert!(step.reward.value().is_nan());
    assert!(env.state().reward().value().is_nan());

    let episode = env.get_episode(&mut always(1))?;
    assert_eq!(episode.len(), 5);
    assert!(episode.steps().last().unwrap().is_terminated);
    assert!(episode.steps().iter().all(|s| s.reward.value().is_nan()));
    assert!(env.state().reward().value().is_nan());
    assert!(episode.sum_reward().unwrap().value().is_nan());
    Ok(())
}

#[test]
fn test_run_episode_requires_reset() {
    let mut env = counter(CounterConfig::default());
    let err = env.run_episode(&mut always(1)).unwrap_err();
    assert_eq!(
        err.downcast_ref::<RolloutError>(),
        Some(&RolloutError::NotReset)
    );
}

#[test]
fn test_get_episode() -> Result<()> {
    let mut env = counter(CounterConfig::default());
    let episode = env.get_episode(&mut always(1))?;

    // is_complete is asked once per epoch, starting from 0
    assert_eq!(*env.complete_calls.borrow(), vec![0, 1, 2, 3, 4, 5]);
    assert_eq!(episode.len(), 5);
    assert_eq!(env.life(), 5);

    let rewards: Vec<_> = episode.steps().iter().map(|s| s.reward.value()).collect();
    assert_eq!(rewards, vec![1.0, 2.0, 3.0, 4.0, 5.0]);
    let done: Vec<_> = episode.steps().iter().map(|s| s.is_done()).collect();
    assert_eq!(done, vec![false, false, false, false, true]);

    let raw: f32 = episode.steps().iter().map(|s| s.reward.value()).sum();
    let expected = raw * env.discount_reward(&episode, 0.5);
    assert_eq!(episode.sum_reward(), Some(Reward::new(expected)));
    assert_eq!(expected, 15.0 * 0.5f32.powi(5));
    Ok(())
}

#[test]
fn test_sum_then_scale_for_any_gamma() -> Result<()> {
    for gamma in [0.0, 0.25, 0.9, 1.0] {
        let mut config = CounterConfig::default();
        config.environ = config.environ.gamma(gamma);
        let mut env = counter(config);
        let episode = env.get_episode(&mut always(2))?;
        let expected = episode.raw_return().value() * gamma.powi(episode.len() as i32);
        assert_eq!(episode.sum_reward().unwrap().value(), expected);
    }
    Ok(())
}

#[test]
fn test_complete_before_first_tick() -> Result<()> {
    let mut env = counter(CounterConfig {
        horizon: 0,
        ..CounterConfig::default()
    });
    let episode = env.get_episode(&mut always(1))?;
    assert!(episode.is_empty());
    assert_eq!(episode.sum_reward(), Some(Reward::zero()));
    assert_eq!(env.life(), 0);
    Ok(())
}

#[test]
fn test_step_ceiling_truncates() -> Result<()> {
    let mut config = CounterConfig {
        horizon: usize::MAX,
        ..CounterConfig::default()
    };
    config.environ = config.environ.max_steps(Some(3));
    let mut env = counter(config);
    let episode = env.get_episode(&mut always(1))?;
    assert_eq!(episode.len(), 3);
    assert!(episode.is_truncated());
    assert!(episode.steps()[2].is_done());
    assert!(!episode.steps()[2].is_terminated);
    Ok(())
}

#[test]
fn test_multi_episodes_reset_per_episode() -> Result<()> {
    let mut env = counter(CounterConfig::default());
    let episodes = env.get_multi_episodes(&mut always(1), 3)?;
    assert_eq!(episodes.len(), 3);
    for episode in episodes.iter() {
        assert_eq!(episode.len(), 5);
        assert!(episode.steps().last().unwrap().is_terminated);
        assert_eq!(episode.steps()[0].obs.to_vec(), vec![1.0]);
    }
    assert_eq!(env.life(), 5);
    Ok(())
}

#[test]
fn test_multi_episodes_reset_per_batch() -> Result<()> {
    let mut config = CounterConfig::default();
    config.environ = config.environ.reset_policy(ResetPolicy::PerBatch);
    let mut env = counter(config);
    let episodes = env.get_multi_episodes(&mut always(1), 3)?;
    assert_eq!(episodes.len(), 3);

    // The counter carries over from one episode to the next
    let first_obs: Vec<_> = episodes.iter().map(|e| e.steps()[0].obs.to_vec()[0]).collect();
    assert_eq!(first_obs, vec![1.0, 6.0, 11.0]);
    assert_eq!(env.life(), 15);
    Ok(())
}

#[test]
fn test_device_relocation() -> Result<()> {
    let mut config = CounterConfig::default();
    config.environ = config.environ.device(Device::Cuda(0));
    let mut env = counter(config);
    let obs = env.reset()?;
    assert_eq!(obs.device(), Device::Cuda(0));

    let episode = env.get_episode(&mut always(1))?;
    for step in episode.steps() {
        assert_eq!(step.act.device(), Device::Cuda(0));
        assert_eq!(step.obs.device(), Device::Cuda(0));
    }
    Ok(())
}

#[test]
fn test_change_notifications() -> Result<()> {
    let mut env = counter(CounterConfig::default());
    let events = Rc::new(RefCell::new(vec![]));
    let sink = events.clone();
    env.state_mut()
        .subscribe(Box::new(move |e: &EnvironEvent| sink.borrow_mut().push(e.clone())));

    let recorder = Rc::new(RefCell::new(BufferedRecorder::new()));
    env.state_mut()
        .subscribe(Box::new(RecordingObserver::new(recorder.clone())));

    env.reset()?;
    env.step_with(Action::discrete(1), 1)?;

    let events = events.borrow();
    assert_eq!(events.len(), 6);
    assert_eq!(events[0], EnvironEvent::ObservationListChanged { life: 0 });
    assert_eq!(events[3], EnvironEvent::ObservationListChanged { life: 1 });
    assert_eq!(
        events[4],
        EnvironEvent::ObservationChanged(Observation::from_slice(&[1.0]))
    );
    assert_eq!(events[5], EnvironEvent::RewardChanged(Reward::new(1.0)));

    let recorder = recorder.borrow();
    assert_eq!(recorder.len(), 6);
    let last = recorder.iter().last().unwrap();
    assert_eq!(last.get_scalar("reward").unwrap(), 1.0);
    Ok(())
}

#[test]
fn test_eval_with_recorder() -> Result<()> {
    let mut env = counter(CounterConfig::default());
    let mut recorder = BufferedRecorder::new();
    let rs = eval_with_recorder(&mut env, &mut always(1), 2, &mut recorder)?;
    assert_eq!(rs, vec![15.0 * 0.5f32.powi(5); 2]);

    // five step records and one summary per episode
    assert_eq!(recorder.len(), 12);
    let summary = recorder.iter().nth(5).unwrap();
    assert_eq!(summary.get_scalar("episode_length").unwrap(), 5.0);
    Ok(())
}

#[test]
fn test_default_evaluator() -> Result<()> {
    let mut evaluator = DefaultEvaluator::<Counter>::new(&CounterConfig::default(), 4)?;
    let record = evaluator.evaluate(&mut always(2))?;
    assert_eq!(
        record.get_scalar("Episode return")?,
        30.0 * 0.5f32.powi(5)
    );

    let space = evaluator.env().state().action_space()?.clone();
    let mut policy = RandomPolicy::new(space, 0);
    let record = evaluator.evaluate(&mut policy)?;
    let r = record.get_scalar("Episode return")?;
    assert!((0.0..=30.0 * 0.5f32.powi(5)).contains(&r));
    Ok(())
}

#[test]
fn test_logging_callback() -> Result<()> {
    let mut env = counter(CounterConfig::default());
    let mut callback = LoggingCallBack::new(BufferedRecorder::new());

    callback.on_train_start();
    for epoch in 1..=3 {
        callback.on_learn_start(epoch);
        let episodes = env.get_multi_episodes(&mut always(1), 2)?;
        let outcome = LearnOutcome::new(episodes, Record::from_scalar("loss", epoch as f32));
        callback.on_learn_end(epoch, &outcome);

        callback.on_val_start(epoch);
        let episodes = env.get_multi_episodes(&mut always(0), 2)?;
        callback.on_val_end(epoch, &episodes);
    }
    callback.on_save_start();
    callback.on_save_end();
    callback.on_train_end();

    let recorder = callback.into_inner();
    assert_eq!(recorder.len(), 1);
    let record = recorder.iter().next().unwrap();
    assert_eq!(record.get_scalar("loss_mean")?, 2.0);
    assert_eq!(record.get_scalar("eval_reward_max")?, 0.0);
    assert_eq!(record.get_scalar("learn_reward_min")?, 15.0 * 0.5f32.powi(5));
    assert_eq!(record.get("epoch"), Some(&RecordValue::Scalar(3.0)));
    Ok(())
}
