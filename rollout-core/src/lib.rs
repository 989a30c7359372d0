#![warn(missing_docs)]
//! Interaction core of reinforcement learning.
//!
//! An environment ([`Environ`]) exposes observations ([`Observation`]) to a
//! policy ([`Policy`]), applies the actions ([`Action`]) it chooses and
//! scores them with rewards ([`Reward`]). Each tick yields a [`Step`];
//! the steps of one rollout form an [`Episode`]. Valid actions and
//! observations are described by spaces ([`Space`]).
//!
//! Training loops, learning algorithms and concrete environments are built
//! on top of this crate; [`callback::TrainerCallBack`] is the contract
//! between a training loop and whatever observes it.
pub mod callback;
pub mod error;
pub mod evaluator;
pub mod record;
pub mod util;

mod base;
pub use base::{
    Action, BoxSpace, Device, Discrete, Environ, EnvironEvent, EnvironObserver, EnvironState,
    Episode, Observation, Policy, RandomPolicy, Reward, Space, Step,
};

mod config;
pub use config::{EnvironConfig, ResetPolicy};
