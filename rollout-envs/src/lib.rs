//! Environments built on [`rollout_core`].
//!
//! * [`KArmedBandit`], a multi-armed bandit with Bernoulli-distributed
//!   rewards.
//! * [`Frozenlake`], a small grid world whose floor can be switched between
//!   smooth and rough (slippery) on a live instance.
mod bandit;
mod frozenlake;
pub use bandit::{KArmedBandit, KArmedBanditConfig};
pub use frozenlake::{Frozenlake, FrozenlakeConfig, Tile};
