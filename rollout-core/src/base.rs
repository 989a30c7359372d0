//! Core functionalities.
mod device;
mod env;
mod episode;
mod policy;
mod primitive;
mod space;
mod state;
mod step;
pub use device::Device;
pub use env::Environ;
pub use episode::Episode;
pub use policy::{Policy, RandomPolicy};
pub use primitive::{Action, Observation, Reward};
pub use space::{BoxSpace, Discrete, Space};
pub use state::{EnvironEvent, EnvironObserver, EnvironState};
pub use step::Step;
