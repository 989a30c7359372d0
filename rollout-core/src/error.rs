//! Errors in the library.
use thiserror::Error;

/// Errors in the library.
#[derive(Error, Debug, PartialEq)]
pub enum RolloutError {
    /// The action or observation space was not set by the environment.
    #[error("{0} space is not configured")]
    SpaceNotConfigured(&'static str),

    /// The environment has no current observation.
    #[error("environment has not been reset")]
    NotReset,

    /// Discount factor outside of `[0, 1]`.
    #[error("gamma must be in [0, 1], got {0}")]
    GammaOutOfRange(f32),

    /// A value does not belong to a space.
    #[error("value with shape {actual:?} is not in the space with shape {expected:?}")]
    NotInSpace {
        /// Shape of the space.
        expected: Vec<usize>,
        /// Shape of the value.
        actual: Vec<usize>,
    },

    /// Invalid configuration value.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Record key error.
    #[error("Record key error: {0}")]
    RecordKeyError(String),

    /// Record value type error.
    #[error("Record value type error: {0}")]
    RecordValueTypeError(String),
}
