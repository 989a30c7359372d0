//! Compute device affinity of array payloads.
use serde::{Deserialize, Serialize};
use std::fmt;

/// Device on which the payload of an [`Observation`] or [`Action`] lives.
///
/// Payloads are host arrays; the tag records where a consumer, typically
/// a policy backed by a tensor library, expects the data. Relocation is
/// always explicit, see [`Observation::to`].
///
/// [`Observation`]: crate::Observation
/// [`Action`]: crate::Action
/// [`Observation::to`]: crate::Observation::to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Device {
    /// Host memory.
    Cpu,

    /// CUDA device with the given ordinal.
    Cuda(usize),
}

impl Default for Device {
    fn default() -> Self {
        Device::Cpu
    }
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Device::Cpu => write!(f, "cpu"),
            Device::Cuda(ix) => write!(f, "cuda:{}", ix),
        }
    }
}
