//! Observation, action and reward.
use super::Device;
use ndarray::{Array1, ArrayD, IxDyn};
use serde::{Deserialize, Serialize};
use std::{
    fmt,
    iter::Sum,
    ops::{Add, AddAssign},
};

/// A point in the observation space at one instant.
///
/// The payload cannot be modified once the object is constructed.
#[derive(Clone, Debug, PartialEq)]
pub struct Observation {
    value: ArrayD<f32>,
    device: Device,
}

impl Observation {
    /// Constructs an observation on [`Device::Cpu`].
    pub fn new(value: ArrayD<f32>) -> Self {
        Self::with_device(value, Device::Cpu)
    }

    /// Constructs an observation tagged with `device`.
    pub fn with_device(value: ArrayD<f32>, device: Device) -> Self {
        Self { value, device }
    }

    /// Constructs a 1-dimensional observation from a slice.
    pub fn from_slice(value: &[f32]) -> Self {
        Self::new(Array1::from(value.to_vec()).into_dyn())
    }

    /// Returns a copy of this observation relocated to `device`.
    ///
    /// `self` is left unchanged.
    pub fn to(&self, device: Device) -> Self {
        Self {
            value: self.value.clone(),
            device,
        }
    }

    /// The payload.
    pub fn value(&self) -> &ArrayD<f32> {
        &self.value
    }

    /// The device tag.
    pub fn device(&self) -> Device {
        self.device
    }

    /// Shape of the payload.
    pub fn shape(&self) -> &[usize] {
        self.value.shape()
    }

    /// Elements of the payload in logical order.
    pub fn to_vec(&self) -> Vec<f32> {
        self.value.iter().copied().collect()
    }
}

/// An action chosen by a policy or sampled from an action space.
///
/// Discrete actions are stored as a one-element array holding the index,
/// see [`Action::discrete`].
#[derive(Clone, Debug, PartialEq)]
pub struct Action {
    value: ArrayD<f32>,
    device: Device,
}

impl Action {
    /// Constructs an action on [`Device::Cpu`].
    pub fn new(value: ArrayD<f32>) -> Self {
        Self::with_device(value, Device::Cpu)
    }

    /// Constructs an action tagged with `device`.
    pub fn with_device(value: ArrayD<f32>, device: Device) -> Self {
        Self { value, device }
    }

    /// Constructs a discrete action holding index `ix`.
    pub fn discrete(ix: usize) -> Self {
        Self::new(ArrayD::from_elem(IxDyn(&[1]), ix as f32))
    }

    /// Returns a copy of this action relocated to `device`.
    pub fn to(&self, device: Device) -> Self {
        Self {
            value: self.value.clone(),
            device,
        }
    }

    /// The payload.
    pub fn value(&self) -> &ArrayD<f32> {
        &self.value
    }

    /// The device tag.
    pub fn device(&self) -> Device {
        self.device
    }

    /// Index of a discrete action, i.e., the first element of the payload.
    ///
    /// Returns `None` for an empty payload.
    pub fn index(&self) -> Option<usize> {
        self.value.iter().next().map(|v| *v as usize)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.value.as_slice() {
            Some([v]) => write!(f, "{}", v),
            _ => write!(f, "{:?}", self.value.iter().collect::<Vec<_>>()),
        }
    }
}

/// Scalar feedback signal.
///
/// Rewards are expected to be finite. Non-finite values produced by an
/// environment are kept as they are; see [`Reward::is_finite`].
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Reward(f32);

impl Reward {
    /// Constructs a reward.
    pub fn new(value: f32) -> Self {
        Self(value)
    }

    /// Zero reward.
    pub fn zero() -> Self {
        Self(0.0)
    }

    /// The scalar value.
    pub fn value(&self) -> f32 {
        self.0
    }

    /// `false` for NaN and infinities.
    pub fn is_finite(&self) -> bool {
        self.0.is_finite()
    }
}

impl From<f32> for Reward {
    fn from(value: f32) -> Self {
        Self(value)
    }
}

impl Add for Reward {
    type Output = Reward;

    fn add(self, rhs: Reward) -> Reward {
        Reward(self.0 + rhs.0)
    }
}

impl AddAssign for Reward {
    fn add_assign(&mut self, rhs: Reward) {
        self.0 += rhs.0;
    }
}

impl Sum for Reward {
    fn sum<I: Iterator<Item = Reward>>(iter: I) -> Self {
        iter.fold(Reward::zero(), |acc, r| acc + r)
    }
}

impl<'a> Sum<&'a Reward> for Reward {
    fn sum<I: Iterator<Item = &'a Reward>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl fmt::Display for Reward {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_relocation_leaves_source() {
        let obs = Observation::from_slice(&[1.0, 2.0]);
        let moved = obs.to(Device::Cuda(0));
        assert_eq!(obs.device(), Device::Cpu);
        assert_eq!(moved.device(), Device::Cuda(0));
        assert_eq!(obs.value(), moved.value());
    }

    #[test]
    fn test_discrete_action() {
        let act = Action::discrete(3);
        assert_eq!(act.index(), Some(3));
        assert_eq!(act.value().shape(), &[1]);
        assert_eq!(format!("{}", act), "3");
    }

    #[test]
    fn test_reward_sum() {
        let rs = vec![Reward::new(1.0), Reward::new(0.5), Reward::zero()];
        let total: Reward = rs.iter().sum();
        assert_eq!(total, Reward::new(1.5));

        let mut r = Reward::zero();
        r += Reward::from(2.0);
        assert_eq!(r.value(), 2.0);
        assert!(!Reward::new(f32::NAN).is_finite());
    }
}
