//! Domains of actions and observations.
use crate::error::RolloutError;
use ndarray::{ArrayD, IxDyn, Zip};
use rand::Rng;
use std::fmt::Debug;

/// Legal domain of actions or observations.
///
/// A space holds no mutable state. Randomness comes from the generator given
/// to [`Space::sample`], so a single definition can be shared by any number
/// of environments.
pub trait Space: Clone + Debug {
    /// Shape of the values in the space.
    fn shape(&self) -> &[usize];

    /// Draws a value uniformly from the space.
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> ArrayD<f32>;

    /// Returns the canonical starting value of the space.
    fn generate(&self) -> ArrayD<f32>;

    /// Checks if the space contains `value`.
    fn contains(&self, value: &ArrayD<f32>) -> bool;

    /// Returns an error if `value` is not in the space.
    fn check(&self, value: &ArrayD<f32>) -> Result<(), RolloutError> {
        if self.contains(value) {
            Ok(())
        } else {
            Err(RolloutError::NotInSpace {
                expected: self.shape().to_vec(),
                actual: value.shape().to_vec(),
            })
        }
    }
}

/// Integers `0 .. n`, stored as one-element arrays.
///
/// Indices are held as `f32`, which represents every integer up to `2^24`
/// exactly, so `n` is limited to [`Discrete::MAX_N`].
#[derive(Clone, Debug, PartialEq)]
pub struct Discrete {
    n: usize,
    shape: [usize; 1],
}

impl Discrete {
    /// The largest number of indices a space can hold.
    pub const MAX_N: usize = 1 << 24;

    /// Constructs a space of `n` indices.
    ///
    /// # Panics
    ///
    /// Panics if `n == 0` or `n > Discrete::MAX_N`.
    pub fn new(n: usize) -> Self {
        assert!(n > 0, "Discrete space requires n > 0");
        assert!(
            n <= Self::MAX_N,
            "Discrete space requires n <= {}, got {}",
            Self::MAX_N,
            n
        );
        Self { n, shape: [1] }
    }

    /// The number of elements.
    pub fn n(&self) -> usize {
        self.n
    }
}

impl Space for Discrete {
    fn shape(&self) -> &[usize] {
        &self.shape
    }

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> ArrayD<f32> {
        ArrayD::from_elem(IxDyn(&self.shape), rng.gen_range(0..self.n) as f32)
    }

    fn generate(&self) -> ArrayD<f32> {
        ArrayD::zeros(IxDyn(&self.shape))
    }

    fn contains(&self, value: &ArrayD<f32>) -> bool {
        match value.as_slice() {
            Some([v]) if value.shape() == &self.shape[..] => {
                *v >= 0.0 && v.fract() == 0.0 && (*v as usize) < self.n
            }
            _ => false,
        }
    }
}

/// A box in `R^n` with per-element closed bounds.
#[derive(Clone, Debug, PartialEq)]
pub struct BoxSpace {
    low: ArrayD<f32>,
    high: ArrayD<f32>,
}

impl BoxSpace {
    /// Constructs a box with the given bounds.
    ///
    /// # Panics
    ///
    /// Panics if the shapes differ, a bound is not finite, or `low > high`
    /// for some element.
    pub fn new(low: ArrayD<f32>, high: ArrayD<f32>) -> Self {
        assert_eq!(low.shape(), high.shape(), "low and high must have the same shape");
        assert!(
            low.iter()
                .zip(high.iter())
                .all(|(l, h)| l.is_finite() && h.is_finite() && l <= h),
            "bounds must be finite and ordered"
        );
        Self { low, high }
    }

    /// Constructs a box with the same bounds for all elements.
    pub fn uniform(shape: &[usize], low: f32, high: f32) -> Self {
        Self::new(
            ArrayD::from_elem(IxDyn(shape), low),
            ArrayD::from_elem(IxDyn(shape), high),
        )
    }

    /// Lower bounds.
    pub fn low(&self) -> &ArrayD<f32> {
        &self.low
    }

    /// Upper bounds.
    pub fn high(&self) -> &ArrayD<f32> {
        &self.high
    }
}

impl Space for BoxSpace {
    fn shape(&self) -> &[usize] {
        self.low.shape()
    }

    /// Draws each element uniformly from its bounds.
    ///
    /// Draws are made in `f64` so that bounds as wide as
    /// `f32::MIN..=f32::MAX` do not overflow the width of the range.
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> ArrayD<f32> {
        Zip::from(&self.low)
            .and(&self.high)
            .map_collect(|&l, &h| (rng.gen_range(l as f64..=h as f64) as f32).clamp(l, h))
    }

    /// The zero vector, clamped into the bounds.
    fn generate(&self) -> ArrayD<f32> {
        Zip::from(&self.low)
            .and(&self.high)
            .map_collect(|&l, &h| 0f32.max(l).min(h))
    }

    fn contains(&self, value: &ArrayD<f32>) -> bool {
        value.shape() == self.low.shape()
            && Zip::from(value)
                .and(&self.low)
                .and(&self.high)
                .all(|&v, &l, &h| l <= v && v <= h)
    }
}
