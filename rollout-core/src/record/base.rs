//! Base implementation of records.
use crate::{error::RolloutError, Observation};
use chrono::prelude::{DateTime, Local};
use std::collections::{
    hash_map::{IntoIter, Iter, Keys},
    HashMap,
};

/// Represents possible types of values that can be stored in a [`Record`].
#[derive(Debug, Clone, PartialEq)]
pub enum RecordValue {
    /// A single floating-point value, typically a reward or a count.
    Scalar(f32),

    /// A timestamp with local timezone.
    DateTime(DateTime<Local>),

    /// A 1-dimensional array of floating-point values.
    Array1(Vec<f32>),

    /// An array of any dimension, stored flat in logical order with its shape.
    ArrayD(Vec<f32>, Vec<usize>),

    /// A text value.
    String(String),
}

impl From<&Observation> for RecordValue {
    fn from(obs: &Observation) -> Self {
        RecordValue::ArrayD(obs.to_vec(), obs.shape().to_vec())
    }
}

/// A container for storing key-value pairs of various data types.
///
/// ```rust
/// use rollout_core::record::{Record, RecordValue};
///
/// let mut record = Record::from_scalar("sum_reward", 17.0);
/// record.insert("env", RecordValue::String("bandit".to_string()));
/// assert_eq!(record.get_scalar("sum_reward").unwrap(), 17.0);
/// assert_eq!(record.get_string("env").unwrap(), "bandit");
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record(HashMap<String, RecordValue>);

impl Record {
    /// Creates an empty record.
    pub fn empty() -> Self {
        Self(HashMap::new())
    }

    /// Creates a record containing a single scalar value.
    pub fn from_scalar(name: impl Into<String>, value: f32) -> Self {
        Self(HashMap::from([(name.into(), RecordValue::Scalar(value))]))
    }

    /// Creates a record from a slice of key-value pairs.
    pub fn from_slice<K: Into<String> + Clone>(s: &[(K, RecordValue)]) -> Self {
        Self(
            s.iter()
                .map(|(k, v)| (k.clone().into(), v.clone()))
                .collect(),
        )
    }

    /// Returns an iterator over the keys in the record.
    pub fn keys(&self) -> Keys<String, RecordValue> {
        self.0.keys()
    }

    /// Inserts a key-value pair into the record.
    pub fn insert(&mut self, k: impl Into<String>, v: RecordValue) {
        self.0.insert(k.into(), v);
    }

    /// Returns an iterator over the key-value pairs in the record.
    pub fn iter(&self) -> Iter<'_, String, RecordValue> {
        self.0.iter()
    }

    /// Returns an iterator that consumes the record.
    pub fn into_iter_in_record(self) -> IntoIter<String, RecordValue> {
        self.0.into_iter()
    }

    /// Gets a reference to the value associated with the given key.
    pub fn get(&self, k: &str) -> Option<&RecordValue> {
        self.0.get(k)
    }

    /// Merges two records, consuming both.
    ///
    /// Values of `record` take precedence for keys present in both.
    pub fn merge(self, record: Record) -> Self {
        Record(self.0.into_iter().chain(record.0).collect())
    }

    /// Merges another record into this one in place.
    pub fn merge_inplace(&mut self, record: Record) {
        self.0.extend(record.0);
    }

    /// Gets a scalar value from the record.
    ///
    /// # Errors
    ///
    /// Returns an error if the key does not exist or the value is not a
    /// scalar.
    pub fn get_scalar(&self, k: &str) -> Result<f32, RolloutError> {
        match self.0.get(k) {
            Some(RecordValue::Scalar(v)) => Ok(*v),
            Some(_) => Err(RolloutError::RecordValueTypeError("Scalar".to_string())),
            None => Err(RolloutError::RecordKeyError(k.to_string())),
        }
    }

    /// Gets a 1-dimensional array from the record.
    pub fn get_array1(&self, k: &str) -> Result<Vec<f32>, RolloutError> {
        match self.0.get(k) {
            Some(RecordValue::Array1(v)) => Ok(v.clone()),
            Some(_) => Err(RolloutError::RecordValueTypeError("Array1".to_string())),
            None => Err(RolloutError::RecordKeyError(k.to_string())),
        }
    }

    /// Gets an array of any dimension and its shape from the record.
    pub fn get_array(&self, k: &str) -> Result<(Vec<f32>, Vec<usize>), RolloutError> {
        match self.0.get(k) {
            Some(RecordValue::ArrayD(v, s)) => Ok((v.clone(), s.clone())),
            Some(_) => Err(RolloutError::RecordValueTypeError("ArrayD".to_string())),
            None => Err(RolloutError::RecordKeyError(k.to_string())),
        }
    }

    /// Gets a string value from the record.
    pub fn get_string(&self, k: &str) -> Result<String, RolloutError> {
        match self.0.get(k) {
            Some(RecordValue::String(s)) => Ok(s.clone()),
            Some(_) => Err(RolloutError::RecordValueTypeError("String".to_string())),
            None => Err(RolloutError::RecordKeyError(k.to_string())),
        }
    }

    /// Checks if the record is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The number of entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns the scalar value of a record holding only that value.
    pub fn get_scalar_without_key(&self) -> Option<f32> {
        match self.0.values().next() {
            Some(RecordValue::Scalar(value)) if self.0.len() == 1 => Some(*value),
            _ => None,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_get_errors() {
        let record = Record::from_slice(&[
            ("reward", RecordValue::Scalar(1.0)),
            ("name", RecordValue::String("lake".to_string())),
        ]);
        assert_eq!(
            record.get_scalar("name"),
            Err(RolloutError::RecordValueTypeError("Scalar".to_string()))
        );
        assert_eq!(
            record.get_scalar("missing"),
            Err(RolloutError::RecordKeyError("missing".to_string()))
        );
        assert_eq!(record.get_scalar_without_key(), None);
        assert_eq!(Record::from_scalar("x", 2.0).get_scalar_without_key(), Some(2.0));
    }

    #[test]
    fn test_merge_prefers_later() {
        let a = Record::from_slice(&[("x", RecordValue::Scalar(1.0)), ("y", RecordValue::Scalar(1.0))]);
        let b = Record::from_scalar("x", 2.0);
        let merged = a.merge(b);
        assert_eq!(merged.get_scalar("x").unwrap(), 2.0);
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn test_observation_value() {
        let obs = Observation::from_slice(&[1.0, 2.0]);
        let mut record = Record::empty();
        record.insert("obs", RecordValue::from(&obs));
        assert_eq!(record.get_array("obs").unwrap(), (vec![1.0, 2.0], vec![2]));
    }
}
