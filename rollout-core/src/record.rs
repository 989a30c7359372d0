//! Types and traits for recording rollout statistics.
//!
//! Rollouts, evaluations and trainer callbacks report what happened as
//! [`Record`]s, flexible key-value containers, and hand them to a
//! [`Recorder`]. Recorders implementing [`AggregateRecorder`] additionally
//! collect records and summarize them on [`AggregateRecorder::flush`].
//!
//! ```rust
//! use rollout_core::record::{Record, RecordValue};
//!
//! // following values are obtained with some rollout in reality
//! let step = 1;
//! let obs = vec![1f32, 2.0, 3.0, 4.0, 5.0];
//! let reward = -1f32;
//!
//! let mut record = Record::empty();
//! record.insert("step", RecordValue::Scalar(step as f32));
//! record.insert("reward", RecordValue::Scalar(reward));
//! record.insert("obs", RecordValue::Array1(obs));
//! assert_eq!(record.get_scalar("reward").unwrap(), -1.0);
//! ```
mod base;
mod buffered_recorder;
mod null_recorder;
mod observer;
mod recorder;
mod storage;

pub use base::{Record, RecordValue};
pub use buffered_recorder::BufferedRecorder;
pub use null_recorder::NullRecorder;
pub use observer::RecordingObserver;
pub use recorder::{AggregateRecorder, Recorder};
pub use storage::RecordStorage;
