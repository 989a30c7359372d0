use super::{Record, RecordValue, Recorder};
use crate::{EnvironEvent, EnvironObserver};
use chrono::Local;

/// Forwards environment notifications to a [`Recorder`].
///
/// Each event becomes one record with a `"time"` entry and an entry named
/// after the property that changed.
pub struct RecordingObserver<R: Recorder> {
    recorder: R,
}

impl<R: Recorder> RecordingObserver<R> {
    /// Wraps a recorder.
    pub fn new(recorder: R) -> Self {
        Self { recorder }
    }

    /// The wrapped recorder.
    pub fn recorder(&self) -> &R {
        &self.recorder
    }
}

impl<R: Recorder> EnvironObserver for RecordingObserver<R> {
    fn notify(&mut self, event: &EnvironEvent) {
        let (key, value) = match event {
            EnvironEvent::NameChanged(name) => ("name", RecordValue::String(name.clone())),
            EnvironEvent::ObservationChanged(obs) => ("observation", RecordValue::from(obs)),
            EnvironEvent::RewardChanged(reward) => ("reward", RecordValue::Scalar(reward.value())),
            EnvironEvent::ObservationListChanged { life } => {
                ("life", RecordValue::Scalar(*life as f32))
            }
        };
        let mut record = Record::from_slice(&[(key, value)]);
        record.insert("time", RecordValue::DateTime(Local::now()));
        self.recorder.write(record);
    }
}
