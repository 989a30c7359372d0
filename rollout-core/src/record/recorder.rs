use super::Record;
use std::{cell::RefCell, rc::Rc};

/// Writes a record to an output destination with [`Recorder::write`].
pub trait Recorder {
    /// Write a record to the [`Recorder`].
    fn write(&mut self, record: Record);
}

/// A recorder that collects records and writes values aggregated from them.
pub trait AggregateRecorder {
    /// Store the record.
    fn store(&mut self, record: Record);

    /// Writes values aggregated from the stored records, then forgets them.
    ///
    /// `epoch` is attached to the aggregated record as `"epoch"`.
    fn flush(&mut self, epoch: i64);
}

/// Lets several owners, e.g. an [`EnvironObserver`](crate::EnvironObserver)
/// and a test, share one recorder.
impl<R: Recorder> Recorder for Rc<RefCell<R>> {
    fn write(&mut self, record: Record) {
        self.borrow_mut().write(record);
    }
}
