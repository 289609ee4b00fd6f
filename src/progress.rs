// src/progress.rs
/// Lightweight progress reporting for a pipeline run.
/// Frontends implement this to surface status to users.
pub trait Progress {
    /// Called once the event list is known, with the number of events.
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// One event finished extracting.
    fn item_done(&mut self, _event_id: &str, _name: &str, _rows: usize) {}

    /// One match (or a whole event listing) was skipped.
    fn item_failed(&mut self, _id: &str, _reason: &str) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}
