// src/progress.rs
/// Lightweight progress reporting used by long-running operations (song collection).
/// Frontends implement this to surface status to users.
pub trait Progress {
    /// Called at the start of a batch with the number of items (if known).
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// One song fetched.
    fn item_done(&mut self, _id: &str, _label: &str) {}

    /// One song skipped after a retrieval failure.
    fn item_failed(&mut self, _id: &str, _reason: &str) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}
