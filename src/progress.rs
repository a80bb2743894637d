// src/progress.rs
/// Lightweight progress reporting for a pipeline run.
/// Frontends (CLI, cron wrapper) implement this to surface status to users.
pub trait Progress {
    /// Called at the start with the number of documents to examine.
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// A document produced a record.
    fn item_done(&mut self, _id: u64) {}

    /// A document failed the listing filter.
    fn item_skipped(&mut self, _id: u64) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}
