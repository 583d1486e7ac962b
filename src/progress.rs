// src/progress.rs
/// Lightweight progress reporting used by long-running operations (scrape batches).
/// Frontends (GUI/CLI) implement this to surface status to users.
pub trait Progress {
    /// Called at the start with the number of links in the batch.
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// One link scraped and stored; `stored` is the number of records upserted.
    fn item_done(&mut self, _index: usize, _link: &str, _stored: usize) {}

    /// One link failed and was skipped.
    fn item_failed(&mut self, _index: usize, _link: &str, _error: &str) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}
