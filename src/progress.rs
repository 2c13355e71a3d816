// src/progress.rs
use crate::entity::Relation;

/// Lightweight progress reporting for a crawl.
/// Frontends implement this to surface status to users.
pub trait Progress {
    /// Called once the root collection is in, with the number of Things.
    fn begin(&mut self, _total: usize) {}

    /// Called after each relation collection fetch. `count` is the running
    /// total of relation fetches (root and Observations fetches excluded).
    fn relation_fetched(&mut self, _count: usize, _relation: Relation, _url: &str) {}

    /// Called when one Thing's subtree is complete.
    fn thing_done(&mut self, _index: usize, _id: &str) {}

    /// Called at the end of a successful crawl.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}
