pub mod drop_oldest_queue;
pub mod latest_slot;

pub use drop_oldest_queue::*;
pub use latest_slot::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueKind {
    /// Keep only the newest value; readers see snapshots.
    Latest,
    /// Bounded FIFO that evicts the oldest value when full.
    DropOldest { capacity: usize },
}
