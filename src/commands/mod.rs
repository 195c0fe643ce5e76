//! Top-level operations

pub mod schedule;
pub mod sync;

pub use schedule::{CycleOutcome, Scheduler};
pub use sync::{reconcile, SyncReport};
