//! Errors raised while loading traces and evaluating predictors.

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A virtual address outside both kernel-segment windows (or not a
    /// 32-bit hexadecimal value at all).
    #[error("invalid kernel-segment address '{0}'")]
    InvalidAddress(String),

    /// A trace file is missing or unreadable.
    #[error("can't read trace {}: {source}", path.display())]
    MalformedTrace {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A tagged table was updated on a slot whose tag doesn't belong to the
    /// branch being updated.
    #[error("tag mismatch in slot {index}: stored {stored:x?}, expected {expected:#x}")]
    TaggedSlotInvariant {
        index: usize,
        stored: Option<u32>,
        expected: u32,
    },

    /// Accuracy is undefined for a run without any branch events.
    #[error("no branch events in '{0}'")]
    NoBranchEvents(String),
}
