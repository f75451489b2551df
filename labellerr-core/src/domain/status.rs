//! Job progress verdicts
//!
//! Every long-running platform operation (dataset ingestion, export generation,
//! pre-annotation import) reports its state in its own shape. Each of those
//! shapes maps onto the same three-way verdict so that a single polling loop
//! can drive all of them.

use std::fmt;

/// Verdict of a single status check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Progress {
    /// The operation finished successfully
    Done,

    /// The operation is still running; check again later
    Pending,

    /// The operation reached a terminal failure state
    Failed(String),
}

impl Progress {
    /// Returns true for `Done` and `Failed`
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Progress::Pending)
    }
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Progress::Done => write!(f, "done"),
            Progress::Pending => write!(f, "pending"),
            Progress::Failed(reason) => write!(f, "failed: {}", reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_states() {
        assert!(Progress::Done.is_terminal());
        assert!(Progress::Failed("boom".to_string()).is_terminal());
        assert!(!Progress::Pending.is_terminal());
    }
}
