//! Process-wide "transaction pending" indicator.
//!
//! Shared by every controller through an `Arc`. Each in-flight transaction
//! holds a [`PendingGuard`]; the flag reads true while any guard is alive.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[derive(Debug, Default)]
pub struct PendingFlag {
    in_flight: AtomicUsize,
}

impl PendingFlag {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Mark one transaction as in flight until the guard drops.
    pub fn begin(self: &Arc<Self>) -> PendingGuard {
        self.in_flight.fetch_add(1, Ordering::SeqCst);
        PendingGuard {
            flag: Arc::clone(self),
        }
    }

    pub fn is_pending(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst) > 0
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }
}

/// Clears one unit of the pending flag on drop, including on error paths.
#[derive(Debug)]
pub struct PendingGuard {
    flag: Arc<PendingFlag>,
}

impl Drop for PendingGuard {
    fn drop(&mut self) {
        self.flag.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guard_clears_on_drop() {
        let flag = PendingFlag::new();
        assert!(!flag.is_pending());
        {
            let _guard = flag.begin();
            assert!(flag.is_pending());
        }
        assert!(!flag.is_pending());
    }

    #[test]
    fn test_overlapping_guards() {
        let flag = PendingFlag::new();
        let first = flag.begin();
        let second = flag.begin();
        assert_eq!(flag.in_flight(), 2);
        drop(first);
        assert!(flag.is_pending());
        drop(second);
        assert!(!flag.is_pending());
    }
}
