//! Cooperative cancellation for long searches.

use std::sync::Arc;

use portable_atomic::{AtomicBool, Ordering};

/// A shared flag that asks a running search to stop.
///
/// Clones share one flag, so a token handed to a search can be cancelled from
/// another thread, a timer, or an observer callback. Cancellation is
/// cooperative and one-way: once set, the flag stays set, and the search
/// winds down at its next checkpoint instead of stopping mid-mutation.
///
/// # Examples
///
/// ```
/// use tilework_solver::CancelToken;
///
/// let token = CancelToken::new();
/// let remote = token.clone();
///
/// let handle = std::thread::spawn(move || remote.cancel());
/// handle.join().unwrap();
/// assert!(token.is_cancelled());
/// ```
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    /// Creates a token that has not been cancelled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the flag. Idempotent.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    /// Returns `true` once [`CancelToken::cancel`] has been called on any
    /// clone of this token.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_uncancelled() {
        assert!(!CancelToken::new().is_cancelled());
    }

    #[test]
    fn clones_share_the_flag() {
        let token = CancelToken::new();
        let clone = token.clone();
        clone.cancel();
        assert!(token.is_cancelled());
        assert!(clone.is_cancelled());
    }

    #[test]
    fn cancel_is_idempotent() {
        let token = CancelToken::new();
        token.cancel();
        token.cancel();
        assert!(token.is_cancelled());
    }
}
