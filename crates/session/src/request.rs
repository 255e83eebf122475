//! Request supersession.
//!
//! Every query issued by the user gets a strictly increasing [`RequestToken`].
//! The fetch layer hands the token back together with the response; only the
//! most recently issued token may reach the pipeline. Older responses are
//! dropped, never merged.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestToken(u64);

impl RequestToken {
    pub fn value(self) -> u64 {
        self.0
    }
}

impl core::fmt::Display for RequestToken {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Issues tokens and remembers the latest one.
///
/// Shared with the fetch layer (which may live on another thread), hence atomic.
#[derive(Debug, Default)]
pub struct RequestTracker {
    latest: AtomicU64,
}

impl RequestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a token that supersedes every earlier one.
    pub fn issue(&self) -> RequestToken {
        RequestToken(self.latest.fetch_add(1, Ordering::AcqRel) + 1)
    }

    /// The latest issued token, if any request was issued yet.
    pub fn current(&self) -> Option<RequestToken> {
        match self.latest.load(Ordering::Acquire) {
            0 => None,
            n => Some(RequestToken(n)),
        }
    }

    pub fn is_current(&self, token: RequestToken) -> bool {
        self.current() == Some(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn tokens_strictly_increase() {
        let tracker = RequestTracker::new();
        assert_eq!(tracker.current(), None);

        let first = tracker.issue();
        let second = tracker.issue();
        assert!(second > first);
        assert_eq!(tracker.current(), Some(second));
        assert!(tracker.is_current(second));
        assert!(!tracker.is_current(first));
    }

    #[test]
    fn concurrent_issuers_never_share_a_token() {
        let tracker = Arc::new(RequestTracker::new());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let tracker = Arc::clone(&tracker);
                std::thread::spawn(move || (0..100).map(|_| tracker.issue()).collect::<Vec<_>>())
            })
            .collect();

        let mut all: Vec<RequestToken> = handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect();
        all.sort();
        all.dedup();
        assert_eq!(all.len(), 400);
        assert_eq!(tracker.current().map(RequestToken::value), Some(400));
    }
}
