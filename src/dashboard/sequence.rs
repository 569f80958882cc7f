//! Stale-response guard for overlapping requests.

use std::sync::atomic::{AtomicU64, Ordering};

/// Ticket for one issued request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestToken(u64);

/// Hands out monotonic tokens; only the latest one is current.
///
/// Issue a token before awaiting a fetch and check it when the result
/// arrives: a newer request (or [`Self::invalidate`]) makes older results
/// stale so they can be dropped instead of overwriting fresher state.
#[derive(Debug, Default)]
pub struct RequestSequence {
    latest: AtomicU64,
}

impl RequestSequence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next(&self) -> RequestToken {
        RequestToken(self.latest.fetch_add(1, Ordering::AcqRel) + 1)
    }

    pub fn is_current(&self, token: RequestToken) -> bool {
        self.latest.load(Ordering::Acquire) == token.0
    }

    /// Make every outstanding token stale.
    pub fn invalidate(&self) {
        self.latest.fetch_add(1, Ordering::AcqRel);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latest_token_wins() {
        let seq = RequestSequence::new();
        let first = seq.next();
        assert!(seq.is_current(first));
        let second = seq.next();
        assert!(!seq.is_current(first));
        assert!(seq.is_current(second));
        assert_ne!(first, second);
    }

    #[test]
    fn test_invalidate_stales_everything() {
        let seq = RequestSequence::new();
        let token = seq.next();
        seq.invalidate();
        assert!(!seq.is_current(token));
        assert!(seq.is_current(seq.next()));
    }
}
