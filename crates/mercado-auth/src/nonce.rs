//! Strictly increasing request nonces
//!
//! The exchange rejects any `tapi_nonce` that is not greater than the last
//! one it accepted for the same key. Nonces are wall-clock milliseconds,
//! bumped past the last issued value when the clock stalls or steps back.

use crate::error::{AuthError, AuthResult};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Per-client nonce source
///
/// Safe to share across threads; every successful call to
/// [`next`](Self::next) returns a value strictly greater than all values
/// previously returned by the same generator. Once `u64::MAX` has been issued
/// the generator is exhausted and `next` fails.
#[derive(Debug, Default)]
pub struct NonceGenerator {
    last: AtomicU64,
}

impl NonceGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start above a previously used nonce
    ///
    /// Nothing carries nonces across process restarts; a caller that persists
    /// the last value can pass it here to survive a clock rollback.
    pub fn starting_after(floor: u64) -> Self {
        Self {
            last: AtomicU64::new(floor),
        }
    }

    /// Issue the next nonce
    pub fn next(&self) -> AuthResult<u64> {
        self.issue_at(now_millis())
    }

    /// Last value handed out (or the floor, if none yet)
    pub fn last_issued(&self) -> u64 {
        self.last.load(Ordering::SeqCst)
    }

    fn issue_at(&self, now_ms: u64) -> AuthResult<u64> {
        let bump = |last: u64| last.checked_add(1).map(|above| now_ms.max(above));
        self.last
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, bump)
            .ok()
            .and_then(bump)
            .ok_or(AuthError::NonceExhausted)
    }
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
