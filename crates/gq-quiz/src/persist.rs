//! Delivery of finished sessions to persistence.
//!
//! A failed write never changes what the player sees. The outcome is
//! reported as a [`PersistenceStatus`] next to the session result.

use std::time::Duration;

use gq_core::{AttemptRecord, AttemptSink};

/// Bounded exponential backoff for persistence writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total write attempts, the first one included (at least 1).
    pub max_attempts: u32,
    /// Wait before the first retry.
    pub initial_backoff: Duration,
    /// Upper bound for any single wait.
    pub max_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 1,
            initial_backoff: Duration::from_millis(250),
            max_backoff: Duration::from_secs(4),
        }
    }
}

impl RetryPolicy {
    /// A single attempt with no retries.
    pub fn none() -> Self {
        Self::default()
    }

    /// Set the total number of attempts (at least 1).
    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts.max(1);
        self
    }

    /// Set the initial and maximum backoff.
    pub fn with_backoff(mut self, initial: Duration, max: Duration) -> Self {
        self.initial_backoff = initial;
        self.max_backoff = max.max(initial);
        self
    }

    /// Wait before retry number `retry` (1-based), doubling each time.
    pub fn backoff_for(&self, retry: u32) -> Duration {
        let factor = 2u32.saturating_pow(retry.saturating_sub(1));
        self.initial_backoff
            .saturating_mul(factor)
            .min(self.max_backoff)
    }
}

/// Outcome of delivering a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistenceStatus {
    /// The record has not been handed to the sink yet.
    Pending,
    /// The record was stored.
    Saved {
        /// Attempts it took.
        attempts: u32,
    },
    /// Every attempt failed.
    Failed {
        /// Attempts made.
        attempts: u32,
        /// The last error.
        reason: String,
    },
}

impl PersistenceStatus {
    /// Whether the record was stored.
    pub fn is_saved(&self) -> bool {
        matches!(self, Self::Saved { .. })
    }

    /// Whether delivery is still outstanding.
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }
}

/// Write `record` to `sink`, retrying under `policy`.
///
/// `sleep` is called between attempts with the backoff to wait.
pub fn deliver<S, F>(
    sink: &mut S,
    record: &AttemptRecord,
    policy: &RetryPolicy,
    mut sleep: F,
) -> PersistenceStatus
where
    S: AttemptSink + ?Sized,
    F: FnMut(Duration),
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 1;
    loop {
        match sink.record_attempt(record) {
            Ok(()) => {
                tracing::debug!(record = %record.id, attempt, "attempt recorded");
                return PersistenceStatus::Saved { attempts: attempt };
            }
            Err(error) => {
                tracing::warn!(record = %record.id, attempt, %error, "failed to record attempt");
                if attempt >= max_attempts {
                    return PersistenceStatus::Failed {
                        attempts: attempt,
                        reason: error.to_string(),
                    };
                }
                sleep(policy.backoff_for(attempt));
                attempt += 1;
            }
        }
    }
}
