//! Per-user consecutive-failure tracking with human escalation.
//!
//! The counter map is volatile: a soft signal, lost on restart, never
//! persisted. State machine per user:
//!
//! - recognized intent: counter deleted (absent key ≡ 0);
//! - unknown intent: counter incremented (created at 1);
//! - on reaching the threshold: notify, then reset to 0 with the key
//!   retained, so the next unknown starts a fresh streak at 1.
//!
//! Notification failure is logged and never blocks or reverts the reset;
//! otherwise a flaky mail server would re-escalate the same user on every
//! message.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::nlu::Intent;

/// Consecutive unrecognized messages before escalating.
pub const DEFAULT_THRESHOLD: u32 = 2;

/// Best-effort escalation alert delivery.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Returns whether delivery succeeded. Must not panic; callers ignore
    /// the result beyond logging.
    async fn notify(&self, user_id: &str, last_message: &str, failed_attempts: u32) -> bool;
}

/// Tracks consecutive classification failures per user.
///
/// Owned and injected, not a global: tests instantiate isolated trackers.
/// The single lock serializes the read-modify-write per user; it is held
/// only for map updates, never across the notify call.
pub struct EscalationTracker {
    counters: Mutex<HashMap<String, u32>>,
    threshold: u32,
    notifier: Arc<dyn Notifier>,
}

impl EscalationTracker {
    pub fn new(threshold: u32, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            counters: Mutex::new(HashMap::new()),
            threshold,
            notifier,
        }
    }

    /// Record the classification outcome for one message.
    ///
    /// Returns the failure count now associated with the user (0 after a
    /// recognized intent or a fired escalation).
    pub async fn observe(&self, user_id: &str, intent: Intent, last_message: &str) -> u32 {
        if intent.is_recognized() {
            let mut counters = self.counters.lock().await;
            if let Some(previous) = counters.remove(user_id) {
                debug!(user = user_id, previous, "recognized intent, clearing failure streak");
            }
            return 0;
        }

        let escalate_with = {
            let mut counters = self.counters.lock().await;
            let count = counters.entry(user_id.to_string()).or_insert(0);
            *count += 1;
            if *count >= self.threshold {
                let attempts = *count;
                // Key retained at zero: the user is in a post-escalation
                // streak, and the next unknown counts from 1 again.
                *count = 0;
                Some(attempts)
            } else {
                debug!(user = user_id, count = *count, "unrecognized intent, streak incremented");
                None
            }
        };

        match escalate_with {
            Some(attempts) => {
                warn!(
                    user = user_id,
                    attempts,
                    last_message,
                    "escalation threshold reached, alerting a human"
                );
                let delivered = self.notifier.notify(user_id, last_message, attempts).await;
                if !delivered {
                    // The counter reset above stands regardless.
                    warn!(user = user_id, "escalation notification was not delivered");
                }
                0
            }
            None => self.current(user_id).await,
        }
    }

    /// Current streak for a user (0 when absent or just reset).
    pub async fn current(&self, user_id: &str) -> u32 {
        self.counters
            .lock()
            .await
            .get(user_id)
            .copied()
            .unwrap_or(0)
    }
}
