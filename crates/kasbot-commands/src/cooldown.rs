//! Cooldown tracking for rate-limited commands
//!
//! Gated commands may be invoked once per user per window. The table is an
//! injected state object living in the framework `Data`, never a process
//! global, and `check`/`record` take the current instant explicitly so tests
//! can drive the clock.

use dashmap::DashMap;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;

/// Shared cooldown window for all gated commands.
pub const COOLDOWN_WINDOW: Duration = Duration::from_secs(15 * 60);

/// Commands subject to the per-user cooldown.
pub const GATED_COMMANDS: [&str; 2] = ["kexchanges", "kcoingecko"];

/// Whether a command is cooldown-gated.
pub fn is_gated(command: &str) -> bool {
    GATED_COMMANDS.contains(&command)
}

/// Per-user, per-command cooldown table with automatic expiry.
///
/// Each `record` call schedules its own cleanup task anchored to the
/// recording instant. Cleanup is idempotent: a task only removes the entry
/// it was scheduled for, so an overwriting `record` leaves the earlier task
/// as a harmless no-op.
#[derive(Debug, Clone)]
pub struct CooldownTracker {
    entries: Arc<DashMap<u64, HashMap<String, Instant>>>,
    window: Duration,
}

impl CooldownTracker {
    /// Create a tracker with the standard window.
    pub fn new() -> Self {
        Self::with_window(COOLDOWN_WINDOW)
    }

    /// Create a tracker with a custom window.
    pub fn with_window(window: Duration) -> Self {
        Self {
            entries: Arc::new(DashMap::new()),
            window,
        }
    }

    /// Remaining block time for `(user_id, command)` at `now`, if blocked.
    ///
    /// An entry whose window has elapsed but whose cleanup task has not yet
    /// run reports as unblocked; presence alone is not enough.
    pub fn check(&self, user_id: u64, command: &str, now: Instant) -> Option<Duration> {
        let user = self.entries.get(&user_id)?;
        let recorded = user.get(command)?;
        let remaining = (*recorded + self.window).saturating_duration_since(now);
        if remaining.is_zero() {
            None
        } else {
            Some(remaining)
        }
    }

    /// Record a successful invocation at `now` and schedule its expiry.
    pub fn record(&self, user_id: u64, command: &str, now: Instant) {
        self.entries
            .entry(user_id)
            .or_default()
            .insert(command.to_string(), now);

        let entries = Arc::clone(&self.entries);
        let window = self.window;
        let command = command.to_string();
        tokio::spawn(async move {
            tokio::time::sleep_until(now + window).await;

            if let Some(mut user) = entries.get_mut(&user_id) {
                if user.get(&command) == Some(&now) {
                    user.remove(&command);
                    debug!(user_id, command = %command, "cooldown expired");
                }
                let emptied = user.is_empty();
                drop(user);
                if emptied {
                    entries.remove_if(&user_id, |_, commands| commands.is_empty());
                }
            }
        });
    }

    /// Number of users with at least one live entry.
    pub fn tracked_users(&self) -> usize {
        self.entries.len()
    }

    /// Total live entries across all users.
    pub fn active_entries(&self) -> usize {
        self.entries.iter().map(|user| user.value().len()).sum()
    }
}

impl Default for CooldownTracker {
    fn default() -> Self {
        Self::new()
    }
}

/// Human-readable remaining-time reply for a blocked command.
pub fn format_wait_message(command: &str, remaining: Duration) -> String {
    let total_secs = remaining.as_secs();
    let minutes = (total_secs / 60) % 60;
    let seconds = total_secs % 60;
    format!(
        "Please wait for **{minutes} minutes and {seconds} seconds** before reusing the `{command}` command."
    )
}
