use std::time::Duration;

use serde::{Deserialize, Serialize};

/// A reminder waiting for its delay to elapse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingReminder {
    pub user_id: u64,
    /// Channel the reminder was requested from, used when the DM is refused
    pub channel_id: u64,
    pub delay: Duration,
    pub message: String,
}

impl PendingReminder {
    pub fn notification(&self) -> String {
        format!("🔔 Reminder: {}", self.message)
    }

    pub fn dm_fallback(&self) -> String {
        format!(
            "<@{}>, I couldn't DM you! Make sure your DMs are open.",
            self.user_id
        )
    }
}
