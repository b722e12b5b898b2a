//! In-memory reminder scheduler.
//!
//! Each reminder is a spawned task that sleeps for its delay and then
//! delivers. The registry keeps the task handle so the owner can list or
//! cancel reminders before they fire. Nothing survives a restart.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serenity::model::id::{ChannelId, UserId};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use codebrew_core::models::reminder::PendingReminder;

use crate::platform::Platform;
use crate::reply::Reply;

struct ScheduledReminder {
    owner: UserId,
    message: String,
    due_at: DateTime<Utc>,
    handle: JoinHandle<()>,
}

/// A reminder that has not fired yet, as shown to its owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderSummary {
    pub id: u64,
    pub message: String,
    pub due_at: DateTime<Utc>,
}

type Registry = Arc<Mutex<HashMap<u64, ScheduledReminder>>>;

pub struct ReminderScheduler {
    platform: Arc<dyn Platform>,
    next_id: AtomicU64,
    pending: Registry,
}

impl ReminderScheduler {
    pub fn new(platform: Arc<dyn Platform>) -> Self {
        Self {
            platform,
            next_id: AtomicU64::new(1),
            pending: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Schedule a reminder and return its id. The caller is never blocked.
    pub async fn schedule(&self, reminder: PendingReminder) -> u64 {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let owner = UserId(reminder.user_id);
        let due_at = chrono::Duration::from_std(reminder.delay)
            .ok()
            .and_then(|delay| Utc::now().checked_add_signed(delay))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        let message = reminder.message.clone();

        // Held across the spawn so a zero delay cannot fire before the entry exists
        let mut pending = self.pending.lock().await;

        let platform = self.platform.clone();
        let registry = self.pending.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(reminder.delay).await;
            registry.lock().await.remove(&id);
            deliver(platform.as_ref(), &reminder).await;
        });

        pending.insert(
            id,
            ScheduledReminder {
                owner,
                message,
                due_at,
                handle,
            },
        );

        debug!("Reminder {} scheduled for {}", id, owner);
        id
    }

    /// Reminders of `owner` that have not fired, soonest first.
    pub async fn list(&self, owner: UserId) -> Vec<ReminderSummary> {
        let pending = self.pending.lock().await;
        let mut reminders: Vec<_> = pending
            .iter()
            .filter(|(_, r)| r.owner == owner)
            .map(|(id, r)| ReminderSummary {
                id: *id,
                message: r.message.clone(),
                due_at: r.due_at,
            })
            .collect();

        reminders.sort_by_key(|r| (r.due_at, r.id));
        reminders
    }

    /// Cancel a pending reminder. Users can only cancel their own.
    pub async fn cancel(&self, owner: UserId, id: u64) -> bool {
        let mut pending = self.pending.lock().await;
        match pending.get(&id) {
            Some(reminder) if reminder.owner == owner => {
                if let Some(reminder) = pending.remove(&id) {
                    reminder.handle.abort();
                }
                info!("Reminder {} cancelled by {}", id, owner);
                true
            }
            _ => false,
        }
    }

    pub async fn pending_count(&self) -> usize {
        self.pending.lock().await.len()
    }
}

/// DM the reminder, or mention the user in the original channel when DMs are closed.
async fn deliver(platform: &dyn Platform, reminder: &PendingReminder) {
    let user = UserId(reminder.user_id);
    match platform.send_dm(user, &reminder.notification()).await {
        Ok(()) => debug!("Reminder delivered to {}", user),
        Err(e) => {
            warn!("Reminder DM to {} failed: {}", user, e);
            let channel = ChannelId(reminder.channel_id);
            if let Err(e) = platform.post(channel, &Reply::text(reminder.dm_fallback())).await {
                warn!("Reminder fallback for {} failed: {}", user, e);
            }
        }
    }
}
