mod common;

use std::sync::Arc;
use std::time::Duration;

use codebrew_core::models::reminder::PendingReminder;
use codebrew_discord_bot::reminders::ReminderScheduler;
use common::{recording_platform, Recorder};
use pretty_assertions::assert_eq;
use serenity::model::id::{ChannelId, UserId};

const USER: u64 = 501;
const CHANNEL: u64 = 77;

fn scheduler(open_dms: &[u64]) -> (ReminderScheduler, Recorder) {
    let (platform, recorder) = recording_platform(open_dms);
    (ReminderScheduler::new(Arc::new(platform)), recorder)
}

fn reminder(user: u64, secs: u64, message: &str) -> PendingReminder {
    PendingReminder {
        user_id: user,
        channel_id: CHANNEL,
        delay: Duration::from_secs(secs),
        message: message.to_string(),
    }
}

async fn advance(secs: u64) {
    tokio::time::sleep(Duration::from_secs(secs)).await;
    for _ in 0..5 {
        tokio::task::yield_now().await;
    }
}

#[tokio::test(start_paused = true)]
async fn test_reminder_is_delivered_by_dm_after_delay() {
    let (scheduler, recorder) = scheduler(&[USER]);

    scheduler.schedule(reminder(USER, 600, "Take a break!")).await;

    advance(599).await;
    assert!(recorder.dms().is_empty());

    advance(2).await;
    assert_eq!(
        recorder.dms(),
        vec![(UserId(USER), "🔔 Reminder: Take a break!".to_string())]
    );
    assert!(recorder.posts().is_empty());
    assert_eq!(scheduler.pending_count().await, 0);
}

#[tokio::test(start_paused = true)]
async fn test_closed_dms_fall_back_to_channel_mention() {
    let (scheduler, recorder) = scheduler(&[]);

    scheduler.schedule(reminder(USER, 10, "stretch")).await;
    advance(11).await;

    let posts = recorder.posts();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].0, ChannelId(CHANNEL));
    assert_eq!(
        posts[0].1.content.as_deref(),
        Some("<@501>, I couldn't DM you! Make sure your DMs are open.")
    );
}

#[tokio::test(start_paused = true)]
async fn test_scheduling_does_not_block_the_caller() {
    let (scheduler, _recorder) = scheduler(&[USER]);

    let started = tokio::time::Instant::now();
    scheduler.schedule(reminder(USER, 7200, "long one")).await;

    assert_eq!(started.elapsed(), Duration::ZERO);
    assert_eq!(scheduler.pending_count().await, 1);
}

#[tokio::test(start_paused = true)]
async fn test_list_shows_only_own_reminders() {
    let (scheduler, _recorder) = scheduler(&[USER, 2]);

    let late = scheduler.schedule(reminder(USER, 300, "later")).await;
    let soon = scheduler.schedule(reminder(USER, 60, "sooner")).await;
    scheduler.schedule(reminder(2, 30, "not yours")).await;

    let listed: Vec<_> = scheduler
        .list(UserId(USER))
        .await
        .into_iter()
        .map(|r| (r.id, r.message))
        .collect();

    assert_eq!(
        listed,
        vec![(soon, "sooner".to_string()), (late, "later".to_string())]
    );
}

#[tokio::test(start_paused = true)]
async fn test_cancelled_reminder_never_fires() {
    let (scheduler, recorder) = scheduler(&[USER]);

    let id = scheduler.schedule(reminder(USER, 60, "nope")).await;
    assert!(scheduler.cancel(UserId(USER), id).await);
    assert!(!scheduler.cancel(UserId(USER), id).await);

    advance(120).await;
    assert!(recorder.dms().is_empty());
    assert!(scheduler.list(UserId(USER)).await.is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_cannot_cancel_someone_elses_reminder() {
    let (scheduler, recorder) = scheduler(&[USER]);

    let id = scheduler.schedule(reminder(USER, 60, "mine")).await;
    assert!(!scheduler.cancel(UserId(999), id).await);

    advance(61).await;
    assert_eq!(recorder.dms().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_ids_are_unique_and_increasing() {
    let (scheduler, _recorder) = scheduler(&[USER]);

    let first = scheduler.schedule(reminder(USER, 5, "a")).await;
    let second = scheduler.schedule(reminder(USER, 5, "b")).await;

    assert_eq!(first, 1);
    assert_eq!(second, 2);
}
