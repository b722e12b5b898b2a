//! Timed commands: reminders and the pomodoro timer.

use std::sync::Arc;
use std::time::Duration;

use eyre::Result;
use serenity::model::id::ChannelId;
use tracing::{info, warn};

use codebrew_core::duration::ReminderDuration;
use codebrew_core::models::reminder::PendingReminder;

use crate::args::split_first;
use crate::commands::Command;
use crate::dispatch::{usage, Invocation};
use crate::handlers::HandlerContext;
use crate::platform::Platform;
use crate::reply::Reply;

pub fn invalid_duration(prefix: &str) -> String {
    format!(
        "❌ Invalid format! Use `s` for seconds, `m` for minutes, or `hr` for hours.\nExample: `{}remindme 10m Take a break!`",
        prefix
    )
}

/// `remindme <time> <reminder>`
pub async fn remind_me(ctx: &HandlerContext, inv: &Invocation) -> Result<Reply> {
    let prefix = ctx.config.command_prefix();
    let (Some(token), message) = split_first(&inv.args) else {
        return Ok(usage(ctx, Command::RemindMe.spec()));
    };

    let Ok(duration) = ReminderDuration::parse(token) else {
        return Ok(Reply::text(invalid_duration(prefix)));
    };
    if message.is_empty() {
        return Ok(usage(ctx, Command::RemindMe.spec()));
    }

    let id = ctx
        .reminders
        .schedule(PendingReminder {
            user_id: inv.caller.0,
            channel_id: inv.channel.0,
            delay: duration.as_duration(),
            message: message.to_string(),
        })
        .await;
    info!("Reminder {} set by {} for {}", id, inv.caller, duration);

    Ok(Reply::text(format!(
        "⏰ Reminder set! I'll DM you in {}.\nReminder #{}, cancel it with `{}forget {}`.",
        duration, id, prefix, id
    )))
}

/// `reminders`
pub async fn reminders(ctx: &HandlerContext, inv: &Invocation) -> Result<Reply> {
    let pending = ctx.reminders.list(inv.caller).await;
    if pending.is_empty() {
        return Ok(Reply::text("You have no pending reminders."));
    }

    let lines: Vec<String> = pending
        .iter()
        .map(|r| format!("#{} · <t:{}:R> · {}", r.id, r.due_at.timestamp(), r.message))
        .collect();

    Ok(Reply::text(format!("⏰ Your reminders:\n{}", lines.join("\n"))))
}

/// `forget <id>`
pub async fn forget(ctx: &HandlerContext, inv: &Invocation) -> Result<Reply> {
    let Some(id) = split_first(&inv.args).0.and_then(|t| t.trim_start_matches('#').parse::<u64>().ok()) else {
        return Ok(usage(ctx, Command::Forget.spec()));
    };

    if ctx.reminders.cancel(inv.caller, id).await {
        Ok(Reply::text(format!("🗑️ Reminder #{} cancelled.", id)))
    } else {
        Ok(Reply::text(format!("⚠️ You have no pending reminder #{}.", id)))
    }
}

/// `pomodoro <work> <rest>`, both in minutes.
///
/// The first announcement is the reply; the break and completion messages
/// are posted later by a background task.
pub async fn pomodoro(ctx: &HandlerContext, inv: &Invocation) -> Result<Reply> {
    let (work, rest) = split_first(&inv.args);
    let (rest, _) = split_first(rest);
    let (Some(work), Some(rest)) = (parse_minutes(work), parse_minutes(rest)) else {
        return Ok(usage(ctx, Command::Pomodoro.spec()));
    };

    let platform = ctx.platform.clone();
    let channel = inv.channel;
    tokio::spawn(run_pomodoro(platform, channel, work, rest));

    Ok(Reply::text(format!("⏳ Work for {} minutes!", work)))
}

fn parse_minutes(token: Option<&str>) -> Option<u64> {
    token?.parse::<u64>().ok().filter(|m| m.checked_mul(60).is_some())
}

async fn run_pomodoro(platform: Arc<dyn Platform>, channel: ChannelId, work: u64, rest: u64) {
    tokio::time::sleep(Duration::from_secs(work * 60)).await;
    announce(platform.as_ref(), channel, format!("🛌 Break time for {} minutes!", rest)).await;

    tokio::time::sleep(Duration::from_secs(rest * 60)).await;
    announce(platform.as_ref(), channel, "✅ Pomodoro complete!".to_string()).await;
}

async fn announce(platform: &dyn Platform, channel: ChannelId, text: String) {
    if let Err(e) = platform.post(channel, &Reply::text(text)).await {
        warn!("Pomodoro message to {} failed: {}", channel, e);
    }
}
