//! Moderation commands. Permission checks happen in the dispatcher before
//! any of these run.

use chrono::Utc;
use eyre::Result;
use serenity::model::id::UserId;
use tracing::{info, warn as log_warn};

use crate::args::{parse_channel_mention, parse_user_mention, split_first};
use crate::commands::Command;
use crate::dispatch::{usage, Invocation};
use crate::handlers::HandlerContext;
use crate::reply::{Embed, Reply};

pub const GUILD_ONLY: &str = "This command only works in a server.";
pub const PRINT_COLOR: u32 = 0x2ecc71;

/// Longest timeout the platform accepts
const MAX_TIMEOUT_MINUTES: i64 = 28 * 24 * 60;

/// Target user and free text, e.g. `<@id> spamming links`
fn target_and_text(args: &str) -> Option<(UserId, &str)> {
    let (user, text) = split_first(args);
    let user = user.and_then(parse_user_mention)?;
    (!text.is_empty()).then_some((user, text))
}

/// `warn <@user> <reason>`
pub async fn warn(ctx: &HandlerContext, inv: &Invocation) -> Result<Reply> {
    let Some((user, reason)) = target_and_text(&inv.args) else {
        return Ok(usage(ctx, Command::Warn.spec()));
    };
    let Some(guild_name) = inv.guild_name.as_deref().or(inv.guild.map(|_| "this server")) else {
        return Ok(Reply::text(GUILD_ONLY));
    };

    let text = format!("⚠️ Warning from {}: {}", guild_name, reason);
    match ctx.platform.send_dm(user, &text).await {
        Ok(()) => {
            info!("{} warned {}", inv.caller, user);
            Ok(Reply::text("User warned in DMs ✅"))
        }
        Err(e) => {
            log_warn!("Warning DM to {} failed: {}", user, e);
            Ok(Reply::text("Couldn't send DM to user ❌"))
        }
    }
}

/// `kick <@user> <reason>`
pub async fn kick(ctx: &HandlerContext, inv: &Invocation) -> Result<Reply> {
    let Some((user, reason)) = target_and_text(&inv.args) else {
        return Ok(usage(ctx, Command::Kick.spec()));
    };
    let Some(guild) = inv.guild else {
        return Ok(Reply::text(GUILD_ONLY));
    };

    let name = target_name(ctx, user).await;
    if let Err(e) = ctx.platform.kick(guild, user, reason).await {
        log_warn!("Kick of {} failed: {}", user, e);
        return Ok(Reply::text(format!("Failed to kick user: {}", e)));
    }

    info!("{} kicked {} from {}", inv.caller, user, guild);
    Ok(Reply::text(format!("👢 {} has been kicked. Reason: {}", name, reason)))
}

/// `ban <@user> <reason>`
pub async fn ban(ctx: &HandlerContext, inv: &Invocation) -> Result<Reply> {
    let Some((user, reason)) = target_and_text(&inv.args) else {
        return Ok(usage(ctx, Command::Ban.spec()));
    };
    let Some(guild) = inv.guild else {
        return Ok(Reply::text(GUILD_ONLY));
    };

    let name = target_name(ctx, user).await;
    if let Err(e) = ctx.platform.ban(guild, user, reason).await {
        log_warn!("Ban of {} failed: {}", user, e);
        return Ok(Reply::text(format!("Failed to ban user: {}", e)));
    }

    info!("{} banned {} from {}", inv.caller, user, guild);
    Ok(Reply::text(format!("🔨 {} has been banned. Reason: {}", name, reason)))
}

/// `timeout <@user> <minutes>`
pub async fn timeout(ctx: &HandlerContext, inv: &Invocation) -> Result<Reply> {
    let (user, rest) = split_first(&inv.args);
    let minutes = split_first(rest)
        .0
        .and_then(|m| m.parse::<i64>().ok())
        .filter(|m| (1..=MAX_TIMEOUT_MINUTES).contains(m));
    let (Some(user), Some(minutes)) = (user.and_then(parse_user_mention), minutes) else {
        return Ok(usage(ctx, Command::Timeout.spec()));
    };
    let Some(guild) = inv.guild else {
        return Ok(Reply::text(GUILD_ONLY));
    };

    let until = Utc::now() + chrono::Duration::minutes(minutes);
    match ctx.platform.timeout(guild, user, until).await {
        Ok(()) => {
            info!("{} timed out {} for {} minutes", inv.caller, user, minutes);
            Ok(Reply::text(format!(
                "⏳ <@{}> has been timed out for {} minutes.",
                user.0, minutes
            )))
        }
        Err(e) => Ok(Reply::text(format!("Failed to timeout user: {}", e))),
    }
}

/// `print <#channel> <message>`: posts the message as an embed and replies with nothing.
pub async fn print(ctx: &HandlerContext, inv: &Invocation) -> Result<Reply> {
    let (channel, message) = split_first(&inv.args);
    let (Some(channel), false) = (channel.and_then(parse_channel_mention), message.is_empty()) else {
        return Ok(usage(ctx, Command::Print.spec()));
    };

    let embed = Embed::new(PRINT_COLOR).description(message);
    ctx.platform.post(channel, &Reply::embed(embed)).await?;

    Ok(Reply::empty())
}

async fn target_name(ctx: &HandlerContext, user: UserId) -> String {
    ctx.platform
        .user_name(user)
        .await
        .unwrap_or_else(|_| format!("<@{}>", user.0))
}
