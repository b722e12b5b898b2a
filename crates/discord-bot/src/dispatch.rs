//! Routes an [`Invocation`] to its handler.
//!
//! Prefix messages and slash commands both end up here as the same
//! `Invocation`, so every command has exactly one implementation.

use eyre::Result;
use serde_json::Value;
use serenity::model::{
    Permissions,
    id::{ChannelId, GuildId, UserId},
};
use tracing::{info, warn};

use crate::commands::{self, Command, CommandSpec, OptionKind};
use crate::handlers::{HandlerContext, account, moderation, reminder, todo, utility};
use crate::reply::Reply;

/// One command call, independent of how it arrived.
#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
    pub name: String,
    /// Raw argument text after the command name
    pub args: String,
    pub caller: UserId,
    pub channel: ChannelId,
    pub guild: Option<GuildId>,
    pub guild_name: Option<String>,
    /// Caller's resolved permissions in the channel; `None` outside a guild
    pub permissions: Option<Permissions>,
}

impl Invocation {
    pub fn new(name: impl Into<String>, args: impl Into<String>, caller: UserId, channel: ChannelId) -> Self {
        Self {
            name: name.into(),
            args: args.into(),
            caller,
            channel,
            guild: None,
            guild_name: None,
            permissions: None,
        }
    }
}

/// Whether `granted` satisfies `required`. Administrators pass every check.
pub fn has_permission(granted: Option<Permissions>, required: Permissions) -> bool {
    granted.is_some_and(|p| p.administrator() || p.contains(required))
}

pub fn permission_rejection(required: Permissions) -> String {
    format!(
        "❌ You need the `{}` permission to use this command.",
        required.get_permission_names().join(", ")
    )
}

/// Run the command named by `inv`.
///
/// Returns `Ok(None)` for names that are not registered; those are ignored
/// without a reply. Handler errors are returned to the caller, which logs
/// them and apologises in the channel.
pub async fn dispatch(ctx: &HandlerContext, inv: &Invocation) -> Result<Option<Reply>> {
    let Some(spec) = commands::lookup(&inv.name) else {
        return Ok(None);
    };

    if let Some(required) = spec.permission {
        if !has_permission(inv.permissions, required) {
            warn!("{} lacks {:?} for {}", inv.caller, required, spec.name);
            return Ok(Some(Reply::text(permission_rejection(required))));
        }
    }

    info!("Running command {} for {}", spec.name, inv.caller);

    let reply = match spec.command {
        Command::Link => account::link(ctx, inv).await?,
        Command::Profile => account::profile(ctx, inv).await?,
        Command::Matrix => account::matrix(ctx, inv).await?,
        Command::GuildStats => account::guild_stats(ctx, inv).await?,
        Command::Todo => todo::todo(ctx, inv).await?,
        Command::Tasks => todo::tasks(ctx, inv).await?,
        Command::Done => todo::done(ctx, inv).await?,
        Command::RemindMe => reminder::remind_me(ctx, inv).await?,
        Command::Reminders => reminder::reminders(ctx, inv).await?,
        Command::Forget => reminder::forget(ctx, inv).await?,
        Command::Pomodoro => reminder::pomodoro(ctx, inv).await?,
        Command::Warn => moderation::warn(ctx, inv).await?,
        Command::Kick => moderation::kick(ctx, inv).await?,
        Command::Ban => moderation::ban(ctx, inv).await?,
        Command::Timeout => moderation::timeout(ctx, inv).await?,
        Command::Print => moderation::print(ctx, inv).await?,
        Command::Quote => utility::quote(),
        Command::Brew => utility::brew(ctx),
        Command::Tea => utility::tea(ctx),
        Command::Cat => utility::cat(ctx).await?,
        Command::CatFacts => utility::cat_facts(),
        Command::Facts => utility::facts(),
        Command::Calendar => utility::calendar()?,
        Command::Time => utility::time(inv),
        Command::Alias => utility::alias(ctx, inv).await?,
        Command::SetApply => utility::set_apply(),
        Command::Help => utility::help(ctx),
    };

    Ok(Some(reply))
}

/// Usage hint for a malformed call, e.g. "Usage: `!link <ign>`"
pub fn usage(ctx: &HandlerContext, spec: &CommandSpec) -> Reply {
    Reply::text(format!("Usage: `{}`", spec.usage_with(ctx.config.command_prefix())))
}

/// Render slash command options as the positional argument string a prefix
/// command would carry. Options are emitted in registry order; missing ones are skipped.
pub fn render_options(spec: &CommandSpec, options: &[(String, Value)]) -> String {
    spec.options
        .iter()
        .filter_map(|option| {
            let (_, value) = options.iter().find(|(name, _)| name == option.name)?;
            let raw = match value {
                Value::String(s) => s.clone(),
                Value::Null => return None,
                other => other.to_string(),
            };

            Some(match option.kind {
                OptionKind::User => format!("<@{}>", raw),
                OptionKind::Channel => format!("<#{}>", raw),
                OptionKind::String | OptionKind::Integer => raw,
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}
