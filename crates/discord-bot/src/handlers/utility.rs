//! Small stateless commands.

use chrono::{Local, Utc};
use eyre::Result;
use rand::seq::SliceRandom;
use serde::Deserialize;
use tracing::warn;

use codebrew_core::calendar::format_month_of;
use codebrew_core::clock::format_in_zone;

use crate::args::split_first;
use crate::commands::{Command, COMMANDS};
use crate::dispatch::{usage, Invocation};
use crate::handlers::HandlerContext;
use crate::handlers::moderation::GUILD_ONLY;
use crate::reply::Reply;
use crate::workflow::apply_button;

pub const CAT_API_URL: &str = "https://api.thecatapi.com/v1/images/search";

pub const INVALID_TIMEZONE: &str = "Invalid timezone. Try 'America/New_York' or 'Europe/London'.";

pub const QUOTES: &[&str] = &[
    "“Code is like humor. When you have to explain it, it’s bad.” – Cory House",
    "Minecraft fact: The Enderman language is just English in reverse.",
    "When life gives you bugs, write a patch!",
];

pub const CAT_FACTS: &[&str] = &[
    "Cats have five toes on their front paws, but only four on the back ones.",
    "A group of cats is called a clowder.",
    "Cats sleep for 70% of their lives.",
];

pub const PROGRAMMING_FACTS: &[&str] = &[
    "Python was named after Monty Python.",
    "Java was originally called Oak.",
];

pub const COFFEE_PICTURE: &str = "coffee_pics/pexels-chevanon-312418.jpg";
pub const TEA_PICTURES: &[&str] = &["tea_pics/green_tea.jpg", "tea_pics/black_tea.jpg"];

fn pick(options: &'static [&'static str]) -> &'static str {
    options.choose(&mut rand::thread_rng()).copied().unwrap_or_default()
}

pub fn quote() -> Reply {
    Reply::text(pick(QUOTES))
}

pub fn cat_facts() -> Reply {
    Reply::text(pick(CAT_FACTS))
}

pub fn facts() -> Reply {
    Reply::text(pick(PROGRAMMING_FACTS))
}

pub fn brew(ctx: &HandlerContext) -> Reply {
    Reply::text("Here is your coffee! ☕").with_file(ctx.config.asset(COFFEE_PICTURE))
}

pub fn tea(ctx: &HandlerContext) -> Reply {
    Reply::text("Here’s your tea, enjoy! 🍵").with_file(ctx.config.asset(pick(TEA_PICTURES)))
}

#[derive(Debug, Deserialize)]
struct CatImage {
    url: String,
}

/// Random picture URL from the cat image API.
pub async fn cat(ctx: &HandlerContext) -> Result<Reply> {
    let images: Vec<CatImage> = match ctx.http.get(CAT_API_URL).send().await {
        Ok(response) => response.json().await?,
        Err(e) => {
            warn!("Cat API request failed: {}", e);
            return Ok(Reply::text("😿 Couldn't fetch a cat right now, try again later."));
        }
    };

    match images.into_iter().next() {
        Some(image) => Ok(Reply::text(image.url)),
        None => Ok(Reply::text("😿 No cats available right now.")),
    }
}

pub fn calendar() -> Result<Reply> {
    let month = format_month_of(Local::now().date_naive())?;
    Ok(Reply::text(format!("```\n{}```", month)))
}

/// `time <timezone>`
pub fn time(inv: &Invocation) -> Reply {
    let (Some(zone), _) = split_first(&inv.args) else {
        return Reply::text(INVALID_TIMEZONE);
    };

    match format_in_zone(zone, Utc::now()) {
        Ok(now) => Reply::text(format!("🕒 Current time in {}: {}", zone, now)),
        Err(_) => Reply::text(INVALID_TIMEZONE),
    }
}

/// `alias <name>`: renames the caller in the current server.
pub async fn alias(ctx: &HandlerContext, inv: &Invocation) -> Result<Reply> {
    let name = inv.args.trim();
    if name.is_empty() {
        return Ok(usage(ctx, Command::Alias.spec()));
    }
    let Some(guild) = inv.guild else {
        return Ok(Reply::text(GUILD_ONLY));
    };

    match ctx.platform.set_nickname(guild, inv.caller, name).await {
        Ok(()) => Ok(Reply::text(format!("Nickname updated to {} ✅", name))),
        Err(e) => {
            warn!("Nickname change for {} failed: {}", inv.caller, e);
            Ok(Reply::text(format!("Failed to update nickname: {}", e)))
        }
    }
}

pub fn set_apply() -> Reply {
    Reply::text("Application setup complete! Click below to apply.").with_button(apply_button())
}

pub fn help(ctx: &HandlerContext) -> Reply {
    let prefix = ctx.config.command_prefix();
    let lines: Vec<String> = COMMANDS
        .iter()
        .map(|spec| format!("`{}` {}", spec.usage_with(prefix), spec.description))
        .collect();

    Reply::text(format!("📖 **Commands**\n{}", lines.join("\n")))
}
