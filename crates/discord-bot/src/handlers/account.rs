//! Linked accounts and the statistics commands built on them.

use chrono::{TimeZone, Utc};
use eyre::Result;
use tracing::{info, warn};

use codebrew_core::models::account::LinkedAccount;
use codebrew_core::stats::{bedwars_stars, guild_level, matrix_level, network_level};
use codebrew_hypixel::models::{Guild, Player};
use codebrew_hypixel::HypixelError;

use crate::args::split_first;
use crate::commands::Command;
use crate::dispatch::{usage, Invocation};
use crate::handlers::HandlerContext;
use crate::reply::{Embed, Reply};

pub const PROFILE_COLOR: u32 = 0x00ff00;
pub const MATRIX_COLOR: u32 = 0x00ff41;
/// Colour used when a guild has no tag colour
pub const DEFAULT_TAG_COLOR: u32 = 0xAAAAAA;

pub async fn link(ctx: &HandlerContext, inv: &Invocation) -> Result<Reply> {
    let (Some(ign), _) = split_first(&inv.args) else {
        return Ok(usage(ctx, Command::Link.spec()));
    };

    ctx.accounts
        .set(inv.caller.0, LinkedAccount::new(inv.caller.0, ign))
        .await?;
    info!("{} linked to {}", inv.caller, ign);

    Ok(Reply::text(format!("Linked your IGN to **{}** ✅", ign)))
}

pub async fn profile(ctx: &HandlerContext, inv: &Invocation) -> Result<Reply> {
    let Some(account) = ctx.accounts.get(&inv.caller.0).await? else {
        return Ok(Reply::text(format!(
            "Please use `{}link <ign>` first to link your account.",
            ctx.config.command_prefix()
        )));
    };
    if let Some(reply) = missing_api_key(ctx) {
        return Ok(reply);
    }

    let player = match fetch_player(ctx, &account.ign).await {
        Ok(player) => player,
        Err(e) => return Ok(lookup_failed(&account.ign, e)),
    };

    Ok(Reply::embed(profile_embed(&account.ign, &player)))
}

pub async fn matrix(ctx: &HandlerContext, inv: &Invocation) -> Result<Reply> {
    let (Some(ign), _) = split_first(&inv.args) else {
        return Ok(usage(ctx, Command::Matrix.spec()));
    };
    if let Some(reply) = missing_api_key(ctx) {
        return Ok(reply);
    }

    let identity = match ctx.hypixel.resolve_player(ign).await {
        Ok(identity) => identity,
        Err(e) => return Ok(lookup_failed(ign, e)),
    };
    let player = match ctx.hypixel.player(&identity.id).await {
        Ok(player) => player,
        Err(e) => return Ok(lookup_failed(ign, e)),
    };

    Ok(Reply::embed(matrix_embed(&identity.name, &player)))
}

pub async fn guild_stats(ctx: &HandlerContext, inv: &Invocation) -> Result<Reply> {
    let (Some(ign), _) = split_first(&inv.args) else {
        return Ok(usage(ctx, Command::GuildStats.spec()));
    };
    if let Some(reply) = missing_api_key(ctx) {
        return Ok(reply);
    }

    let identity = match ctx.hypixel.resolve_player(ign).await {
        Ok(identity) => identity,
        Err(e) => return Ok(lookup_failed(ign, e)),
    };

    match ctx.hypixel.guild_of(&identity.id).await {
        Ok(Some(guild)) => Ok(Reply::embed(guild_embed(&guild))),
        Ok(None) => Ok(Reply::text(format!("⚠️ {} is not in a guild.", identity.name))),
        Err(e) => Ok(lookup_failed(ign, e)),
    }
}

/// Stat lookups stop before touching Mojang when no Hypixel key is configured.
fn missing_api_key(ctx: &HandlerContext) -> Option<Reply> {
    (!ctx.hypixel.has_api_key())
        .then(|| Reply::text(hypixel_error_text(&HypixelError::MissingApiKey)))
}

async fn fetch_player(ctx: &HandlerContext, ign: &str) -> Result<Player, HypixelError> {
    let identity = ctx.hypixel.resolve_player(ign).await?;
    ctx.hypixel.player(&identity.id).await
}

fn lookup_failed(ign: &str, error: HypixelError) -> Reply {
    warn!("Stats lookup for {} failed: {}", ign, error);
    Reply::text(hypixel_error_text(&error))
}

/// Chat message for each kind of upstream failure.
pub fn hypixel_error_text(error: &HypixelError) -> String {
    match error {
        HypixelError::MissingApiKey => {
            "⚠️ The Hypixel API key is not configured. Ask an admin to set `HYPIXEL_API_KEY`.".to_string()
        }
        HypixelError::PlayerNotFound(name) => format!("❌ Player `{}` was not found.", name),
        HypixelError::Api { cause } => format!("⚠️ Hypixel API error: {}", cause),
        HypixelError::Transport(_) => "⚠️ Couldn't reach the stats API. Try again later.".to_string(),
        HypixelError::Malformed(_) => "⚠️ The stats API sent a response I couldn't read.".to_string(),
    }
}

pub fn profile_embed(ign: &str, player: &Player) -> Embed {
    Embed::new(PROFILE_COLOR)
        .title(format!("{}'s Hypixel Stats", ign))
        .field("Network Level", network_level(player.network_exp).to_string(), true)
        .field("Karma", player.karma.to_string(), true)
}

pub fn matrix_embed(name: &str, player: &Player) -> Embed {
    let display = player.displayname.as_deref().unwrap_or(name);

    Embed::new(MATRIX_COLOR)
        .title(format!("🟩 MATRIX // {}", display))
        .description("```\n> accessing player records...\n> done\n```")
        .field("Level", format!("{:.2}", matrix_level(player.network_exp)), true)
        .field("Bedwars Stars", format!("{}✫", bedwars_stars(player.bedwars_experience())), true)
        .field("Duel Wins", player.duel_wins().to_string(), true)
        .footer("Wake up, Neo...")
}

pub fn guild_embed(guild: &Guild) -> Embed {
    let created = Utc
        .timestamp_millis_opt(guild.created)
        .single()
        .map(|at| at.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "Unknown".to_string());

    Embed::new(tag_color(guild.tag_color.as_deref()))
        .title(format!("🏰 {}", guild.name))
        .field("Name", guild.name.clone(), true)
        .field("Tag", guild.tag.clone().unwrap_or_else(|| "None".to_string()), true)
        .field("Level", guild_level(guild.exp).to_string(), true)
        .field("Members", guild.members.len().to_string(), true)
        .field("Created", created, true)
}

/// Embed colour for a Minecraft chat colour name such as `DARK_AQUA`.
pub fn tag_color(name: Option<&str>) -> u32 {
    match name.map(str::to_ascii_uppercase).as_deref() {
        Some("BLACK") => 0x000000,
        Some("DARK_BLUE") => 0x0000AA,
        Some("DARK_GREEN") => 0x00AA00,
        Some("DARK_AQUA") => 0x00AAAA,
        Some("DARK_RED") => 0xAA0000,
        Some("DARK_PURPLE") => 0xAA00AA,
        Some("GOLD") => 0xFFAA00,
        Some("DARK_GRAY") => 0x555555,
        Some("BLUE") => 0x5555FF,
        Some("GREEN") => 0x55FF55,
        Some("AQUA") => 0x55FFFF,
        Some("RED") => 0xFF5555,
        Some("LIGHT_PURPLE") => 0xFF55FF,
        Some("YELLOW") => 0xFFFF55,
        Some("WHITE") => 0xFFFFFF,
        _ => DEFAULT_TAG_COLOR,
    }
}
