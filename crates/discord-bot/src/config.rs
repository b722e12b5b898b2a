//! # Bot Configuration Module
//!
//! Loads the bot's settings from environment variables.
//!
//! ## Environment Variables
//!
//! - `DISCORD_TOKEN`: bot token (required)
//! - `DISCORD_APPLICATION_ID`: application id used for slash commands (required)
//! - `HYPIXEL_API_KEY`: key for the statistics API (optional, stat commands report its absence)
//! - `DISCORD_COMMAND_PREFIX`: text command prefix (default: "!")
//! - `DISCORD_TEST_GUILD_ID`: guild that also receives slash commands immediately
//! - `APPLICATION_CHANNEL_ID`: channel that receives submitted applications
//! - `ASSETS_DIR`: directory holding `coffee_pics/` and `tea_pics/` (default: ".")
//! - `LOG_LEVEL`: trace, debug, info, warn or error (default: "info")
//! - `MOJANG_API_URL`, `HYPIXEL_API_URL`: upstream base URLs

use eyre::{eyre, Result};
use serde::Deserialize;
use std::env;
use std::path::PathBuf;
use tracing::Level;

use codebrew_hypixel::HypixelEndpoints;

/// Review channel used when `APPLICATION_CHANNEL_ID` is not set
pub const DEFAULT_APPLICATION_CHANNEL_ID: u64 = 1329159564469342360;

/// Configuration for the Discord bot.
#[derive(Debug, Clone, Deserialize)]
pub struct BotConfig {
    /// Discord bot token (required)
    pub token: String,
    /// Application ID for Discord bot (required)
    pub application_id: u64,
    /// Hypixel API key; stat commands explain when it is missing
    pub hypixel_api_key: Option<String>,
    /// Prefix for commands (defaults to "!")
    pub command_prefix: Option<String>,
    /// Test guild ID for faster command registration during development
    pub test_guild_id: Option<u64>,
    /// Channel where submitted applications are posted for review
    pub application_channel_id: u64,
    /// Root directory of the image assets
    pub assets_dir: PathBuf,
    /// Log level name
    pub log_level: String,
    pub mojang_api_url: Option<String>,
    pub hypixel_api_url: Option<String>,
}

impl BotConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let token = env::var("DISCORD_TOKEN")
            .map_err(|_| eyre!("DISCORD_TOKEN environment variable not set"))?;

        let application_id = env::var("DISCORD_APPLICATION_ID")
            .map_err(|_| eyre!("DISCORD_APPLICATION_ID environment variable not set"))?
            .parse::<u64>()
            .map_err(|_| eyre!("DISCORD_APPLICATION_ID must be a valid u64"))?;

        let hypixel_api_key = env::var("HYPIXEL_API_KEY").ok();

        let command_prefix = env::var("DISCORD_COMMAND_PREFIX").ok();

        // Optional test guild ID for development
        let test_guild_id = env::var("DISCORD_TEST_GUILD_ID")
            .ok()
            .and_then(|id| id.parse::<u64>().ok());

        let application_channel_id = match env::var("APPLICATION_CHANNEL_ID") {
            Ok(id) => id
                .parse::<u64>()
                .map_err(|_| eyre!("APPLICATION_CHANNEL_ID must be a valid u64"))?,
            Err(_) => DEFAULT_APPLICATION_CHANNEL_ID,
        };

        let assets_dir = env::var("ASSETS_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("."));

        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            token,
            application_id,
            hypixel_api_key,
            command_prefix,
            test_guild_id,
            application_channel_id,
            assets_dir,
            log_level,
            mojang_api_url: env::var("MOJANG_API_URL").ok(),
            hypixel_api_url: env::var("HYPIXEL_API_URL").ok(),
        })
    }

    /// Get the command prefix (defaults to "!" if not set)
    pub fn command_prefix(&self) -> &str {
        self.command_prefix.as_deref().unwrap_or("!")
    }

    /// Tracing level, falling back to INFO for unknown names
    pub fn log_level(&self) -> Level {
        match self.log_level.to_ascii_lowercase().as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::INFO,
        }
    }

    /// Upstream endpoints, with any configured overrides applied
    pub fn hypixel_endpoints(&self) -> HypixelEndpoints {
        let mut endpoints = HypixelEndpoints::default();
        if let Some(url) = &self.mojang_api_url {
            endpoints.mojang = url.clone();
        }
        if let Some(url) = &self.hypixel_api_url {
            endpoints.hypixel = url.clone();
        }
        endpoints
    }

    /// Path of an asset relative to the assets directory
    pub fn asset(&self, relative: &str) -> PathBuf {
        self.assets_dir.join(relative)
    }
}
