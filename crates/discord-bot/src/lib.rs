use eyre::Result;
use serenity::{http::Http, prelude::GatewayIntents, Client};
use std::sync::Arc;
use tracing::info;

pub mod args;
pub mod commands;
pub mod config;
pub mod dispatch;
pub mod handlers;
pub mod mock;
pub mod platform;
pub mod reminders;
pub mod reply;
pub mod workflow;

/// Start the Discord bot with the provided configuration.
///
/// Runs until the gateway connection ends or an error occurs. All bot state
/// is held in memory and lost when this returns.
///
/// # Arguments
///
/// * `config` - The bot configuration containing token, application ID, etc.
///
/// # Returns
///
/// * `Ok(())` if the bot shut down gracefully
/// * `Err` if an error occurred during initialization or operation
pub async fn start_bot(config: config::BotConfig) -> Result<()> {
    info!("Starting Discord bot");

    let http = Arc::new(Http::new_with_application_id(&config.token, config.application_id));
    let platform = Arc::new(platform::SerenityPlatform::new(http));
    let state = Arc::new(handlers::HandlerContext::new(config.clone(), platform));
    let handler = handlers::Handler::new(state);

    // Prefix commands and DM answers need message content; member lookups need GUILD_MEMBERS
    let intents = GatewayIntents::non_privileged()
        | GatewayIntents::MESSAGE_CONTENT
        | GatewayIntents::GUILD_MEMBERS;

    let mut client = Client::builder(&config.token, intents)
        .application_id(config.application_id)
        .event_handler(handler)
        .await?;

    info!("Connecting to Discord...");
    client.start().await?;

    Ok(())
}
