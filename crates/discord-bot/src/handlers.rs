use serenity::{
    async_trait,
    model::{
        application::{
            command::Command as GlobalCommand,
            interaction::{
                application_command::ApplicationCommandInteraction,
                message_component::MessageComponentInteraction, Interaction,
                InteractionResponseType,
            },
        },
        channel::Message,
        gateway::Ready,
        id::{ChannelId, GuildId},
        Permissions,
    },
    prelude::*,
};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{error, info, warn};

use codebrew_core::models::{account::LinkedAccount, todo::TodoList};
use codebrew_core::store::{KeyValueStore, MemoryStore};
use codebrew_hypixel::HypixelClient;

use crate::args::parse_prefixed;
use crate::commands;
use crate::config::BotConfig;
use crate::dispatch::{dispatch, render_options, Invocation};
use crate::platform::{build_buttons, build_embed, Platform};
use crate::reminders::ReminderScheduler;
use crate::reply::Reply;
use crate::workflow::ApplicationEngine;

pub mod account;
pub mod application;
pub mod moderation;
pub mod reminder;
pub mod todo;
pub mod utility;

/// Posted when a handler fails unexpectedly
pub const APOLOGY: &str = "⚠️ Something went wrong while running that command.";

/// Shared state for command handlers.
///
/// One instance lives for the whole process and is shared by every event.
/// All of it is in memory and lost on restart.
pub struct HandlerContext {
    pub config: BotConfig,
    pub platform: Arc<dyn Platform>,
    pub accounts: Arc<dyn KeyValueStore<u64, LinkedAccount>>,
    pub todos: Arc<dyn KeyValueStore<u64, TodoList>>,
    pub hypixel: HypixelClient,
    pub applications: Arc<ApplicationEngine>,
    pub reminders: Arc<ReminderScheduler>,
    /// Client for the public image API used by `cat`
    pub http: reqwest::Client,
}

impl HandlerContext {
    pub fn new(config: BotConfig, platform: Arc<dyn Platform>) -> Self {
        let hypixel = HypixelClient::new(config.hypixel_api_key.clone(), config.hypixel_endpoints());
        let applications = Arc::new(ApplicationEngine::new(
            platform.clone(),
            ChannelId(config.application_channel_id),
        ));
        let reminders = Arc::new(ReminderScheduler::new(platform.clone()));

        Self {
            config,
            platform,
            accounts: Arc::new(MemoryStore::new()),
            todos: Arc::new(MemoryStore::new()),
            hypixel,
            applications,
            reminders,
            http: reqwest::Client::new(),
        }
    }
}

/// Main Discord handler that processes all events.
///
/// Text commands arrive through `message`, slash commands and buttons through
/// `interaction_create`. Both routes share one [`HandlerContext`].
pub struct Handler {
    state: Arc<HandlerContext>,
    commands_synced: AtomicBool,
}

impl Handler {
    pub fn new(state: Arc<HandlerContext>) -> Self {
        Self {
            state,
            commands_synced: AtomicBool::new(false),
        }
    }

    async fn run(&self, inv: &Invocation) -> Option<Reply> {
        match dispatch(&self.state, inv).await {
            Ok(reply) => reply,
            Err(e) => {
                error!("Error handling command {}: {:?}", inv.name, e);
                Some(Reply::text(APOLOGY))
            }
        }
    }

    async fn handle_slash(&self, ctx: &Context, command: &ApplicationCommandInteraction) -> eyre::Result<()> {
        info!("Received command: {}", command.data.name);

        let Some(spec) = commands::lookup(&command.data.name) else {
            warn!("Unknown command: {}", command.data.name);
            return Ok(());
        };

        let options: Vec<_> = command
            .data
            .options
            .iter()
            .filter_map(|o| o.value.clone().map(|v| (o.name.clone(), v)))
            .collect();

        let inv = Invocation {
            name: spec.name.to_string(),
            args: render_options(spec, &options),
            caller: command.user.id,
            channel: command.channel_id,
            guild: command.guild_id,
            guild_name: command.guild_id.and_then(|g| g.name(&ctx.cache)),
            permissions: command.member.as_ref().and_then(|m| m.permissions),
        };

        // Stat lookups and the cat API can take longer than the interaction deadline
        command
            .create_interaction_response(&ctx.http, |r| {
                r.kind(InteractionResponseType::DeferredChannelMessageWithSource)
            })
            .await?;

        let reply = self
            .run(&inv)
            .await
            .filter(|r| !r.is_empty())
            .unwrap_or_else(|| Reply::text("👍"));

        command
            .edit_original_interaction_response(&ctx.http, |r| {
                if let Some(content) = &reply.content {
                    r.content(content);
                }
                if let Some(embed) = &reply.embed {
                    r.embed(|e| build_embed(e, embed));
                }
                if !reply.buttons.is_empty() {
                    r.components(|c| build_buttons(c, &reply.buttons));
                }
                r
            })
            .await?;

        // Interaction edits cannot carry local files; send them as a follow-up post
        if !reply.files.is_empty() {
            let files = Reply {
                files: reply.files.clone(),
                ..Reply::empty()
            };
            self.state.platform.post(command.channel_id, &files).await?;
        }

        Ok(())
    }

    async fn handle_component(
        &self,
        ctx: &Context,
        component: &MessageComponentInteraction,
    ) -> eyre::Result<()> {
        let permissions = component.member.as_ref().and_then(|m| m.permissions);
        let Some(reply) = application::handle_component(
            &self.state,
            &component.data.custom_id,
            component.user.id,
            permissions,
        )
        .await?
        else {
            return Ok(());
        };

        component
            .create_interaction_response(&ctx.http, |r| {
                r.kind(InteractionResponseType::ChannelMessageWithSource)
                    .interaction_response_data(|m| {
                        m.content(reply.content.as_deref().unwrap_or_default())
                            .ephemeral(true)
                    })
            })
            .await?;

        Ok(())
    }
}

/// Permissions of a message author in the guild the message was sent in.
async fn message_permissions(ctx: &Context, msg: &Message) -> Option<Permissions> {
    let member = msg.member(ctx).await.ok()?;
    member.permissions(&ctx.cache).ok()
}

#[async_trait]
impl EventHandler for Handler {
    /// Handle ready events (when bot connects to Discord)
    async fn ready(&self, ctx: Context, ready: Ready) {
        info!("{} is connected!", ready.user.name);

        // Reconnects fire ready again; commands only need syncing once
        if self.commands_synced.swap(true, Ordering::SeqCst) {
            return;
        }

        // Guild commands show up immediately, global ones after a cache delay
        if let Some(test_guild_id) = self.state.config.test_guild_id {
            let guild_id = GuildId(test_guild_id);

            match guild_id
                .set_application_commands(&ctx.http, |commands| commands::register_commands(commands))
                .await
            {
                Ok(cmds) => info!(
                    "Guild commands registered successfully for {}! Total commands: {}",
                    test_guild_id,
                    cmds.len()
                ),
                Err(why) => error!("Error registering guild commands: {:?}", why),
            }
        }

        match GlobalCommand::set_global_application_commands(&ctx.http, |commands| {
            commands::register_commands(commands)
        })
        .await
        {
            Ok(cmds) => info!("Synced {} slash commands", cmds.len()),
            Err(why) => error!("Error registering global commands: {:?}", why),
        }
    }

    /// Handle text commands and application answers sent by DM
    async fn message(&self, ctx: Context, msg: Message) {
        if msg.author.bot {
            return;
        }

        if msg.guild_id.is_none() {
            match self.state.applications.handle_dm(msg.author.id, &msg.content).await {
                Ok(true) => return,
                Ok(false) => {}
                Err(e) => {
                    error!("Error handling application answer from {}: {:?}", msg.author.id, e);
                    return;
                }
            }
        }

        let Some((name, args)) = parse_prefixed(self.state.config.command_prefix(), &msg.content) else {
            return;
        };
        let Some(spec) = commands::lookup(name) else {
            return;
        };

        // Resolving permissions costs a member lookup, so only gated commands pay it
        let permissions = match spec.permission {
            Some(_) => message_permissions(&ctx, &msg).await,
            None => None,
        };

        let inv = Invocation {
            name: spec.name.to_string(),
            args: args.to_string(),
            caller: msg.author.id,
            channel: msg.channel_id,
            guild: msg.guild_id,
            guild_name: msg.guild_id.and_then(|g| g.name(&ctx.cache)),
            permissions,
        };

        if let Some(reply) = self.run(&inv).await.filter(|r| !r.is_empty()) {
            if let Err(why) = self.state.platform.post(msg.channel_id, &reply).await {
                error!("Failed to send reply to {}: {:?}", msg.channel_id, why);
            }
        }
    }

    /// Handle interactions (slash commands, buttons, etc.)
    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        match interaction {
            Interaction::ApplicationCommand(command) => {
                if let Err(e) = self.handle_slash(&ctx, &command).await {
                    error!("Error handling command: {:?}", e);
                }
            }
            Interaction::MessageComponent(component) => {
                if let Err(e) = self.handle_component(&ctx, &component).await {
                    error!("Error handling component interaction: {:?}", e);

                    if let Err(why) = component
                        .create_interaction_response(&ctx.http, |r| {
                            r.kind(InteractionResponseType::ChannelMessageWithSource)
                                .interaction_response_data(|m| m.content(APOLOGY).ephemeral(true))
                        })
                        .await
                    {
                        error!("Failed to send error response: {:?}", why);
                    }
                }
            }
            _ => {}
        }
    }
}
