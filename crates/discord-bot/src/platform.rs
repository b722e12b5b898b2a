//! The messaging platform as seen by handlers, the application workflow and
//! the reminder scheduler. [`SerenityPlatform`] talks to Discord over REST;
//! tests substitute [`crate::mock::MockPlatform`].

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serenity::{
    builder::{CreateComponents, CreateEmbed, CreateMessage},
    http::Http,
    model::{
        application::component::ButtonStyle as SerenityButtonStyle,
        channel::AttachmentType,
        id::{ChannelId, GuildId, MessageId, UserId},
    },
};
use tracing::debug;

use codebrew_core::errors::{BotError, BotResult};

use crate::reply::{Button, ButtonStyle, Embed, Reply};

#[async_trait]
pub trait Platform: Send + Sync {
    /// Direct message a user. Fails with [`BotError::Delivery`] when the user does not accept DMs.
    async fn send_dm(&self, user: UserId, content: &str) -> BotResult<()>;

    /// Post a reply into a channel and return the new message's id.
    async fn post(&self, channel: ChannelId, reply: &Reply) -> BotResult<MessageId>;

    async fn delete_message(&self, channel: ChannelId, message: MessageId) -> BotResult<()>;

    /// Display name of a user.
    async fn user_name(&self, user: UserId) -> BotResult<String>;

    async fn set_nickname(&self, guild: GuildId, user: UserId, nickname: &str) -> BotResult<()>;

    async fn kick(&self, guild: GuildId, user: UserId, reason: &str) -> BotResult<()>;

    async fn ban(&self, guild: GuildId, user: UserId, reason: &str) -> BotResult<()>;

    /// Mute a member until the given instant.
    async fn timeout(&self, guild: GuildId, user: UserId, until: DateTime<Utc>) -> BotResult<()>;
}

pub struct SerenityPlatform {
    http: Arc<Http>,
}

impl SerenityPlatform {
    pub fn new(http: Arc<Http>) -> Self {
        Self { http }
    }
}

fn internal(error: serenity::Error) -> BotError {
    BotError::Internal(error.into())
}

#[async_trait]
impl Platform for SerenityPlatform {
    async fn send_dm(&self, user: UserId, content: &str) -> BotResult<()> {
        let channel = user
            .create_dm_channel(&*self.http)
            .await
            .map_err(|e| BotError::Delivery(e.to_string()))?;

        channel
            .say(&self.http, content)
            .await
            .map_err(|e| BotError::Delivery(e.to_string()))?;

        debug!("Sent DM to {}", user);
        Ok(())
    }

    async fn post(&self, channel: ChannelId, reply: &Reply) -> BotResult<MessageId> {
        let message = channel
            .send_message(&self.http, |m| build_message(m, reply))
            .await
            .map_err(internal)?;

        Ok(message.id)
    }

    async fn delete_message(&self, channel: ChannelId, message: MessageId) -> BotResult<()> {
        channel
            .delete_message(&self.http, message)
            .await
            .map_err(internal)
    }

    async fn user_name(&self, user: UserId) -> BotResult<String> {
        let user = user.to_user(&*self.http).await.map_err(internal)?;
        Ok(user.name)
    }

    async fn set_nickname(&self, guild: GuildId, user: UserId, nickname: &str) -> BotResult<()> {
        guild
            .edit_member(&self.http, user, |m| m.nickname(nickname))
            .await
            .map_err(internal)?;
        Ok(())
    }

    async fn kick(&self, guild: GuildId, user: UserId, reason: &str) -> BotResult<()> {
        guild
            .kick_with_reason(&self.http, user, reason)
            .await
            .map_err(internal)
    }

    async fn ban(&self, guild: GuildId, user: UserId, reason: &str) -> BotResult<()> {
        guild
            .ban_with_reason(&self.http, user, 0, reason)
            .await
            .map_err(internal)
    }

    async fn timeout(&self, guild: GuildId, user: UserId, until: DateTime<Utc>) -> BotResult<()> {
        guild
            .edit_member(&self.http, user, |m| {
                m.disable_communication_until(until.to_rfc3339())
            })
            .await
            .map_err(internal)?;
        Ok(())
    }
}

/// Fill a message builder from a [`Reply`].
pub fn build_message<'a, 'b>(
    m: &'b mut CreateMessage<'a>,
    reply: &'a Reply,
) -> &'b mut CreateMessage<'a> {
    if let Some(content) = &reply.content {
        m.content(content);
    }
    if let Some(embed) = &reply.embed {
        m.embed(|e| build_embed(e, embed));
    }
    if !reply.buttons.is_empty() {
        m.components(|c| build_buttons(c, &reply.buttons));
    }
    for path in &reply.files {
        m.add_file(AttachmentType::Path(path.as_path()));
    }
    m
}

pub fn build_embed<'a>(e: &'a mut CreateEmbed, embed: &Embed) -> &'a mut CreateEmbed {
    e.color(embed.color);
    if let Some(title) = &embed.title {
        e.title(title);
    }
    if let Some(description) = &embed.description {
        e.description(description);
    }
    for field in &embed.fields {
        e.field(&field.name, &field.value, field.inline);
    }
    if let Some(footer) = &embed.footer {
        e.footer(|f| f.text(footer));
    }
    e
}

pub fn build_buttons<'a>(c: &'a mut CreateComponents, buttons: &[Button]) -> &'a mut CreateComponents {
    c.create_action_row(|row| {
        for button in buttons {
            row.create_button(|b| {
                b.custom_id(&button.custom_id)
                    .label(&button.label)
                    .style(button_style(button.style))
            });
        }
        row
    })
}

fn button_style(style: ButtonStyle) -> SerenityButtonStyle {
    match style {
        ButtonStyle::Primary => SerenityButtonStyle::Primary,
        ButtonStyle::Secondary => SerenityButtonStyle::Secondary,
        ButtonStyle::Success => SerenityButtonStyle::Success,
        ButtonStyle::Danger => SerenityButtonStyle::Danger,
    }
}
