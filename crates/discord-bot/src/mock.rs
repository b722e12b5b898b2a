//! Mock platform for testing handlers and workflows without Discord.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockall::mock;
use serenity::model::id::{ChannelId, GuildId, MessageId, UserId};

use codebrew_core::errors::BotResult;

use crate::platform::Platform;
use crate::reply::Reply;

mock! {
    pub Platform {}

    #[async_trait]
    impl Platform for Platform {
        async fn send_dm(&self, user: UserId, content: &str) -> BotResult<()>;
        async fn post(&self, channel: ChannelId, reply: &Reply) -> BotResult<MessageId>;
        async fn delete_message(&self, channel: ChannelId, message: MessageId) -> BotResult<()>;
        async fn user_name(&self, user: UserId) -> BotResult<String>;
        async fn set_nickname(&self, guild: GuildId, user: UserId, nickname: &str) -> BotResult<()>;
        async fn kick(&self, guild: GuildId, user: UserId, reason: &str) -> BotResult<()>;
        async fn ban(&self, guild: GuildId, user: UserId, reason: &str) -> BotResult<()>;
        async fn timeout(&self, guild: GuildId, user: UserId, until: DateTime<Utc>) -> BotResult<()>;
    }
}
