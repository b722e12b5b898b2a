#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use codebrew_core::errors::BotError;
use codebrew_discord_bot::config::BotConfig;
use codebrew_discord_bot::mock::MockPlatform;
use codebrew_discord_bot::reply::Reply;
use serenity::model::id::{ChannelId, MessageId, UserId};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

pub const REVIEW_CHANNEL: u64 = 42;
pub const REVIEW_MESSAGE: u64 = 9000;

pub fn test_config() -> BotConfig {
    BotConfig {
        token: "test_token".to_string(),
        application_id: 12345,
        hypixel_api_key: None,
        command_prefix: None,
        test_guild_id: None,
        application_channel_id: REVIEW_CHANNEL,
        assets_dir: PathBuf::from("assets"),
        log_level: "info".to_string(),
        mojang_api_url: None,
        hypixel_api_url: None,
    }
}

/// Everything a [`MockPlatform`] built by [`recording_platform`] was asked to do.
#[derive(Clone, Default)]
pub struct Recorder {
    pub dms: Arc<Mutex<Vec<(UserId, String)>>>,
    pub posts: Arc<Mutex<Vec<(ChannelId, Reply)>>>,
    pub deletes: Arc<Mutex<Vec<(ChannelId, MessageId)>>>,
}

impl Recorder {
    pub fn dms(&self) -> Vec<(UserId, String)> {
        self.dms.lock().unwrap().clone()
    }

    pub fn dm_texts(&self) -> Vec<String> {
        self.dms().into_iter().map(|(_, text)| text).collect()
    }

    pub fn posts(&self) -> Vec<(ChannelId, Reply)> {
        self.posts.lock().unwrap().clone()
    }

    pub fn deletes(&self) -> Vec<(ChannelId, MessageId)> {
        self.deletes.lock().unwrap().clone()
    }
}

/// A mock that accepts DMs from everyone in `open_dms`, refuses the rest,
/// and records DMs, posts and deletions.
pub fn recording_platform(open_dms: &[u64]) -> (MockPlatform, Recorder) {
    let recorder = Recorder::default();
    let mut platform = MockPlatform::new();

    let open: Vec<u64> = open_dms.to_vec();
    let dms = recorder.dms.clone();
    platform.expect_send_dm().returning(move |user, content| {
        if !open.contains(&user.0) {
            return Err(BotError::Delivery("Cannot send messages to this user".to_string()));
        }
        dms.lock().unwrap().push((user, content.to_string()));
        Ok(())
    });

    let posts = recorder.posts.clone();
    platform.expect_post().returning(move |channel, reply| {
        posts.lock().unwrap().push((channel, reply.clone()));
        Ok(MessageId(REVIEW_MESSAGE))
    });

    let deletes = recorder.deletes.clone();
    platform.expect_delete_message().returning(move |channel, message| {
        deletes.lock().unwrap().push((channel, message));
        Ok(())
    });

    platform
        .expect_user_name()
        .returning(|user| Ok(format!("user{}", user.0)));

    (platform, recorder)
}

/// A canned upstream answer for requests whose path starts with `prefix`.
#[derive(Clone)]
pub struct Route {
    pub prefix: &'static str,
    pub status: u16,
    pub body: String,
}

impl Route {
    pub fn ok(prefix: &'static str, body: impl Into<String>) -> Self {
        Self { prefix, status: 200, body: body.into() }
    }

    pub fn status(prefix: &'static str, status: u16) -> Self {
        Self { prefix, status, body: String::new() }
    }
}

/// Serve `routes` over plain HTTP on a loopback port and return the base URL.
/// Unmatched paths answer 404.
pub async fn stub_api(routes: Vec<Route>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());

    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            let routes = routes.clone();
            tokio::spawn(async move {
                let mut request = Vec::new();
                let mut buf = [0u8; 1024];
                while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                    match socket.read(&mut buf).await {
                        Ok(0) | Err(_) => return,
                        Ok(n) => request.extend_from_slice(&buf[..n]),
                    }
                }

                let head = String::from_utf8_lossy(&request);
                let path = head.split_whitespace().nth(1).unwrap_or("/").to_string();
                let (status, body) = routes
                    .iter()
                    .find(|route| path.starts_with(route.prefix))
                    .map(|route| (route.status, route.body.clone()))
                    .unwrap_or((404, String::new()));

                let response = format!(
                    "HTTP/1.1 {} Stub\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                    status,
                    body.len(),
                    body
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    base
}

/// A config whose stat commands talk to `base` with a configured key.
pub fn stubbed_config(base: &str) -> BotConfig {
    BotConfig {
        hypixel_api_key: Some("test-key".to_string()),
        mojang_api_url: Some(base.to_string()),
        hypixel_api_url: Some(base.to_string()),
        ..test_config()
    }
}
