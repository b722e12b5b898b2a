use reqwest::{StatusCode, Url};
use tracing::debug;

use crate::error::{HypixelError, HypixelResult};
use crate::models::{Guild, GuildResponse, Player, PlayerIdentity, PlayerResponse};

pub const MOJANG_API_URL: &str = "https://api.mojang.com";
pub const HYPIXEL_API_URL: &str = "https://api.hypixel.net";

/// Base URLs of the upstream services.
#[derive(Debug, Clone)]
pub struct HypixelEndpoints {
    pub mojang: String,
    pub hypixel: String,
}

impl Default for HypixelEndpoints {
    fn default() -> Self {
        Self {
            mojang: MOJANG_API_URL.to_string(),
            hypixel: HYPIXEL_API_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct HypixelClient {
    http: reqwest::Client,
    api_key: Option<String>,
    endpoints: HypixelEndpoints,
}

impl HypixelClient {
    pub fn new(api_key: Option<String>, endpoints: HypixelEndpoints) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: api_key.filter(|key| !key.trim().is_empty()),
            endpoints,
        }
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    fn api_key(&self) -> HypixelResult<&str> {
        self.api_key.as_deref().ok_or(HypixelError::MissingApiKey)
    }

    /// Resolve a player name to its Mojang identity.
    pub async fn resolve_player(&self, name: &str) -> HypixelResult<PlayerIdentity> {
        let url = profile_url(&self.endpoints.mojang, name)?;
        debug!("Resolving player {}", name);

        let response = self.http.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        parse_identity(name, status, &body)
    }

    /// Fetch a player's statistics by UUID.
    pub async fn player(&self, uuid: &str) -> HypixelResult<Player> {
        let key = self.api_key()?;
        let url = format!("{}/player", self.endpoints.hypixel.trim_end_matches('/'));

        let body = self
            .http
            .get(url)
            .header("API-Key", key)
            .query(&[("uuid", uuid)])
            .send()
            .await?
            .text()
            .await?;

        parse_player(uuid, &body)
    }

    /// Fetch the guild a player belongs to, if any.
    pub async fn guild_of(&self, uuid: &str) -> HypixelResult<Option<Guild>> {
        let key = self.api_key()?;
        let url = format!("{}/guild", self.endpoints.hypixel.trim_end_matches('/'));

        let body = self
            .http
            .get(url)
            .header("API-Key", key)
            .query(&[("player", uuid)])
            .send()
            .await?
            .text()
            .await?;

        parse_guild(&body)
    }
}

/// Minecraft names are 1 to 16 characters of ASCII letters, digits and underscores.
pub fn is_valid_player_name(name: &str) -> bool {
    (1..=16).contains(&name.len()) && name.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_')
}

/// Build the Mojang profile URL for `name`. Names that cannot exist are
/// rejected here so they never reach the upstream service.
pub fn profile_url(base: &str, name: &str) -> HypixelResult<Url> {
    if !is_valid_player_name(name) {
        return Err(HypixelError::PlayerNotFound(name.to_string()));
    }

    let mut url = Url::parse(base).map_err(|e| HypixelError::Api {
        cause: format!("invalid profile endpoint {}: {}", base, e),
    })?;
    url.path_segments_mut()
        .map_err(|_| HypixelError::Api {
            cause: format!("invalid profile endpoint {}", base),
        })?
        .pop_if_empty()
        .extend(["users", "profiles", "minecraft", name]);

    Ok(url)
}

/// Interpret a Mojang profile lookup. Unknown names come back as 204 or 404.
pub fn parse_identity(name: &str, status: StatusCode, body: &str) -> HypixelResult<PlayerIdentity> {
    if status == StatusCode::NO_CONTENT || status == StatusCode::NOT_FOUND || body.trim().is_empty() {
        return Err(HypixelError::PlayerNotFound(name.to_string()));
    }
    if !status.is_success() {
        return Err(HypixelError::Api {
            cause: format!("profile lookup returned {}", status),
        });
    }

    serde_json::from_str(body).map_err(|e| HypixelError::Malformed(e.to_string()))
}

pub fn parse_player(uuid: &str, body: &str) -> HypixelResult<Player> {
    let response: PlayerResponse =
        serde_json::from_str(body).map_err(|e| HypixelError::Malformed(e.to_string()))?;

    if !response.success {
        return Err(HypixelError::Api {
            cause: response.cause.unwrap_or_else(|| "unknown cause".to_string()),
        });
    }

    response
        .player
        .ok_or_else(|| HypixelError::PlayerNotFound(uuid.to_string()))
}

pub fn parse_guild(body: &str) -> HypixelResult<Option<Guild>> {
    let response: GuildResponse =
        serde_json::from_str(body).map_err(|e| HypixelError::Malformed(e.to_string()))?;

    if !response.success {
        return Err(HypixelError::Api {
            cause: response.cause.unwrap_or_else(|| "unknown cause".to_string()),
        });
    }

    Ok(response.guild)
}
