use serde::Deserialize;

/// Response of the Mojang name lookup.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PlayerIdentity {
    /// Undashed UUID
    pub id: String,
    /// Name with the player's own capitalisation
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlayerResponse {
    pub success: bool,
    pub cause: Option<String>,
    pub player: Option<Player>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub uuid: Option<String>,
    pub displayname: Option<String>,
    #[serde(default)]
    pub network_exp: f64,
    #[serde(default)]
    pub karma: u64,
    #[serde(default)]
    pub stats: PlayerStats,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlayerStats {
    #[serde(rename = "Bedwars")]
    pub bedwars: Option<BedwarsStats>,
    #[serde(rename = "Duels")]
    pub duels: Option<DuelsStats>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BedwarsStats {
    #[serde(rename = "Experience", default)]
    pub experience: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DuelsStats {
    #[serde(default)]
    pub wins: u64,
}

impl Player {
    pub fn bedwars_experience(&self) -> u64 {
        self.stats
            .bedwars
            .as_ref()
            .map(|b| b.experience.max(0.0) as u64)
            .unwrap_or(0)
    }

    pub fn duel_wins(&self) -> u64 {
        self.stats.duels.as_ref().map(|d| d.wins).unwrap_or(0)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct GuildResponse {
    pub success: bool,
    pub cause: Option<String>,
    pub guild: Option<Guild>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Guild {
    pub name: String,
    pub tag: Option<String>,
    pub tag_color: Option<String>,
    #[serde(default)]
    pub members: Vec<GuildMember>,
    #[serde(default)]
    pub exp: u64,
    /// Creation time in epoch milliseconds
    pub created: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GuildMember {
    pub uuid: String,
    pub rank: Option<String>,
}
