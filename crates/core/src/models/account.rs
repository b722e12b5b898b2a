use serde::{Deserialize, Serialize};

/// A chat user's link to an in-game player name.
///
/// Linking again replaces the previous name; links never expire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkedAccount {
    pub user_id: u64,
    pub ign: String,
}

impl LinkedAccount {
    pub fn new(user_id: u64, ign: impl Into<String>) -> Self {
        Self {
            user_id,
            ign: ign.into(),
        }
    }
}
