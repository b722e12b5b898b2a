use serde::{Deserialize, Serialize};

/// Answers collected from one applicant over direct messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationRecord {
    pub applicant: u64,
    pub ign: String,
    pub age: String,
    pub experience: String,
}

impl ApplicationRecord {
    /// Review fields in display order.
    pub fn fields(&self) -> [(&'static str, &str); 3] {
        [
            ("IGN", self.ign.as_str()),
            ("Age", self.age.as_str()),
            ("Experience", self.experience.as_str()),
        ]
    }
}

/// Outcome chosen by a reviewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReviewDecision {
    Accept,
    Deny,
}

impl ReviewDecision {
    /// Direct message sent to the applicant once the decision is made
    pub fn applicant_message(&self) -> &'static str {
        match self {
            ReviewDecision::Accept => "✅ Your application has been accepted!",
            ReviewDecision::Deny => "❌ Your application has been denied.",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewDecision::Accept => "accept",
            ReviewDecision::Deny => "deny",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "accept" => Some(ReviewDecision::Accept),
            "deny" => Some(ReviewDecision::Deny),
            _ => None,
        }
    }
}
