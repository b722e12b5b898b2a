//! Duration tokens accepted by the `remindme` command: an integer followed by
//! `s`, `m` or `hr`, case-insensitive (`10m`, `2HR`, `45s`).

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::errors::{BotError, BotResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DurationUnit {
    Seconds,
    Minutes,
    Hours,
}

impl DurationUnit {
    pub fn suffix(&self) -> &'static str {
        match self {
            DurationUnit::Seconds => "s",
            DurationUnit::Minutes => "m",
            DurationUnit::Hours => "hr",
        }
    }

    pub fn seconds(&self) -> u64 {
        match self {
            DurationUnit::Seconds => 1,
            DurationUnit::Minutes => 60,
            DurationUnit::Hours => 3600,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReminderDuration {
    pub amount: u64,
    pub unit: DurationUnit,
}

impl ReminderDuration {
    pub fn parse(token: &str) -> BotResult<Self> {
        let lowered = token.to_ascii_lowercase();

        // "hr" must be tried before the single-letter suffixes
        let (digits, unit) = if let Some(digits) = lowered.strip_suffix("hr") {
            (digits, DurationUnit::Hours)
        } else if let Some(digits) = lowered.strip_suffix('m') {
            (digits, DurationUnit::Minutes)
        } else if let Some(digits) = lowered.strip_suffix('s') {
            (digits, DurationUnit::Seconds)
        } else {
            return Err(invalid(token));
        };

        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid(token));
        }

        let amount: u64 = digits.parse().map_err(|_| invalid(token))?;
        amount
            .checked_mul(unit.seconds())
            .ok_or_else(|| invalid(token))?;

        Ok(Self { amount, unit })
    }

    pub fn total_seconds(&self) -> u64 {
        self.amount * self.unit.seconds()
    }

    pub fn as_duration(&self) -> Duration {
        Duration::from_secs(self.total_seconds())
    }
}

impl FromStr for ReminderDuration {
    type Err = BotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ReminderDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.amount, self.unit.suffix())
    }
}

fn invalid(token: &str) -> BotError {
    BotError::InvalidInput(format!("'{}' is not a duration like 10m", token))
}
