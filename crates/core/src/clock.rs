use chrono::{DateTime, Utc};
use chrono_tz::Tz;

use crate::errors::{BotError, BotResult};

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Look up an IANA time zone such as `America/New_York`.
pub fn parse_zone(name: &str) -> BotResult<Tz> {
    name.parse::<Tz>()
        .map_err(|_| BotError::InvalidInput(format!("unknown time zone '{}'", name)))
}

/// Render `now` as local wall-clock time in the named zone.
pub fn format_in_zone(name: &str, now: DateTime<Utc>) -> BotResult<String> {
    let zone = parse_zone(name)?;
    Ok(now.with_timezone(&zone).format(TIMESTAMP_FORMAT).to_string())
}
