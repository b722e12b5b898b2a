//! Positional argument helpers shared by the command handlers.

use serenity::model::id::{ChannelId, UserId};

/// Split off the first whitespace-separated token; the rest is trimmed.
pub fn split_first(input: &str) -> (Option<&str>, &str) {
    let input = input.trim();
    if input.is_empty() {
        return (None, "");
    }

    match input.split_once(char::is_whitespace) {
        Some((first, rest)) => (Some(first), rest.trim()),
        None => (Some(input), ""),
    }
}

/// Parse a user mention (`<@id>`, `<@!id>`) or a raw user ID.
pub fn parse_user_mention(token: &str) -> Option<UserId> {
    let token = token.trim();

    let id_part = if token.starts_with("<@") && token.ends_with('>') {
        token
            .trim_start_matches("<@")
            .trim_start_matches('!')
            .trim_end_matches('>')
    } else {
        token
    };

    id_part.parse::<u64>().ok().filter(|&id| id != 0).map(UserId)
}

/// Parse a channel mention (`<#id>`) or a raw channel ID.
pub fn parse_channel_mention(token: &str) -> Option<ChannelId> {
    let token = token.trim();

    let id_part = if token.starts_with("<#") && token.ends_with('>') {
        token.trim_start_matches("<#").trim_end_matches('>')
    } else {
        token
    };

    id_part.parse::<u64>().ok().filter(|&id| id != 0).map(ChannelId)
}

/// Split `prefix name rest…` into the command name and its raw arguments.
pub fn parse_prefixed<'a>(prefix: &str, content: &'a str) -> Option<(&'a str, &'a str)> {
    let body = content.strip_prefix(prefix)?;
    // "! link" is not a command
    if body.starts_with(char::is_whitespace) {
        return None;
    }

    match split_first(body) {
        (Some(name), rest) => Some((name, rest)),
        (None, _) => None,
    }
}
