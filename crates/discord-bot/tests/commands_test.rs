use std::collections::HashSet;

use codebrew_discord_bot::commands::{self, lookup, Command, OptionKind, COMMANDS};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serenity::builder::CreateApplicationCommands;
use serenity::model::Permissions;

#[test]
fn test_register_commands() {
    let mut builder = CreateApplicationCommands::default();
    commands::register_commands(&mut builder);

    assert_eq!(builder.0.len(), COMMANDS.len());
    let names: Vec<_> = builder.0.iter().filter_map(|c| c["name"].as_str()).collect();
    assert!(names.contains(&"remindme"));
}

#[test]
fn test_command_names_are_unique() {
    let names: HashSet<_> = COMMANDS.iter().map(|spec| spec.name).collect();
    assert_eq!(names.len(), COMMANDS.len());
}

#[test]
fn test_every_command_has_a_spec() {
    for spec in COMMANDS {
        assert_eq!(spec.command.spec().name, spec.name);
    }
}

#[test]
fn test_stat_commands_are_all_registered() {
    for name in ["profile", "matrix", "guildstats"] {
        assert!(lookup(name).is_some(), "{} missing", name);
    }
}

#[rstest]
#[case("warn", Permissions::MANAGE_MESSAGES)]
#[case("kick", Permissions::KICK_MEMBERS)]
#[case("ban", Permissions::BAN_MEMBERS)]
#[case("timeout", Permissions::MODERATE_MEMBERS)]
#[case("print", Permissions::ADMINISTRATOR)]
fn test_moderation_permissions(#[case] name: &str, #[case] permission: Permissions) {
    assert_eq!(lookup(name).unwrap().permission, Some(permission));
}

#[test]
fn test_free_text_options_come_last() {
    for spec in COMMANDS {
        let kinds: Vec<_> = spec.options.iter().map(|o| o.kind).collect();
        if let Some(pos) = kinds.iter().position(|k| *k == OptionKind::String) {
            assert!(
                kinds[pos..].iter().all(|k| *k == OptionKind::String),
                "{} has typed options after free text",
                spec.name
            );
        }
    }
}

#[test]
fn test_lookup_is_exact() {
    assert_eq!(lookup("link").map(|s| s.command), Some(Command::Link));
    assert!(lookup("LINK").is_none());
    assert!(lookup("lin").is_none());
}

#[test]
fn test_usage_with_prefix() {
    assert_eq!(Command::Link.spec().usage_with("!"), "!link <ign>");
    assert_eq!(Command::Quote.spec().usage_with("?"), "?quote");
}
