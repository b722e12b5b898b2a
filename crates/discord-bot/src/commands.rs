use serenity::{
    builder::{CreateApplicationCommand, CreateApplicationCommands},
    model::{application::command::CommandOptionType, Permissions},
};

/// Every command the bot understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    Link,
    Profile,
    Matrix,
    GuildStats,
    Todo,
    Tasks,
    Done,
    RemindMe,
    Reminders,
    Forget,
    Pomodoro,
    Warn,
    Kick,
    Ban,
    Timeout,
    Print,
    Quote,
    Brew,
    Tea,
    Cat,
    CatFacts,
    Facts,
    Calendar,
    Time,
    Alias,
    SetApply,
    Help,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKind {
    String,
    Integer,
    User,
    Channel,
}

impl From<OptionKind> for CommandOptionType {
    fn from(kind: OptionKind) -> Self {
        match kind {
            OptionKind::String => CommandOptionType::String,
            OptionKind::Integer => CommandOptionType::Integer,
            OptionKind::User => CommandOptionType::User,
            OptionKind::Channel => CommandOptionType::Channel,
        }
    }
}

/// One positional argument. Options are rendered in declaration order when a
/// slash command is turned into an argument string, so free text goes last.
#[derive(Debug, Clone, Copy)]
pub struct OptionSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub kind: OptionKind,
    pub required: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct CommandSpec {
    pub command: Command,
    pub name: &'static str,
    pub description: &'static str,
    /// Argument synopsis shown after the command name in help and usage messages
    pub usage: &'static str,
    pub options: &'static [OptionSpec],
    /// Permission the caller must hold
    pub permission: Option<Permissions>,
}

const fn opt(
    name: &'static str,
    description: &'static str,
    kind: OptionKind,
    required: bool,
) -> OptionSpec {
    OptionSpec {
        name,
        description,
        kind,
        required,
    }
}

pub static COMMANDS: &[CommandSpec] = &[
    CommandSpec {
        command: Command::Link,
        name: "link",
        description: "Link your Minecraft IGN to your Discord account",
        usage: "<ign>",
        options: &[opt("ign", "Your in-game name", OptionKind::String, true)],
        permission: None,
    },
    CommandSpec {
        command: Command::Profile,
        name: "profile",
        description: "Show Hypixel stats for your linked account",
        usage: "[gamemode]",
        options: &[opt("gamemode", "Game mode (currently unused)", OptionKind::String, false)],
        permission: None,
    },
    CommandSpec {
        command: Command::Matrix,
        name: "matrix",
        description: "Show a player's level, Bedwars stars and duel wins",
        usage: "<ign>",
        options: &[opt("ign", "Player name", OptionKind::String, true)],
        permission: None,
    },
    CommandSpec {
        command: Command::GuildStats,
        name: "guildstats",
        description: "Show the guild a player belongs to",
        usage: "<ign>",
        options: &[opt("ign", "Player name", OptionKind::String, true)],
        permission: None,
    },
    CommandSpec {
        command: Command::Todo,
        name: "todo",
        description: "Add a task to someone's to-do list",
        usage: "<@user> add <task>",
        options: &[
            opt("user", "Whose list", OptionKind::User, true),
            opt("action", "What to do (add)", OptionKind::String, true),
            opt("task", "The task", OptionKind::String, true),
        ],
        permission: None,
    },
    CommandSpec {
        command: Command::Tasks,
        name: "tasks",
        description: "Show someone's to-do list",
        usage: "<@user>",
        options: &[opt("user", "Whose list", OptionKind::User, true)],
        permission: None,
    },
    CommandSpec {
        command: Command::Done,
        name: "done",
        description: "Remove a task by its number",
        usage: "<@user> <number>",
        options: &[
            opt("user", "Whose list", OptionKind::User, true),
            opt("number", "Task number from the list", OptionKind::Integer, true),
        ],
        permission: None,
    },
    CommandSpec {
        command: Command::RemindMe,
        name: "remindme",
        description: "DM yourself a reminder later (10s, 5m, 2hr)",
        usage: "<time> <reminder>",
        options: &[
            opt("time", "Delay such as 10m or 2hr", OptionKind::String, true),
            opt("reminder", "What to remind you about", OptionKind::String, true),
        ],
        permission: None,
    },
    CommandSpec {
        command: Command::Reminders,
        name: "reminders",
        description: "List your pending reminders",
        usage: "",
        options: &[],
        permission: None,
    },
    CommandSpec {
        command: Command::Forget,
        name: "forget",
        description: "Cancel one of your pending reminders",
        usage: "<id>",
        options: &[opt("id", "Reminder number", OptionKind::Integer, true)],
        permission: None,
    },
    CommandSpec {
        command: Command::Pomodoro,
        name: "pomodoro",
        description: "Run a work/break timer in this channel",
        usage: "<work minutes> <break minutes>",
        options: &[
            opt("work", "Minutes of work", OptionKind::Integer, true),
            opt("rest", "Minutes of break", OptionKind::Integer, true),
        ],
        permission: None,
    },
    CommandSpec {
        command: Command::Warn,
        name: "warn",
        description: "Warn a user by DM",
        usage: "<@user> <reason>",
        options: &[
            opt("user", "User to warn", OptionKind::User, true),
            opt("reason", "Reason for the warning", OptionKind::String, true),
        ],
        permission: Some(Permissions::MANAGE_MESSAGES),
    },
    CommandSpec {
        command: Command::Kick,
        name: "kick",
        description: "Kick a member",
        usage: "<@user> <reason>",
        options: &[
            opt("user", "Member to kick", OptionKind::User, true),
            opt("reason", "Reason for the kick", OptionKind::String, true),
        ],
        permission: Some(Permissions::KICK_MEMBERS),
    },
    CommandSpec {
        command: Command::Ban,
        name: "ban",
        description: "Ban a member",
        usage: "<@user> <reason>",
        options: &[
            opt("user", "Member to ban", OptionKind::User, true),
            opt("reason", "Reason for the ban", OptionKind::String, true),
        ],
        permission: Some(Permissions::BAN_MEMBERS),
    },
    CommandSpec {
        command: Command::Timeout,
        name: "timeout",
        description: "Time out a member for some minutes",
        usage: "<@user> <minutes>",
        options: &[
            opt("user", "Member to time out", OptionKind::User, true),
            opt("minutes", "Length of the timeout", OptionKind::Integer, true),
        ],
        permission: Some(Permissions::MODERATE_MEMBERS),
    },
    CommandSpec {
        command: Command::Print,
        name: "print",
        description: "Post a message as an embed in a channel",
        usage: "<#channel> <message>",
        options: &[
            opt("channel", "Where to post", OptionKind::Channel, true),
            opt("message", "What to post", OptionKind::String, true),
        ],
        permission: Some(Permissions::ADMINISTRATOR),
    },
    CommandSpec {
        command: Command::Quote,
        name: "quote",
        description: "Get a random quote",
        usage: "",
        options: &[],
        permission: None,
    },
    CommandSpec {
        command: Command::Brew,
        name: "brew",
        description: "Brew a coffee",
        usage: "",
        options: &[],
        permission: None,
    },
    CommandSpec {
        command: Command::Tea,
        name: "tea",
        description: "Pour a cup of tea",
        usage: "",
        options: &[],
        permission: None,
    },
    CommandSpec {
        command: Command::Cat,
        name: "cat",
        description: "Get a random cat picture",
        usage: "",
        options: &[],
        permission: None,
    },
    CommandSpec {
        command: Command::CatFacts,
        name: "catfacts",
        description: "Learn a cat fact",
        usage: "",
        options: &[],
        permission: None,
    },
    CommandSpec {
        command: Command::Facts,
        name: "facts",
        description: "Learn a programming fact",
        usage: "",
        options: &[],
        permission: None,
    },
    CommandSpec {
        command: Command::Calendar,
        name: "calendar",
        description: "Show this month's calendar",
        usage: "",
        options: &[],
        permission: None,
    },
    CommandSpec {
        command: Command::Time,
        name: "time",
        description: "Show the current time in a timezone",
        usage: "<timezone>",
        options: &[opt("timezone", "Timezone such as America/New_York", OptionKind::String, true)],
        permission: None,
    },
    CommandSpec {
        command: Command::Alias,
        name: "alias",
        description: "Change your nickname",
        usage: "<name>",
        options: &[opt("name", "New nickname", OptionKind::String, true)],
        permission: None,
    },
    CommandSpec {
        command: Command::SetApply,
        name: "setapply",
        description: "Post the application button",
        usage: "",
        options: &[],
        permission: None,
    },
    CommandSpec {
        command: Command::Help,
        name: "help",
        description: "List the available commands",
        usage: "",
        options: &[],
        permission: None,
    },
];

/// Look up a command by its exact name.
pub fn lookup(name: &str) -> Option<&'static CommandSpec> {
    COMMANDS.iter().find(|spec| spec.name == name)
}

impl Command {
    pub fn spec(&self) -> &'static CommandSpec {
        COMMANDS
            .iter()
            .find(|spec| spec.command == *self)
            .unwrap_or_else(|| unreachable!("every command has a registry entry"))
    }
}

impl CommandSpec {
    /// Full usage line with the configured prefix, e.g. `!link <ign>`
    pub fn usage_with(&self, prefix: &str) -> String {
        if self.usage.is_empty() {
            format!("{}{}", prefix, self.name)
        } else {
            format!("{}{} {}", prefix, self.name, self.usage)
        }
    }
}

/// Register all commands for the bot.
///
/// Every registry entry becomes a slash command with the same options, in the
/// same order, so slash invocations can be dispatched like text commands.
pub fn register_commands(commands: &mut CreateApplicationCommands) -> &mut CreateApplicationCommands {
    for spec in COMMANDS {
        commands.create_application_command(|command| build_command(command, spec));
    }

    commands
}

/// Build the slash command for one registry entry
pub fn build_command<'a>(
    command: &'a mut CreateApplicationCommand,
    spec: &CommandSpec,
) -> &'a mut CreateApplicationCommand {
    command.name(spec.name).description(spec.description);

    for option in spec.options {
        command.create_option(|o| {
            o.name(option.name)
                .description(option.description)
                .kind(option.kind.into())
                .required(option.required)
        });
    }

    if let Some(permission) = spec.permission {
        command.default_member_permissions(permission).dm_permission(false);
    }

    command
}
