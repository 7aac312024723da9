//! The command table and parsing of raw invocations into typed commands.

use std::collections::BTreeMap;

use warden_store::BlacklistKind;
use warden_types::UserId;

use crate::BotError;

/// Option names shared by the declarations and the parser.
pub mod opt {
    pub const MEMBER: &str = "member";
    pub const REASON: &str = "reason";
    pub const TYPE: &str = "type";
    pub const ID: &str = "id";
    pub const ADDRESS: &str = "address";
    pub const KEY: &str = "key";
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OptionKind {
    User,
    String,
    SubCommand,
}

/// Declaration of one command option (or subcommand).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionSpec {
    pub kind: OptionKind,
    pub name: &'static str,
    pub description: &'static str,
    pub required: bool,
    /// `(display name, value)` pairs for enumerated string options.
    pub choices: Vec<(&'static str, &'static str)>,
    /// Sub-options of a subcommand.
    pub options: Vec<OptionSpec>,
}

impl OptionSpec {
    fn new(kind: OptionKind, name: &'static str, description: &'static str) -> Self {
        Self {
            kind,
            name,
            description,
            required: false,
            choices: Vec::new(),
            options: Vec::new(),
        }
    }

    fn user(name: &'static str, description: &'static str) -> Self {
        Self::new(OptionKind::User, name, description)
    }

    fn string(name: &'static str, description: &'static str) -> Self {
        Self::new(OptionKind::String, name, description)
    }

    fn subcommand(name: &'static str, description: &'static str) -> Self {
        Self::new(OptionKind::SubCommand, name, description)
    }

    fn required(mut self) -> Self {
        self.required = true;
        self
    }

    fn choice(mut self, display: &'static str, value: &'static str) -> Self {
        self.choices.push((display, value));
        self
    }

    fn option(mut self, option: OptionSpec) -> Self {
        self.options.push(option);
        self
    }
}

/// Declaration of one slash command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommandSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub options: Vec<OptionSpec>,
    /// Whether the command may be used in direct messages.
    pub dm_permission: bool,
}

fn blacklist_type() -> OptionSpec {
    OptionSpec::string(opt::TYPE, "Member or community?")
        .required()
        .choice("Member", "member")
        .choice("Community", "community")
}

/// The eight commands registered at startup.
pub fn definitions() -> Vec<CommandSpec> {
    vec![
        CommandSpec {
            name: "ban",
            description: "Ban a member from the server",
            options: vec![
                OptionSpec::user(opt::MEMBER, "Member to ban").required(),
                OptionSpec::string(opt::REASON, "Reason for the ban"),
            ],
            dm_permission: false,
        },
        CommandSpec {
            name: "warn",
            description: "Record a warning for a member",
            options: vec![
                OptionSpec::user(opt::MEMBER, "Member to warn").required(),
                OptionSpec::string(opt::REASON, "Reason for the warning").required(),
            ],
            dm_permission: false,
        },
        CommandSpec {
            name: "warnings",
            description: "Show how many warnings a member has",
            options: vec![OptionSpec::user(opt::MEMBER, "Member to look up").required()],
            dm_permission: false,
        },
        CommandSpec {
            name: "blacklist",
            description: "Manage the blacklist (owner only)",
            options: vec![
                OptionSpec::subcommand("add", "Add a member or community to the blacklist")
                    .option(blacklist_type())
                    .option(OptionSpec::string(opt::ID, "Target id").required())
                    .option(OptionSpec::string(opt::REASON, "Reason")),
                OptionSpec::subcommand("remove", "Remove an entry from the blacklist")
                    .option(blacklist_type())
                    .option(OptionSpec::string(opt::ID, "Target id").required()),
                OptionSpec::subcommand("list", "Show the current blacklist"),
            ],
            dm_permission: false,
        },
        CommandSpec {
            name: "setwallet",
            description: "Save your wallet for quick lookups from any chat",
            options: vec![OptionSpec::string(opt::ADDRESS, "Public address of your wallet").required()],
            dm_permission: true,
        },
        CommandSpec {
            name: "mywallet",
            description: "Look up the wallet you saved",
            options: Vec::new(),
            dm_permission: true,
        },
        CommandSpec {
            name: "wallet",
            description: "Look up a wallet's activity with your authorized key",
            options: vec![OptionSpec::string(opt::KEY, "Key issued by the administrator").required()],
            dm_permission: true,
        },
        CommandSpec {
            name: "daracceso",
            description: "Start the DM wizard that issues a key bound to one user",
            options: Vec::new(),
            dm_permission: true,
        },
    ]
}

/// A resolved option value as delivered by the gateway.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OptionValue {
    User(UserId),
    String(String),
}

/// A raw command invocation: name, optional subcommand, flat option map.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CommandData {
    pub name: String,
    pub subcommand: Option<String>,
    pub options: BTreeMap<String, OptionValue>,
}

impl CommandData {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn subcommand(mut self, name: impl Into<String>) -> Self {
        self.subcommand = Some(name.into());
        self
    }

    pub fn user(mut self, name: impl Into<String>, user: impl Into<UserId>) -> Self {
        self.options
            .insert(name.into(), OptionValue::User(user.into()));
        self
    }

    pub fn string(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.options
            .insert(name.into(), OptionValue::String(value.into()));
        self
    }

    fn get_user(&self, name: &str) -> Option<UserId> {
        match self.options.get(name) {
            Some(OptionValue::User(user)) => Some(user.clone()),
            _ => None,
        }
    }

    fn get_string(&self, name: &str) -> Option<String> {
        match self.options.get(name) {
            Some(OptionValue::String(value)) => Some(value.clone()),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BlacklistAction {
    Add {
        kind: BlacklistKind,
        id: String,
        reason: Option<String>,
    },
    Remove {
        kind: BlacklistKind,
        id: String,
    },
    List,
}

/// A typed command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Ban { member: UserId, reason: Option<String> },
    Warn { member: UserId, reason: String },
    Warnings { member: UserId },
    Blacklist(BlacklistAction),
    SetWallet { address: String },
    MyWallet,
    Wallet { key: String },
    GrantAccess,
}

impl Command {
    pub fn parse(data: &CommandData) -> Result<Self, BotError> {
        let command = match data.name.as_str() {
            "ban" => Self::Ban {
                member: required_user(data, "ban", opt::MEMBER)?,
                reason: data.get_string(opt::REASON),
            },
            "warn" => Self::Warn {
                member: required_user(data, "warn", opt::MEMBER)?,
                reason: required_string(data, "warn", opt::REASON)?,
            },
            "warnings" => Self::Warnings {
                member: required_user(data, "warnings", opt::MEMBER)?,
            },
            "blacklist" => Self::Blacklist(parse_blacklist(data)?),
            "setwallet" => Self::SetWallet {
                address: required_string(data, "setwallet", opt::ADDRESS)?,
            },
            "mywallet" => Self::MyWallet,
            "wallet" => Self::Wallet {
                key: required_string(data, "wallet", opt::KEY)?,
            },
            "daracceso" => Self::GrantAccess,
            other => return Err(BotError::UnknownCommand(other.to_string())),
        };
        Ok(command)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Ban { .. } => "ban",
            Self::Warn { .. } => "warn",
            Self::Warnings { .. } => "warnings",
            Self::Blacklist(_) => "blacklist",
            Self::SetWallet { .. } => "setwallet",
            Self::MyWallet => "mywallet",
            Self::Wallet { .. } => "wallet",
            Self::GrantAccess => "daracceso",
        }
    }

    /// Commands that only make sense inside a community.
    pub fn guild_only(&self) -> bool {
        matches!(
            self,
            Self::Ban { .. } | Self::Warn { .. } | Self::Warnings { .. } | Self::Blacklist(_)
        )
    }
}

fn parse_blacklist(data: &CommandData) -> Result<BlacklistAction, BotError> {
    let sub = data.subcommand.as_deref().ok_or(BotError::MissingOption {
        command: "blacklist",
        option: "subcommand",
    })?;
    match sub {
        "list" => Ok(BlacklistAction::List),
        "add" => Ok(BlacklistAction::Add {
            kind: blacklist_kind(data)?,
            id: required_string(data, "blacklist", opt::ID)?.trim().to_string(),
            reason: data.get_string(opt::REASON),
        }),
        "remove" => Ok(BlacklistAction::Remove {
            kind: blacklist_kind(data)?,
            id: required_string(data, "blacklist", opt::ID)?.trim().to_string(),
        }),
        other => Err(BotError::InvalidOption {
            command: "blacklist",
            option: "subcommand",
            reason: format!("unknown subcommand {other}"),
        }),
    }
}

fn blacklist_kind(data: &CommandData) -> Result<BlacklistKind, BotError> {
    required_string(data, "blacklist", opt::TYPE)?
        .parse::<BlacklistKind>()
        .map_err(|reason| BotError::InvalidOption {
            command: "blacklist",
            option: opt::TYPE,
            reason,
        })
}

fn required_user(
    data: &CommandData,
    command: &'static str,
    option: &'static str,
) -> Result<UserId, BotError> {
    data.get_user(option)
        .ok_or(BotError::MissingOption { command, option })
}

fn required_string(
    data: &CommandData,
    command: &'static str,
    option: &'static str,
) -> Result<String, BotError> {
    data.get_string(option)
        .ok_or(BotError::MissingOption { command, option })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declares_the_eight_commands() {
        let names: Vec<_> = definitions().iter().map(|c| c.name).collect();
        assert_eq!(
            names,
            [
                "ban",
                "warn",
                "warnings",
                "blacklist",
                "setwallet",
                "mywallet",
                "wallet",
                "daracceso"
            ]
        );
    }

    #[test]
    fn moderation_commands_are_guild_only() {
        for spec in definitions() {
            let guild_only = matches!(spec.name, "ban" | "warn" | "warnings" | "blacklist");
            assert_eq!(spec.dm_permission, !guild_only, "{}", spec.name);
        }
    }

    #[test]
    fn blacklist_type_is_enumerated() {
        let blacklist = definitions()
            .into_iter()
            .find(|c| c.name == "blacklist")
            .unwrap();
        let add = &blacklist.options[0];
        assert_eq!(add.kind, OptionKind::SubCommand);
        assert_eq!(
            add.options[0].choices,
            vec![("Member", "member"), ("Community", "community")]
        );
    }

    #[test]
    fn parses_ban_with_optional_reason() {
        let data = CommandData::new("ban").user(opt::MEMBER, "7");
        assert_eq!(
            Command::parse(&data).unwrap(),
            Command::Ban {
                member: UserId::new("7"),
                reason: None
            }
        );
    }

    #[test]
    fn warn_requires_a_reason() {
        let data = CommandData::new("warn").user(opt::MEMBER, "7");
        assert!(matches!(
            Command::parse(&data),
            Err(BotError::MissingOption {
                option: "reason",
                ..
            })
        ));
    }

    #[test]
    fn parses_blacklist_subcommands() {
        let data = CommandData::new("blacklist")
            .subcommand("add")
            .string(opt::TYPE, "community")
            .string(opt::ID, " 55 ");
        assert_eq!(
            Command::parse(&data).unwrap(),
            Command::Blacklist(BlacklistAction::Add {
                kind: BlacklistKind::Community,
                id: "55".into(),
                reason: None,
            })
        );

        let list = CommandData::new("blacklist").subcommand("list");
        assert_eq!(
            Command::parse(&list).unwrap(),
            Command::Blacklist(BlacklistAction::List)
        );

        let bad = CommandData::new("blacklist")
            .subcommand("remove")
            .string(opt::TYPE, "planet")
            .string(opt::ID, "1");
        assert!(matches!(
            Command::parse(&bad),
            Err(BotError::InvalidOption { .. })
        ));
    }

    #[test]
    fn unknown_commands_are_rejected() {
        assert!(matches!(
            Command::parse(&CommandData::new("ping")),
            Err(BotError::UnknownCommand(name)) if name == "ping"
        ));
    }
}
