//! Command table and invocation data between serenity and the core.

use serenity::all::{
    CommandInteraction, CommandOptionType, CreateCommand, CreateCommandOption, ResolvedOption,
    ResolvedValue,
};
use warden_bot::commands::{CommandSpec, OptionKind, OptionSpec};
use warden_bot::CommandData;
use warden_types::UserId;

fn create_option(spec: &OptionSpec) -> CreateCommandOption {
    let kind = match spec.kind {
        OptionKind::User => CommandOptionType::User,
        OptionKind::String => CommandOptionType::String,
        OptionKind::SubCommand => CommandOptionType::SubCommand,
    };
    let mut option = CreateCommandOption::new(kind, spec.name, spec.description);
    if spec.kind != OptionKind::SubCommand {
        option = option.required(spec.required);
    }
    for (display, value) in &spec.choices {
        option = option.add_string_choice(*display, *value);
    }
    for sub in &spec.options {
        option = option.add_sub_option(create_option(sub));
    }
    option
}

/// Registration payload for the whole command table.
pub fn create_commands(specs: &[CommandSpec]) -> Vec<CreateCommand> {
    specs
        .iter()
        .map(|spec| {
            spec.options.iter().fold(
                CreateCommand::new(spec.name)
                    .description(spec.description)
                    .dm_permission(spec.dm_permission),
                |command, option| command.add_option(create_option(option)),
            )
        })
        .collect()
}

fn collect_options(data: CommandData, options: &[ResolvedOption<'_>]) -> CommandData {
    options.iter().fold(data, |data, option| match &option.value {
        ResolvedValue::User(user, _) => data.user(option.name, UserId::from(user.id.get())),
        ResolvedValue::String(value) => data.string(option.name, *value),
        ResolvedValue::SubCommand(sub) => {
            collect_options(data.subcommand(option.name), sub)
        }
        _ => data,
    })
}

/// Flatten a slash-command interaction into the core's raw invocation.
pub fn command_data(command: &CommandInteraction) -> CommandData {
    collect_options(
        CommandData::new(command.data.name.as_str()),
        &command.data.options(),
    )
}
