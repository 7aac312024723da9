//! Gateway events to core calls.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use serenity::all::{
    ActionRowComponent, Command as SlashCommand, CommandInteraction, ComponentInteraction,
    Context, EventHandler, Guild, GuildId as SGuildId, Interaction, Member, Message as SMessage,
    ModalInteraction, Ready, User,
};
use tracing::{error, info, warn};
use warden_bot::{commands, Bot, BotError, InboundMessage, Invocation, KEYWORD_INPUT_ID};
use warden_platform::{GuildInfo, MemberInfo};
use warden_types::{GuildId, UserId};

use crate::options::{command_data, create_commands};
use crate::{InteractionResponder, SerenityPlatform};

fn log_failure(event: &str, result: Result<(), BotError>) {
    if let Err(e) = result {
        error!(event, error = %e, "handler failed");
    }
}

fn guild_info(ctx: &Context, id: SGuildId) -> GuildInfo {
    GuildInfo {
        id: GuildId::from(id.get()),
        name: id.name(&ctx.cache).unwrap_or_else(|| id.to_string()),
    }
}

fn member_info(user: &User) -> MemberInfo {
    MemberInfo {
        id: UserId::from(user.id.get()),
        tag: user.tag(),
        bot: user.bot,
    }
}

/// Global display name when set, account name otherwise.
fn invoker_name(user: &User) -> String {
    user.display_name().to_string()
}

/// Set once by the first `ready`; later sessions are resumes or re-identifies.
#[derive(Debug, Default)]
struct StartupLatch(AtomicBool);

impl StartupLatch {
    /// `true` only for the first caller.
    fn claim(&self) -> bool {
        !self.0.swap(true, Ordering::SeqCst)
    }
}

fn keyword_value(modal: &ModalInteraction) -> String {
    modal
        .data
        .components
        .iter()
        .flat_map(|row| row.components.iter())
        .find_map(|component| match component {
            ActionRowComponent::InputText(input) if input.custom_id == KEYWORD_INPUT_ID => {
                input.value.clone()
            }
            _ => None,
        })
        .unwrap_or_default()
}

/// Serenity event handler wrapping the bot.
pub struct Handler {
    bot: Arc<Bot>,
    started: StartupLatch,
}

impl Handler {
    pub fn new(bot: Arc<Bot>) -> Self {
        Self {
            bot,
            started: StartupLatch::default(),
        }
    }

    async fn on_command(&self, ctx: Context, command: CommandInteraction) {
        let platform = SerenityPlatform::new(ctx.clone());
        let responder =
            InteractionResponder::new(ctx.http.clone(), command.id, command.token.clone());
        let inv = Invocation {
            user: UserId::from(command.user.id.get()),
            user_name: invoker_name(&command.user),
            guild: command.guild_id.map(|g| GuildId::from(g.get())),
            can_ban: command
                .member
                .as_ref()
                .and_then(|member| member.permissions)
                .is_some_and(|permissions| permissions.ban_members()),
        };
        let data = command_data(&command);
        log_failure(
            "command",
            self.bot
                .handle_command(&platform, &responder, &inv, &data)
                .await,
        );
    }

    async fn on_component(&self, ctx: Context, component: ComponentInteraction) {
        let platform = SerenityPlatform::new(ctx.clone());
        let responder =
            InteractionResponder::new(ctx.http.clone(), component.id, component.token.clone());
        let user = UserId::from(component.user.id.get());
        log_failure(
            "component",
            self.bot
                .handle_component(&platform, &responder, &user, &component.data.custom_id)
                .await,
        );
    }

    async fn on_modal(&self, ctx: Context, modal: ModalInteraction) {
        let platform = SerenityPlatform::new(ctx.clone());
        let responder = InteractionResponder::new(ctx.http.clone(), modal.id, modal.token.clone());
        let user = UserId::from(modal.user.id.get());
        let value = keyword_value(&modal);
        log_failure(
            "form",
            self.bot
                .handle_form(&platform, &responder, &user, &modal.data.custom_id, &value)
                .await,
        );
    }
}

#[async_trait]
impl EventHandler for Handler {
    async fn ready(&self, ctx: Context, ready: Ready) {
        info!(user = %ready.user.name, guilds = ready.guilds.len(), "connected");
        if !self.started.claim() {
            info!("new gateway session; startup work already done");
            return;
        }

        let commands = create_commands(&commands::definitions());
        match SlashCommand::set_global_commands(&ctx.http, commands).await {
            Ok(registered) => info!(count = registered.len(), "commands registered"),
            Err(e) => error!(error = %e, "command registration failed"),
        }

        let platform = SerenityPlatform::new(ctx);
        log_failure("ready", self.bot.on_ready(&platform).await);
    }

    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        match interaction {
            Interaction::Command(command) => self.on_command(ctx, command).await,
            Interaction::Component(component) => self.on_component(ctx, component).await,
            Interaction::Modal(modal) => self.on_modal(ctx, modal).await,
            _ => {}
        }
    }

    async fn guild_member_addition(&self, ctx: Context, new_member: Member) {
        let guild = guild_info(&ctx, new_member.guild_id);
        let member = member_info(&new_member.user);
        let platform = SerenityPlatform::new(ctx);
        log_failure(
            "member join",
            self.bot.on_member_join(&platform, &guild, &member).await,
        );
    }

    async fn guild_create(&self, ctx: Context, guild: Guild, is_new: Option<bool>) {
        // Also fired for every guild on startup; only fresh joins matter here.
        if is_new != Some(true) {
            return;
        }
        let info = GuildInfo {
            id: GuildId::from(guild.id.get()),
            name: guild.name.clone(),
        };
        info!(guild = %info.id, name = %info.name, "added to a server");
        let platform = SerenityPlatform::new(ctx);
        log_failure("guild join", self.bot.on_guild_join(&platform, &info).await);
    }

    async fn message(&self, ctx: Context, message: SMessage) {
        let Some(guild_id) = message.guild_id else {
            return;
        };
        if message.author.bot {
            return;
        }
        let inbound = InboundMessage {
            author: member_info(&message.author),
            guild: Some(guild_info(&ctx, guild_id)),
            link: message.link(),
        };
        let platform = SerenityPlatform::new(ctx);
        if let Err(e) = self.bot.on_message(&platform, &inbound).await {
            warn!(error = %e, "message observer failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn startup_latch_claims_once() {
        let latch = StartupLatch::default();
        assert!(latch.claim());
        assert!(!latch.claim());
        assert!(!latch.claim());
    }

    #[test]
    fn invoker_name_prefers_display_name() {
        let mut user = User::default();
        user.name = "alice_01".into();
        assert_eq!(invoker_name(&user), "alice_01");

        user.global_name = Some("Alice".into());
        assert_eq!(invoker_name(&user), "Alice");
    }
}
