mod common;

use common::{in_guild, responder, Harness, GUILD, GUILD_NAME, OWNER};
use warden_bot::{CommandData, InboundMessage};
use warden_nullables::{NullExplorer, NullPlatform};
use warden_platform::{GuildInfo, MemberInfo};
use warden_store::{Blacklist, BlacklistKind};
use warden_types::{GuildId, UserId};

fn add(kind: &str, id: &str) -> CommandData {
    CommandData::new("blacklist")
        .subcommand("add")
        .string("type", kind)
        .string("id", id)
}

fn remove(kind: &str, id: &str) -> CommandData {
    CommandData::new("blacklist")
        .subcommand("remove")
        .string("type", kind)
        .string("id", id)
}

fn list() -> CommandData {
    CommandData::new("blacklist").subcommand("list")
}

#[tokio::test]
async fn adding_twice_reports_already_present() {
    let h = Harness::new();
    let owner = in_guild(OWNER, false);

    let r = responder();
    h.bot.handle_command(&h.platform, &r, &owner, &add("member", "42")).await.unwrap();
    assert_eq!(r.last_text(), "ID 42 added to the blacklist.");
    assert!(r.last_reply().unwrap().1, "owner replies are private in a server");

    let r = responder();
    h.bot.handle_command(&h.platform, &r, &owner, &add("member", "42")).await.unwrap();
    assert_eq!(r.last_text(), "Already on the blacklist.");

    let blacklist: Blacklist = h.reopen_store().load().unwrap();
    assert_eq!(blacklist.entries(BlacklistKind::Member), ["42".to_string()]);
}

#[tokio::test]
async fn add_notifies_owner_with_default_reason() {
    let h = Harness::new();
    let r = responder();
    h.bot
        .handle_command(&h.platform, &r, &in_guild(OWNER, false), &add("community", "900"))
        .await
        .unwrap();

    let dms = h.platform.dm_texts(OWNER);
    assert_eq!(
        dms,
        ["🔒 Added community 900 to the blacklist. Reason: no reason given"]
    );
}

#[tokio::test]
async fn adding_a_present_member_reports_each_community() {
    let platform = NullPlatform::new()
        .with_guild(GUILD, GUILD_NAME)
        .with_guild("600", "Other Server")
        .with_member(GUILD, "42", "spammer#1")
        .with_member("600", "42", "spammer#1");
    let h = Harness::with(platform, NullExplorer::new());
    let r = responder();
    let data = add("member", "42").string("reason", "scams");

    h.bot
        .handle_command(&h.platform, &r, &in_guild(OWNER, false), &data)
        .await
        .unwrap();

    let dms = h.platform.dm_texts(OWNER);
    assert_eq!(dms[0], "🔒 Added member 42 to the blacklist. Reason: scams");
    assert!(dms.contains(&"⚠️ spammer#1 is already in Test Server.".to_string()));
    assert!(dms.contains(&"⚠️ spammer#1 is already in Other Server.".to_string()));
}

#[tokio::test]
async fn adding_a_joined_community_notifies_immediately() {
    let h = Harness::new();
    let r = responder();
    h.bot
        .handle_command(&h.platform, &r, &in_guild(OWNER, false), &add("community", GUILD))
        .await
        .unwrap();

    let dms = h.platform.dm_texts(OWNER);
    assert!(dms
        .iter()
        .any(|dm| dm == "⚠️ The bot is already in the blacklisted server: Test Server"));
}

#[tokio::test]
async fn remove_reports_absent_and_removes_present() {
    let h = Harness::new();
    let owner = in_guild(OWNER, false);

    let r = responder();
    h.bot.handle_command(&h.platform, &r, &owner, &remove("member", "42")).await.unwrap();
    assert_eq!(r.last_text(), "That ID is not on the blacklist.");

    h.bot.handle_command(&h.platform, &responder(), &owner, &add("member", "42")).await.unwrap();
    let r = responder();
    h.bot.handle_command(&h.platform, &r, &owner, &remove("member", "42")).await.unwrap();
    assert_eq!(r.last_text(), "ID 42 removed from the blacklist.");

    let r = responder();
    h.bot.handle_command(&h.platform, &r, &owner, &list()).await.unwrap();
    let text = r.last_text();
    assert!(!text.contains("- 42"));
}

#[tokio::test]
async fn list_renders_both_sets() {
    let h = Harness::new();
    let owner = in_guild(OWNER, false);
    h.bot.handle_command(&h.platform, &responder(), &owner, &add("member", "42")).await.unwrap();
    h.bot.handle_command(&h.platform, &responder(), &owner, &add("member", "43")).await.unwrap();

    let r = responder();
    h.bot.handle_command(&h.platform, &r, &owner, &list()).await.unwrap();
    let (message, _) = r.last_reply().unwrap();
    let embed = message.embed.unwrap();
    assert_eq!(embed.fields[0].name, "Members");
    assert_eq!(embed.fields[0].value, "- 42\n- 43");
    assert_eq!(embed.fields[1].name, "Communities");
    assert_eq!(embed.fields[1].value, "none");
}

#[tokio::test]
async fn non_owner_is_refused_without_state_change() {
    let h = Harness::new();
    let r = responder();
    h.bot
        .handle_command(&h.platform, &r, &in_guild("10", true), &add("member", "42"))
        .await
        .unwrap();

    assert_eq!(r.last_text(), "Only the authorized owner can use this command.");
    assert!(h.bot.blacklist().unwrap().is_empty());
    assert!(h.platform.dm_texts(OWNER).is_empty());
}

#[tokio::test]
async fn blacklisted_author_is_reported() {
    let h = Harness::new();
    h.bot.blacklist_add(BlacklistKind::Member, "42").unwrap();

    let message = InboundMessage {
        author: MemberInfo {
            id: UserId::new("42"),
            tag: "spammer#1".into(),
            bot: false,
        },
        guild: Some(GuildInfo {
            id: GuildId::new(GUILD),
            name: GUILD_NAME.into(),
        }),
        link: "https://discord.com/channels/500/1/2".into(),
    };
    h.bot.on_message(&h.platform, &message).await.unwrap();

    let dms = h.platform.dm_texts(OWNER);
    assert_eq!(dms.len(), 1);
    assert!(dms[0].contains("spammer#1"));
    assert!(dms[0].contains("42"));
    assert!(dms[0].contains(GUILD_NAME));
    assert!(dms[0].contains("https://discord.com/channels/500/1/2"));

    let direct = InboundMessage {
        guild: None,
        ..message
    };
    h.bot.on_message(&h.platform, &direct).await.unwrap();
    assert_eq!(h.platform.dm_texts(OWNER).len(), 1);
}

#[tokio::test]
async fn joining_a_blacklisted_community_is_reported() {
    let h = Harness::new();
    let guild = GuildInfo {
        id: GuildId::new("900"),
        name: "Bad Place".into(),
    };

    h.bot.on_guild_join(&h.platform, &guild).await.unwrap();
    assert!(h.platform.dm_texts(OWNER).is_empty());

    h.bot.blacklist_add(BlacklistKind::Community, "900").unwrap();
    h.bot.on_guild_join(&h.platform, &guild).await.unwrap();
    let dms = h.platform.dm_texts(OWNER);
    assert_eq!(dms.len(), 1);
    assert!(dms[0].contains("Bad Place"));
}

#[tokio::test]
async fn ready_summary_only_when_non_empty() {
    let h = Harness::new();
    h.bot.on_ready(&h.platform).await.unwrap();
    assert!(h.platform.dm_texts(OWNER).is_empty());

    h.bot.blacklist_add(BlacklistKind::Member, "1").unwrap();
    h.bot.blacklist_add(BlacklistKind::Community, "2").unwrap();
    h.bot.blacklist_add(BlacklistKind::Community, "3").unwrap();
    h.bot.on_ready(&h.platform).await.unwrap();
    assert_eq!(
        h.platform.dm_texts(OWNER),
        ["The bot started with 1 user(s) and 2 server(s) on the blacklist."]
    );
}
