mod common;

use common::{in_dm, in_guild, responder, Harness, OWNER};
use warden_bot::CommandData;
use warden_explorer::TxRef;
use warden_nullables::{NullExplorer, NullPlatform, Response};
use warden_store::{AccessKey, AccessKeyRegistry, WalletRegistry};
use warden_types::{Timestamp, UserId};

fn issue_key(h: &Harness, key: &str, recipient: &str, wallet: &str, issuer: &str) {
    h.bot
        .store()
        .update(|keys: &mut AccessKeyRegistry| {
            keys.insert(
                key,
                AccessKey {
                    allowed_user_id: UserId::new(recipient),
                    wallet_address: wallet.to_string(),
                    created_by: UserId::new(issuer),
                    created_at: Timestamp::now(),
                    note: None,
                    redeemed_by: None,
                    redeemed_at: None,
                },
            )
        })
        .unwrap();
}

#[tokio::test]
async fn setwallet_then_mywallet_queries_that_address() {
    let explorer = NullExplorer::new().with_wallet(
        "0xabc1",
        2_500_000,
        vec![TxRef {
            tx_hash: Some("aa".into()),
            tx_input_n: Some(-1),
            value: 1_000,
            confirmed: Some("2024-01-02T03:04:05Z".into()),
        }],
    );
    let h = Harness::with(NullPlatform::new(), explorer);
    let inv = in_dm("10");

    let r = responder();
    let data = CommandData::new("setwallet").string("address", "  0xabc1 ");
    h.bot.handle_command(&h.platform, &r, &inv, &data).await.unwrap();
    assert!(r.last_text().contains("Wallet saved"));
    assert!(!r.last_reply().unwrap().1, "DM replies are never ephemeral");

    let r = responder();
    h.bot
        .handle_command(&h.platform, &r, &inv, &CommandData::new("mywallet"))
        .await
        .unwrap();

    assert_eq!(h.explorer.queried(), ["0xabc1"]);
    assert_eq!(r.deferred(), Some(false));
    let text = r.last_text();
    assert!(text.contains("Your registered wallet"));
    assert!(text.contains("Address: `0xabc1`"));
    assert!(text.contains("2,500,000 units"));
    assert!(text.contains("⬇️ Inbound • 1,000 units • 2024-01-02 03:04:05 UTC"));
}

#[tokio::test]
async fn short_addresses_are_rejected() {
    let h = Harness::new();
    let r = responder();
    let data = CommandData::new("setwallet").string("address", " 0xa ");
    h.bot
        .handle_command(&h.platform, &r, &in_guild("10", false), &data)
        .await
        .unwrap();

    assert!(r.last_text().contains("Invalid address"));
    assert!(r.last_reply().unwrap().1);
    let wallets: WalletRegistry = h.bot.store().load().unwrap();
    assert!(wallets.is_empty());
}

#[tokio::test]
async fn mywallet_without_registration_hints_setwallet() {
    let h = Harness::new();
    let r = responder();
    h.bot
        .handle_command(&h.platform, &r, &in_dm("10"), &CommandData::new("mywallet"))
        .await
        .unwrap();

    assert!(r.last_text().contains("/setwallet"));
    assert!(h.explorer.queried().is_empty());
    assert_eq!(r.deferred(), None);
}

#[tokio::test]
async fn explorer_failure_renders_generic_error() {
    let h = Harness::new();
    h.explorer.fail_with_status(503);
    let inv = in_guild("10", false);
    let data = CommandData::new("setwallet").string("address", "0xabc1");
    h.bot.handle_command(&h.platform, &responder(), &inv, &data).await.unwrap();

    let r = responder();
    h.bot
        .handle_command(&h.platform, &r, &inv, &CommandData::new("mywallet"))
        .await
        .unwrap();

    assert_eq!(r.deferred(), Some(true));
    assert!(r.last_text().contains("Lookup failed"));
}

#[tokio::test]
async fn key_redeems_for_recipient_only() {
    let h = Harness::new();
    issue_key(&h, "00112233445566778899", "20", "0xfeed", OWNER);
    let data = CommandData::new("wallet").string("key", " 00112233445566778899 ");

    let r = responder();
    h.bot.handle_command(&h.platform, &r, &in_dm("21"), &data).await.unwrap();
    assert!(r.last_text().contains("Not authorized"));
    assert!(h.explorer.queried().is_empty());

    let r = responder();
    h.bot.handle_command(&h.platform, &r, &in_dm("20"), &data).await.unwrap();
    let text = r.last_text();
    assert!(text.contains("Authorized wallet"));
    assert!(text.contains("Address: `0xfeed`"));
    assert!(text.contains("Key issued by the owner"));
    assert_eq!(h.explorer.queried(), ["0xfeed"]);
}

#[tokio::test]
async fn redemption_is_recorded_once_and_key_stays_valid() {
    let h = Harness::new();
    issue_key(&h, "abcdefabcdefabcdefab", "20", "0xfeed", "99");
    let data = CommandData::new("wallet").string("key", "abcdefabcdefabcdefab");

    h.bot.handle_command(&h.platform, &responder(), &in_dm("20"), &data).await.unwrap();
    let keys: AccessKeyRegistry = h.reopen_store().load().unwrap();
    let first = keys.get("abcdefabcdefabcdefab").unwrap().clone();
    assert_eq!(first.redeemed_by, Some(UserId::new("20")));
    assert!(first.redeemed_at.is_some());

    let r = responder();
    h.bot.handle_command(&h.platform, &r, &in_dm("20"), &data).await.unwrap();
    assert!(r.last_text().contains("Key issued by ID 99"));
    let keys: AccessKeyRegistry = h.reopen_store().load().unwrap();
    assert_eq!(
        keys.get("abcdefabcdefabcdefab").unwrap().redeemed_at,
        first.redeemed_at
    );
}

#[tokio::test]
async fn unknown_key_is_invalid() {
    let h = Harness::new();
    let r = responder();
    let data = CommandData::new("wallet").string("key", "nope");
    h.bot.handle_command(&h.platform, &r, &in_dm("20"), &data).await.unwrap();

    assert!(r.last_text().contains("Invalid key"));
    assert!(!r.responses().iter().any(|resp| matches!(resp, Response::Deferred { .. })));
}

#[tokio::test]
async fn failed_lookup_records_nothing() {
    let h = Harness::new();
    issue_key(&h, "k1k1k1k1k1k1k1k1k1k1", "20", "0xfeed", OWNER);
    h.explorer.fail_with_status(500);
    let r = responder();
    let data = CommandData::new("wallet").string("key", "k1k1k1k1k1k1k1k1k1k1");
    h.bot.handle_command(&h.platform, &r, &in_dm("20"), &data).await.unwrap();

    assert!(r.last_text().contains("Lookup failed"));
    let keys: AccessKeyRegistry = h.bot.store().load().unwrap();
    assert!(!keys.get("k1k1k1k1k1k1k1k1k1k1").unwrap().is_redeemed());
}
