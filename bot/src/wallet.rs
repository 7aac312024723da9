//! Wallet registration and explorer-backed lookups.

use tracing::{error, info};
use warden_explorer::{Direction, TxRef, WalletSnapshot};
use warden_platform::{color, Embed, Message, Responder};
use warden_store::{AccessKey, AccessKeyRegistry, WalletRegistry};
use warden_types::Timestamp;
use warden_utils::format_amount;

use crate::{Bot, BotError, Invocation};

/// Shortest address accepted by `/setwallet`, after trimming.
pub const MIN_ADDRESS_LEN: usize = 4;

fn activity_line(tx: &TxRef) -> String {
    let (arrow, label) = match tx.direction() {
        Direction::Inbound => ("⬇️", "Inbound"),
        Direction::Outbound => ("⬆️", "Outbound"),
    };
    let when = tx
        .confirmed_at()
        .map(|ts| ts.to_string())
        .unwrap_or_else(|| "Unconfirmed".to_string());
    format!("{arrow} {label} • {} units • {when}", format_amount(tx.value))
}

/// Render a snapshot as the embed shown by `/mywallet` and `/wallet`.
pub fn render_snapshot(title: &str, snapshot: &WalletSnapshot) -> Embed {
    let recent = snapshot.recent();
    let activity = if recent.is_empty() {
        "No recent activity for this wallet.".to_string()
    } else {
        recent.iter().map(activity_line).collect::<Vec<_>>().join("\n")
    };
    Embed::new(color::GREEN)
        .title(title)
        .description(format!("Address: `{}`", snapshot.address))
        .field(
            "Confirmed balance",
            format!("{} units", format_amount(snapshot.final_balance)),
            true,
        )
        .field("Recent activity", activity, false)
}

fn lookup_failed() -> Message {
    Message::embed(
        Embed::new(color::RED)
            .title("💥 Lookup failed")
            .description("The wallet could not be queried right now. Try again later."),
    )
}

impl Bot {
    pub fn registered_wallet(&self, user: &warden_types::UserId) -> Result<Option<String>, BotError> {
        let wallets: WalletRegistry = self.store.load()?;
        Ok(wallets.get(user).map(str::to_string))
    }

    /// `/setwallet address`
    pub async fn set_wallet(
        &self,
        responder: &dyn Responder,
        inv: &Invocation,
        address: &str,
    ) -> Result<(), BotError> {
        let address = address.trim();
        if address.chars().count() < MIN_ADDRESS_LEN {
            let embed = Embed::new(color::RED)
                .title("❌ Invalid address")
                .description(format!(
                    "A wallet address needs at least {MIN_ADDRESS_LEN} characters."
                ));
            responder.reply(Message::embed(embed), inv.private()).await?;
            return Ok(());
        }

        let user = inv.user.clone();
        self.store
            .update(|wallets: &mut WalletRegistry| wallets.set(user, address))?;
        info!(user = %inv.user, "wallet registered");

        let embed = Embed::new(color::GREEN)
            .title("💾 Wallet saved")
            .description(format!("Your wallet is now `{address}`."));
        responder.reply(Message::embed(embed), inv.private()).await?;
        Ok(())
    }

    /// `/mywallet`
    pub async fn my_wallet(
        &self,
        responder: &dyn Responder,
        inv: &Invocation,
    ) -> Result<(), BotError> {
        let Some(address) = self.registered_wallet(&inv.user)? else {
            let embed = Embed::new(color::ORANGE)
                .title("🪪 No wallet registered")
                .description("Register one first with `/setwallet`.");
            responder.reply(Message::embed(embed), inv.private()).await?;
            return Ok(());
        };

        responder.defer(inv.private()).await?;
        match self.explorer.fetch_snapshot(&address).await {
            Ok(snapshot) => {
                let embed = render_snapshot("💰 Your registered wallet", &snapshot);
                responder.reply(Message::embed(embed), inv.private()).await?;
            }
            Err(e) => {
                error!(%address, error = %e, "wallet lookup failed");
                responder.reply(lookup_failed(), inv.private()).await?;
            }
        }
        Ok(())
    }

    /// `/wallet key`
    pub async fn wallet_by_key(
        &self,
        responder: &dyn Responder,
        inv: &Invocation,
        key: &str,
    ) -> Result<(), BotError> {
        let key = key.trim();
        let keys: AccessKeyRegistry = self.store.load()?;
        let Some(record) = keys.get(key).cloned() else {
            let embed = Embed::new(color::RED)
                .title("🔑 Invalid key")
                .description("That access key does not exist.");
            responder.reply(Message::embed(embed), inv.private()).await?;
            return Ok(());
        };
        if !record.is_allowed(&inv.user) {
            let embed = Embed::new(color::RED)
                .title("🚷 Not authorized")
                .description("This key was issued to someone else.");
            responder.reply(Message::embed(embed), inv.private()).await?;
            return Ok(());
        }

        responder.defer(inv.private()).await?;
        let snapshot = match self.explorer.fetch_snapshot(&record.wallet_address).await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                error!(address = %record.wallet_address, error = %e, "wallet lookup failed");
                responder.reply(lookup_failed(), inv.private()).await?;
                return Ok(());
            }
        };

        let user = inv.user.clone();
        let first = self.store.update(|keys: &mut AccessKeyRegistry| {
            keys.record_redemption(key, &user, Timestamp::now())
        })?;
        if first {
            info!(user = %inv.user, "access key redeemed");
        }

        let embed = render_snapshot("💰 Authorized wallet", &snapshot)
            .footer(self.issuer_footer(&record));
        responder.reply(Message::embed(embed), inv.private()).await?;
        Ok(())
    }

    fn issuer_footer(&self, record: &AccessKey) -> String {
        if record.created_by == self.config.owner_id {
            "Key issued by the owner".to_string()
        } else {
            format!("Key issued by ID {}", record.created_by)
        }
    }
}
