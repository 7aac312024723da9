//! `/daracceso`: the operator-only wizard that mints an access key over DM.

use rand::rngs::OsRng;
use rand::RngCore;
use tracing::{info, warn};
use warden_platform::{color, Embed, Message, Platform, Responder};
use warden_store::{AccessKey, AccessKeyRegistry};
use warden_types::{Timestamp, UserId};
use warden_utils::format_duration;

use crate::{Bot, BotError, Invocation};

/// Random bytes per key; the hex rendering is twice as long.
const KEY_BYTES: usize = 10;

/// Answer to the note question that means "no note".
const NO_NOTE: &str = "none";

/// Mint a fresh key: [`KEY_BYTES`] bytes from the OS RNG, hex-encoded.
pub fn generate_key() -> String {
    let mut bytes = [0u8; KEY_BYTES];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// Wizard questions, in order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WizardStep {
    Recipient,
    Wallet,
    Note,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WizardOutcome {
    Issued { key: String, record: AccessKey },
    /// The operator did not answer a mandatory step in time.
    Abandoned(WizardStep),
}

impl Bot {
    /// `/daracceso`: acknowledge the interaction, then run the wizard in DM.
    pub async fn handle_grant_access(
        &self,
        platform: &dyn Platform,
        responder: &dyn Responder,
        inv: &Invocation,
    ) -> Result<Option<WizardOutcome>, BotError> {
        let private = inv.private();
        if !self.is_owner(&inv.user) {
            responder
                .reply(
                    Message::text("Only the authorized owner can use /daracceso."),
                    private,
                )
                .await?;
            return Ok(None);
        }

        if let Err(e) = platform.open_dm(&inv.user).await {
            warn!(user = %inv.user, error = %e, "could not open a DM for the access wizard");
            responder
                .reply(
                    Message::text("I couldn't DM you. Enable direct messages to continue."),
                    private,
                )
                .await?;
            return Ok(None);
        }
        responder
            .reply(
                Message::text("I opened a private chat with you to finish the wizard."),
                private,
            )
            .await?;

        self.run_access_wizard(platform, &inv.user).await.map(Some)
    }

    /// Ask one question and wait for a non-empty answer.
    async fn ask(
        &self,
        platform: &dyn Platform,
        operator: &UserId,
        question: &str,
    ) -> Result<Option<String>, BotError> {
        platform.send_dm(operator, Message::text(question)).await?;
        let answer = platform
            .await_dm_reply(operator, self.wizard_timeout())
            .await
            .map(|raw| raw.trim().to_string())
            .filter(|answer| !answer.is_empty());
        Ok(answer)
    }

    /// The three-question dialogue. Recipient and wallet are mandatory; a
    /// missing note still issues the key.
    pub async fn run_access_wizard(
        &self,
        platform: &dyn Platform,
        operator: &UserId,
    ) -> Result<WizardOutcome, BotError> {
        let intro = Embed::new(color::BLURPLE)
            .title("🔐 Access key wizard")
            .description(format!(
                "Answer each question within {}.",
                format_duration(self.config.wizard_timeout_secs)
            ));
        platform.send_dm(operator, Message::embed(intro)).await?;

        let recipient = self
            .ask(
                platform,
                operator,
                "1️⃣ Who is the key for? Send their user ID or mention them.",
            )
            .await?
            .and_then(|answer| UserId::parse_reference(&answer));
        let Some(recipient) = recipient else {
            platform
                .send_dm(
                    operator,
                    Message::text("❌ I didn't receive the ID in time. Run /daracceso again."),
                )
                .await?;
            info!(%operator, "access wizard abandoned at the recipient step");
            return Ok(WizardOutcome::Abandoned(WizardStep::Recipient));
        };

        let Some(wallet_address) = self
            .ask(platform, operator, "2️⃣ Which wallet address should the key unlock?")
            .await?
        else {
            platform
                .send_dm(
                    operator,
                    Message::text("❌ I didn't receive the wallet. Process cancelled."),
                )
                .await?;
            info!(%operator, "access wizard abandoned at the wallet step");
            return Ok(WizardOutcome::Abandoned(WizardStep::Wallet));
        };

        let note = self
            .ask(
                platform,
                operator,
                "3️⃣ Add a note for this key, or reply `none`.",
            )
            .await?
            .filter(|note| !note.eq_ignore_ascii_case(NO_NOTE));

        let key = generate_key();
        let record = AccessKey {
            allowed_user_id: recipient,
            wallet_address,
            created_by: operator.clone(),
            created_at: Timestamp::now(),
            note,
            redeemed_by: None,
            redeemed_at: None,
        };
        self.store.update(|keys: &mut AccessKeyRegistry| {
            keys.insert(key.clone(), record.clone())
        })?;
        info!(%operator, recipient = %record.allowed_user_id, "access key issued");

        let mut embed = Embed::new(color::GREEN)
            .title("✅ Access key created")
            .field("Key", format!("`{key}`"), false)
            .field("Recipient", record.allowed_user_id.mention(), true)
            .field("Wallet", format!("`{}`", record.wallet_address), true);
        if let Some(note) = &record.note {
            embed = embed.field("Note", note.clone(), false);
        }
        embed = embed.footer("Share this key privately with its recipient.");
        platform.send_dm(operator, Message::embed(embed)).await?;

        Ok(WizardOutcome::Issued { key, record })
    }
}
