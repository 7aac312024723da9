use tracing::error;
use warden_platform::{Message, Platform};

use crate::Bot;

impl Bot {
    /// DM the operator. Delivery problems are logged, never surfaced.
    pub(crate) async fn notify_owner(&self, platform: &dyn Platform, content: impl Into<String>) {
        let owner = &self.config.owner_id;
        if let Err(e) = platform.send_dm(owner, Message::text(content)).await {
            error!(%owner, error = %e, "could not notify the owner");
        }
    }
}
