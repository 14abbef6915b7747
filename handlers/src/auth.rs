//! Admin gate for privileged commands.

use std::sync::Arc;

use tracing::{error, info, instrument, warn};
use tracker_core::{texts, Bot, Message};

/// Lets a command through only if its sender is creator or administrator of the chat.
#[derive(Clone)]
pub struct AdminGate {
    bot: Arc<dyn Bot>,
}

impl AdminGate {
    pub fn new(bot: Arc<dyn Bot>) -> Self {
        Self { bot }
    }

    /// True when the sender is creator or administrator of the message's chat.
    ///
    /// A non-admin gets one private notice. A failed membership lookup counts as "not admin" and is
    /// only logged. The caller must stop when this returns false.
    #[instrument(skip(self, message), fields(user_id = message.user.id))]
    pub async fn require_admin(&self, message: &Message) -> bool {
        let Some(chat_id) = message.chat_id() else {
            warn!("Privileged command without chat context");
            return false;
        };
        let user_id = message.sender_id();

        match self.bot.get_chat_member_status(chat_id, user_id).await {
            Ok(status) if status.is_privileged() => {
                info!(chat_id, status = ?status, "User authorized");
                true
            }
            Ok(status) => {
                warn!(chat_id, status = ?status, "Unauthorized access attempt");
                if let Err(e) = self
                    .bot
                    .send_message(user_id, texts::ADMIN_REQUIRED, None)
                    .await
                {
                    error!(error = %e, "Failed to send admin-required notice");
                }
                false
            }
            Err(e) => {
                error!(chat_id, error = %e, "Membership lookup failed, access denied");
                false
            }
        }
    }
}
