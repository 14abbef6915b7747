//! Incoming updates, messages and the receipt of an outgoing send.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{chat::Chat, user::User};

/// One unit of the long-poll feed. `id` is strictly increasing; the poller advances its cursor past it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Update {
    pub id: i32,
    /// `None` for update kinds the bot does not handle (edits, callbacks, membership changes, ...).
    pub message: Option<Message>,
}

/// A message with sender, optional chat, text and optional reply context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: i32,
    pub user: User,
    pub chat: Option<Chat>,
    pub text: String,
    pub created_at: DateTime<Utc>,
    /// Id of the message this one answers. This is the correlation key for the reply hub.
    pub reply_to_message_id: Option<i32>,
}

impl Message {
    /// Chat id when the message carries chat context.
    pub fn chat_id(&self) -> Option<i64> {
        self.chat.as_ref().map(|c| c.id)
    }

    /// Sender id.
    pub fn sender_id(&self) -> i64 {
        self.user.id
    }
}

/// What the transport reports back after a successful send.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentMessage {
    pub id: i32,
    pub chat_id: i64,
}
