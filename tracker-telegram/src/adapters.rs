//! Adapters from Telegram (teloxide) types to tracker_core types.
//! Depends only on teloxide and tracker_core type definitions.

use teloxide::types::UpdateKind;
use tracker_core::{Chat, Message, ToCoreMessage, ToCoreUpdate, ToCoreUser, Update, User};

/// Wraps a teloxide User for conversion to core [`User`].
pub struct TelegramUserWrapper<'a>(pub &'a teloxide::types::User);

impl<'a> ToCoreUser for TelegramUserWrapper<'a> {
    fn to_core(&self) -> User {
        User {
            id: self.0.id.0 as i64,
            username: self.0.username.clone(),
            first_name: Some(self.0.first_name.clone()),
            last_name: self.0.last_name.clone(),
        }
    }
}

/// Wraps a teloxide Message for conversion to core [`Message`].
pub struct TelegramMessageWrapper<'a>(pub &'a teloxide::types::Message);

impl<'a> ToCoreMessage for TelegramMessageWrapper<'a> {
    fn to_core(&self) -> Message {
        Message {
            id: self.0.id.0,
            user: self
                .0
                .from
                .as_ref()
                .map(|u| TelegramUserWrapper(u).to_core())
                .unwrap_or_else(User::unknown),
            chat: Some(Chat {
                id: self.0.chat.id.0,
                chat_type: self.chat_type().to_string(),
            }),
            text: self.0.text().unwrap_or("").to_string(),
            created_at: self.0.date,
            reply_to_message_id: self.0.reply_to_message().map(|m| m.id.0),
        }
    }
}

impl<'a> TelegramMessageWrapper<'a> {
    fn chat_type(&self) -> &'static str {
        let chat = &self.0.chat;
        if chat.is_private() {
            "private"
        } else if chat.is_supergroup() {
            "supergroup"
        } else if chat.is_group() {
            "group"
        } else {
            "channel"
        }
    }
}

/// Wraps a teloxide Update; only plain messages carry a payload, other kinds become `message: None`.
/// Telegram ids are `u32`; one above `i32::MAX` yields `None` instead of wrapping negative.
pub struct TelegramUpdateWrapper<'a>(pub &'a teloxide::types::Update);

impl<'a> ToCoreUpdate for TelegramUpdateWrapper<'a> {
    fn to_core(&self) -> Option<Update> {
        let id = i32::try_from(self.0.id.0).ok()?;
        let message = match &self.0.kind {
            UpdateKind::Message(msg) => Some(TelegramMessageWrapper(msg).to_core()),
            _ => None,
        };
        Some(Update { id, message })
    }
}
