//! Transport abstraction.
//!
//! [`Bot`] is transport-agnostic; `tracker_telegram::TelegramBotAdapter` implements it via teloxide,
//! tests substitute recording mocks.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{MemberStatus, ReplyMarkup, SentMessage, Update, User};

/// Remote calls the bot core makes. Every call may fail with
/// [`TrackerError::Transport`](crate::TrackerError::Transport) or
/// [`TrackerError::Protocol`](crate::TrackerError::Protocol); none of them retries.
#[async_trait]
pub trait Bot: Send + Sync {
    /// Long-polls for updates with id >= `offset`, at most `limit` of them, blocking up to `timeout`.
    async fn fetch_updates(&self, offset: i32, limit: u8, timeout: Duration) -> Result<Vec<Update>>;

    /// Sends a text message, optionally with reply markup, and returns the sent message's id.
    async fn send_message(
        &self,
        chat_id: i64,
        text: &str,
        markup: Option<ReplyMarkup>,
    ) -> Result<SentMessage>;

    /// Sends a text message in `chat_id` as a reply to `reply_to_message_id`.
    async fn send_reply(
        &self,
        chat_id: i64,
        reply_to_message_id: i32,
        text: &str,
    ) -> Result<SentMessage>;

    /// Membership status of `user_id` in `chat_id`.
    async fn get_chat_member_status(&self, chat_id: i64, user_id: i64) -> Result<MemberStatus>;

    /// The bot's own identity; its username is the `@botname` suffix commands may carry.
    async fn get_me(&self) -> Result<User>;
}
