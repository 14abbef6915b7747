//! Wraps teloxide::Bot and implements [`tracker_core::Bot`]. Production code talks to the Bot API
//! through this adapter; tests substitute `MockBot`.

use std::time::Duration;

use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::{
    ChatId, ChatMemberStatus, ForceReply, KeyboardButton, KeyboardMarkup, KeyboardRemove,
    MessageId, ReplyParameters, UserId,
};
use teloxide::RequestError;
use tracing::{debug, instrument, warn};
use tracker_core::{
    Bot as CoreBot, MemberStatus, ReplyMarkup, Result, SentMessage, ToCoreUpdate, ToCoreUser,
    TrackerError, Update, User,
};

use crate::adapters::{TelegramUpdateWrapper, TelegramUserWrapper};
use crate::config::TelegramConfig;

/// Head room on top of the long-poll timeout before the HTTP client gives up on `getUpdates`.
const REQUEST_SLACK: Duration = Duration::from_secs(10);

/// Thin wrapper around teloxide::Bot that implements tracker-core's Bot trait.
pub struct TelegramBotAdapter {
    bot: teloxide::Bot,
}

impl TelegramBotAdapter {
    /// Creates an adapter from an existing teloxide Bot.
    pub fn new(bot: teloxide::Bot) -> Self {
        Self { bot }
    }

    /// Builds the teloxide Bot from config. The HTTP client timeout is `long_poll_timeout` plus
    /// some slack so a long poll is never cut short by the client.
    pub fn from_config(config: &TelegramConfig, long_poll_timeout: Duration) -> Result<Self> {
        let client = teloxide::net::default_reqwest_settings()
            .timeout(long_poll_timeout + REQUEST_SLACK)
            .build()
            .map_err(|e| TrackerError::Config(format!("HTTP client: {}", e)))?;
        let mut bot = teloxide::Bot::with_client(config.bot_token.clone(), client);
        if let Some(url) = config.api_url()? {
            debug!(url = %url, "Using custom Bot API endpoint");
            bot = bot.set_api_url(url);
        }
        Ok(Self::new(bot))
    }
}

/// `ok: false` answers become [`TrackerError::Protocol`]; everything else is a transport failure.
pub fn map_request_error(e: RequestError) -> TrackerError {
    match &e {
        RequestError::Api(_) | RequestError::MigrateToChatId(_) | RequestError::RetryAfter(_) => {
            TrackerError::Protocol(e.to_string())
        }
        _ => TrackerError::Transport(e.to_string()),
    }
}

fn to_telegram_markup(markup: ReplyMarkup) -> teloxide::types::ReplyMarkup {
    match markup {
        ReplyMarkup::ForceReply => teloxide::types::ReplyMarkup::ForceReply(ForceReply::new()),
        ReplyMarkup::Keyboard(rows) => teloxide::types::ReplyMarkup::Keyboard(
            KeyboardMarkup::new(
                rows.into_iter()
                    .map(|row| row.into_iter().map(KeyboardButton::new).collect::<Vec<_>>()),
            )
            .resize_keyboard(),
        ),
        ReplyMarkup::RemoveKeyboard => {
            teloxide::types::ReplyMarkup::KeyboardRemove(KeyboardRemove::new())
        }
    }
}

fn to_member_status(status: ChatMemberStatus) -> MemberStatus {
    match status {
        ChatMemberStatus::Owner => MemberStatus::Creator,
        ChatMemberStatus::Administrator => MemberStatus::Administrator,
        ChatMemberStatus::Member => MemberStatus::Member,
        ChatMemberStatus::Restricted => MemberStatus::Restricted,
        ChatMemberStatus::Left => MemberStatus::Left,
        ChatMemberStatus::Banned => MemberStatus::Banned,
    }
}

fn user_id(id: i64) -> Result<UserId> {
    u64::try_from(id)
        .map(UserId)
        .map_err(|_| TrackerError::Protocol(format!("Invalid user id: {}", id)))
}

#[async_trait]
impl CoreBot for TelegramBotAdapter {
    async fn fetch_updates(&self, offset: i32, limit: u8, timeout: Duration) -> Result<Vec<Update>> {
        let updates = self
            .bot
            .get_updates()
            .offset(offset)
            .limit(limit)
            .timeout(timeout.as_secs() as u32)
            .await
            .map_err(map_request_error)?;
        Ok(updates
            .iter()
            .filter_map(|u| {
                let core = TelegramUpdateWrapper(u).to_core();
                if core.is_none() {
                    warn!(update_id = u.id.0, "Skipping update with an id outside the i32 range");
                }
                core
            })
            .collect())
    }

    #[instrument(skip(self, text, markup))]
    async fn send_message(
        &self,
        chat_id: i64,
        text: &str,
        markup: Option<ReplyMarkup>,
    ) -> Result<SentMessage> {
        let mut request = self.bot.send_message(ChatId(chat_id), text.to_string());
        if let Some(markup) = markup {
            request = request.reply_markup(to_telegram_markup(markup));
        }
        let sent = request.await.map_err(map_request_error)?;
        Ok(SentMessage {
            id: sent.id.0,
            chat_id: sent.chat.id.0,
        })
    }

    #[instrument(skip(self, text))]
    async fn send_reply(
        &self,
        chat_id: i64,
        reply_to_message_id: i32,
        text: &str,
    ) -> Result<SentMessage> {
        let sent = self
            .bot
            .send_message(ChatId(chat_id), text.to_string())
            .reply_parameters(ReplyParameters::new(MessageId(reply_to_message_id)))
            .await
            .map_err(map_request_error)?;
        Ok(SentMessage {
            id: sent.id.0,
            chat_id: sent.chat.id.0,
        })
    }

    async fn get_chat_member_status(&self, chat_id: i64, user_id_raw: i64) -> Result<MemberStatus> {
        let member = self
            .bot
            .get_chat_member(ChatId(chat_id), user_id(user_id_raw)?)
            .await
            .map_err(map_request_error)?;
        Ok(to_member_status(member.kind.status()))
    }

    async fn get_me(&self) -> Result<User> {
        let me = self.bot.get_me().await.map_err(map_request_error)?;
        Ok(TelegramUserWrapper(&me.user).to_core())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_BOT_TOKEN: &str = "test_bot_token_12345";

    fn adapter_for(server: &mockito::ServerGuard) -> TelegramBotAdapter {
        let mut config = TelegramConfig::with_token(TEST_BOT_TOKEN.to_string());
        config.telegram_api_url = Some(server.url());
        TelegramBotAdapter::from_config(&config, Duration::from_secs(1)).unwrap()
    }

    /// Path matcher for a Bot API method. teloxide sends method names in CamelCase
    /// (`/bot<token>/GetChatMember`), so the match ignores case.
    fn method_path(method: &str) -> mockito::Matcher {
        mockito::Matcher::Regex(format!("(?i)^/bot{}/{}$", TEST_BOT_TOKEN, method))
    }

    #[test]
    fn test_markup_conversion() {
        assert!(matches!(
            to_telegram_markup(ReplyMarkup::ForceReply),
            teloxide::types::ReplyMarkup::ForceReply(_)
        ));
        assert!(matches!(
            to_telegram_markup(ReplyMarkup::RemoveKeyboard),
            teloxide::types::ReplyMarkup::KeyboardRemove(_)
        ));
        match to_telegram_markup(ReplyMarkup::single_column(["Yes", "No"])) {
            teloxide::types::ReplyMarkup::Keyboard(k) => {
                assert_eq!(k.keyboard.len(), 2);
                assert_eq!(k.keyboard[1][0].text, "No");
            }
            other => panic!("unexpected markup {:?}", other),
        }
    }

    #[test]
    fn test_negative_user_id_rejected() {
        assert!(matches!(user_id(-1), Err(TrackerError::Protocol(_))));
        assert_eq!(user_id(7).unwrap(), UserId(7));
    }

    /// **Test: getChatMember "creator" maps to MemberStatus::Creator.**
    #[tokio::test]
    async fn test_get_chat_member_creator() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", method_path("getChatMember"))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{
                "ok": true,
                "result": {
                    "status": "creator",
                    "user": {"id": 7, "is_bot": false, "first_name": "Ann"},
                    "is_anonymous": false
                }
            }"#,
            )
            .create_async()
            .await;

        let status = adapter_for(&server)
            .get_chat_member_status(-5, 7)
            .await
            .unwrap();
        assert_eq!(status, MemberStatus::Creator);
    }

    /// **Test: an `ok: false` answer becomes a Protocol error carrying the description.**
    #[tokio::test]
    async fn test_api_error_is_protocol_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", method_path("getChatMember"))
            .with_status(400)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"ok": false, "error_code": 400, "description": "Bad Request: chat not found"}"#,
            )
            .create_async()
            .await;

        let err = adapter_for(&server)
            .get_chat_member_status(-5, 7)
            .await
            .unwrap_err();
        assert!(matches!(err, TrackerError::Protocol(_)), "got {:?}", err);
    }

    /// **Test: sendMessage returns the id Telegram assigned.**
    #[tokio::test]
    async fn test_send_message_returns_id() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", method_path("sendMessage"))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{
                "ok": true,
                "result": {
                    "message_id": 1000,
                    "date": 1706529600,
                    "chat": {"id": 7, "type": "private", "first_name": "Ann"},
                    "from": {"id": 1, "is_bot": true, "first_name": "ThisBot", "username": "ThisBot"},
                    "text": "Enter a description of the planned event:"
                }
            }"#,
            )
            .create_async()
            .await;

        let sent = adapter_for(&server)
            .send_message(7, "Enter a description of the planned event:", Some(ReplyMarkup::ForceReply))
            .await
            .unwrap();
        assert_eq!(sent, SentMessage { id: 1000, chat_id: 7 });
    }

    /// **Test: getMe resolves the bot's username.**
    #[tokio::test]
    async fn test_get_me() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", method_path("getMe"))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{
                "ok": true,
                "result": {
                    "id": 1,
                    "is_bot": true,
                    "first_name": "ThisBot",
                    "username": "ThisBot",
                    "can_join_groups": true,
                    "can_read_all_group_messages": false,
                    "supports_inline_queries": false,
                    "can_connect_to_business": false,
                    "has_main_web_app": false
                }
            }"#,
            )
            .create_async()
            .await;

        let me = adapter_for(&server).get_me().await.unwrap();
        assert_eq!(me.username.as_deref(), Some("ThisBot"));
    }

    /// **Test: getUpdates drops an update whose id is past i32::MAX and keeps the rest.**
    #[tokio::test]
    async fn test_fetch_updates_skips_out_of_range_id() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", method_path("getUpdates"))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{
                "ok": true,
                "result": [
                    {
                        "update_id": 41,
                        "message": {
                            "message_id": 10,
                            "from": {"id": 7, "is_bot": false, "first_name": "Ann"},
                            "chat": {"id": -5, "type": "group", "title": "Club"},
                            "date": 1700000000,
                            "text": "/show"
                        }
                    },
                    {
                        "update_id": 3000000000,
                        "message": {
                            "message_id": 11,
                            "from": {"id": 7, "is_bot": false, "first_name": "Ann"},
                            "chat": {"id": -5, "type": "group", "title": "Club"},
                            "date": 1700000001,
                            "text": "/open"
                        }
                    }
                ]
            }"#,
            )
            .create_async()
            .await;

        let updates = adapter_for(&server)
            .fetch_updates(0, 10, Duration::from_secs(0))
            .await
            .unwrap();
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].id, 41);
        assert_eq!(updates[0].message.as_ref().unwrap().text, "/show");
    }

    /// **Test: an unreachable endpoint is a Transport error.**
    #[tokio::test]
    async fn test_unreachable_is_transport_error() {
        let mut config = TelegramConfig::with_token(TEST_BOT_TOKEN.to_string());
        config.telegram_api_url = Some("http://127.0.0.1:9".to_string());
        let adapter = TelegramBotAdapter::from_config(&config, Duration::from_secs(1)).unwrap();

        let err = adapter.get_me().await.unwrap_err();
        assert!(matches!(err, TrackerError::Transport(_)), "got {:?}", err);
    }
}
