//! Informational commands: `/help`, `/whoami`.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use tracing::{error, instrument};
use tracker_core::{texts, Bot, Handler, HandlerResponse, MemberStatus, Message, Result};

/// `/help`: the command list, sent privately.
pub struct HelpHandler;

#[async_trait]
impl Handler for HelpHandler {
    async fn handle(&self, _message: &Message) -> Result<HandlerResponse> {
        Ok(HandlerResponse::Reply(texts::HELP.to_string()))
    }
}

#[derive(Debug, Serialize)]
struct MembershipReport<'a> {
    chat_id: i64,
    user_id: i64,
    username: Option<&'a str>,
    status: MemberStatus,
}

/// `/whoami`: answers the command in its chat with the sender's membership as pretty JSON.
pub struct WhoAmIHandler {
    bot: Arc<dyn Bot>,
}

impl WhoAmIHandler {
    pub fn new(bot: Arc<dyn Bot>) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl Handler for WhoAmIHandler {
    #[instrument(skip(self, message), fields(user_id = message.user.id))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        let Some(chat_id) = message.chat_id() else {
            return Ok(HandlerResponse::Done);
        };
        let status = self
            .bot
            .get_chat_member_status(chat_id, message.sender_id())
            .await
            .inspect_err(|e| error!(chat_id, error = %e, "Failed to get chat member"))?;

        let report = MembershipReport {
            chat_id,
            user_id: message.sender_id(),
            username: message.user.username.as_deref(),
            status,
        };
        let json = serde_json::to_string_pretty(&report).map_err(std::io::Error::from)?;

        self.bot.send_reply(chat_id, message.id, &json).await?;
        Ok(HandlerResponse::Done)
    }
}
