//! Dispatch gate: reply correlation first, then command routing.

use std::sync::Arc;

use reply_hub::ReplyHub;
use tracing::{debug, info, instrument};
use tracker_core::{texts, Bot, HandlerResponse, Message, Result, Update};

use crate::command::{command_token, CommandTable};

/// Routes updates. Cheap to share behind an `Arc`; every spawned update task holds one.
pub struct Dispatcher {
    bot: Arc<dyn Bot>,
    reply_hub: Arc<ReplyHub>,
    commands: CommandTable,
    bot_name: String,
}

impl Dispatcher {
    /// `bot_name` is the bot's own username, compared against `/cmd@name` suffixes.
    pub fn new(
        bot: Arc<dyn Bot>,
        reply_hub: Arc<ReplyHub>,
        commands: CommandTable,
        bot_name: impl Into<String>,
    ) -> Self {
        Self {
            bot,
            reply_hub,
            commands,
            bot_name: bot_name.into(),
        }
    }

    pub fn bot_name(&self) -> &str {
        &self.bot_name
    }

    /// Routes one update:
    /// 1. a reply goes to the reply hub; if nobody waits for it the sender gets a "too late" notice;
    /// 2. a message without chat is ignored;
    /// 3. a command for another bot, or an unknown command, is ignored;
    /// 4. otherwise the command's gate runs and, if it passes, the command itself.
    #[instrument(skip(self, update), fields(update_id = update.id))]
    pub async fn route(&self, update: Update) -> Result<()> {
        let Some(message) = update.message else {
            debug!("Update without message ignored");
            return Ok(());
        };

        if let Some(reply_to) = message.reply_to_message_id {
            return self.route_reply(reply_to, message).await;
        }

        let Some(chat_id) = message.chat_id() else {
            debug!(user_id = message.user.id, "Message without chat ignored");
            return Ok(());
        };

        let Some(command) = command_token(&message.text, &self.bot_name) else {
            debug!(chat_id, "Message addressed to another bot or empty, dropped");
            return Ok(());
        };

        let Some(handler) = self.commands.get(command) else {
            debug!(chat_id, command = %command, "Not a known command");
            return Ok(());
        };

        info!(
            chat_id,
            user_id = message.user.id,
            command = %command,
            "Dispatching command"
        );

        if !handler.before(&message).await? {
            info!(chat_id, command = %command, "Command stopped by its gate");
            return Ok(());
        }

        match handler.handle(&message).await? {
            HandlerResponse::Done => {}
            HandlerResponse::Reply(text) => {
                self.bot
                    .send_message(message.sender_id(), &text, None)
                    .await?;
            }
        }
        debug!(chat_id, command = %command, "Command finished");
        Ok(())
    }

    async fn route_reply(&self, reply_to: i32, message: Message) -> Result<()> {
        let sender = message.sender_id();
        if self.reply_hub.deliver(reply_to, message).await {
            debug!(reply_to, user_id = sender, "Reply delivered to waiting handler");
            return Ok(());
        }

        info!(reply_to, user_id = sender, "Reply matched no waiting question");
        self.bot
            .send_message(sender, texts::REPLY_TOO_LATE, None)
            .await?;
        Ok(())
    }
}
