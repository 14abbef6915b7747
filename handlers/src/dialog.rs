//! Interactive questions: send, then block on the reply hub until the human answers.

use std::sync::Arc;

use reply_hub::ReplyHub;
use tracing::{info, instrument, warn};
use tracker_core::{texts, Bot, HandlerError, Message, ReplyMarkup, Result};

/// Answer to a yes/no prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Yes,
    No,
}

impl Confirmation {
    /// `YES` in any case, surrounding whitespace ignored, is a yes; anything else is a no.
    pub fn parse(answer: &str) -> Self {
        if answer.trim().eq_ignore_ascii_case(texts::YES) {
            Confirmation::Yes
        } else {
            Confirmation::No
        }
    }
}

/// Question/answer helper shared by command handlers.
#[derive(Clone)]
pub struct Dialog {
    bot: Arc<dyn Bot>,
    reply_hub: Arc<ReplyHub>,
}

impl Dialog {
    pub fn new(bot: Arc<dyn Bot>, reply_hub: Arc<ReplyHub>) -> Self {
        Self { bot, reply_hub }
    }

    /// Sends `question` privately with a forced reply and waits for the answer.
    ///
    /// Fails with `ReplyTimeout` when the user does not answer in time.
    #[instrument(skip(self, question))]
    pub async fn ask(&self, user_id: i64, question: &str) -> Result<Message> {
        let sent = self
            .bot
            .send_message(user_id, question, Some(ReplyMarkup::ForceReply))
            .await?;
        let handle = self.reply_hub.register_wait(sent.id).await?;
        info!(message_id = sent.id, "Question sent, waiting for answer");
        self.reply_hub.wait(handle).await
    }

    /// [`Dialog::ask`] returning the trimmed answer text; an empty answer is
    /// [`HandlerError::EmptyAnswer`].
    pub async fn ask_text(&self, user_id: i64, question: &str) -> Result<String> {
        let answer = self.ask(user_id, question).await?;
        let text = answer.text.trim();
        if text.is_empty() {
            return Err(HandlerError::EmptyAnswer.into());
        }
        Ok(text.to_string())
    }

    /// Sends `prompt` with a YES/NO keyboard and waits for the answer. The keyboard is removed
    /// afterwards, whether the user answered or not.
    #[instrument(skip(self, prompt))]
    pub async fn confirm(&self, user_id: i64, prompt: &str) -> Result<Confirmation> {
        let keyboard = ReplyMarkup::single_column([texts::YES, texts::NO]);
        let sent = self
            .bot
            .send_message(user_id, prompt, Some(keyboard))
            .await?;
        let handle = self.reply_hub.register_wait(sent.id).await?;
        info!(message_id = sent.id, "Confirmation prompt sent, waiting for answer");

        let answer = self.reply_hub.wait(handle).await;

        let closing_text = match &answer {
            Ok(_) => texts::ANSWER_RECEIVED,
            Err(_) => texts::REPLY_TOO_LATE,
        };
        if let Err(e) = self
            .bot
            .send_message(user_id, closing_text, Some(ReplyMarkup::RemoveKeyboard))
            .await
        {
            warn!(error = %e, "Failed to remove confirmation keyboard");
        }

        Ok(Confirmation::parse(&answer?.text))
    }
}
