//! Shared fixtures: messages, a wired handler environment, and a helper that answers questions.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use event_registry::EventRegistry;
use reply_hub::ReplyHub;
use tracker_core::mock::{MockBot, SentRecord};
use tracker_core::{Chat, Message, ReplyMarkup, User};

use crate::{AdminGate, Dialog};

pub const CHAT: i64 = 5;
pub const ADMIN: i64 = 7;
pub const MEMBER: i64 = 8;

pub fn user(id: i64) -> User {
    User {
        id,
        username: Some(format!("user{}", id)),
        first_name: Some("Test".to_string()),
        last_name: None,
    }
}

pub fn command(text: &str, from: i64) -> Message {
    Message {
        id: 77,
        user: user(from),
        chat: Some(Chat {
            id: CHAT,
            chat_type: "group".to_string(),
        }),
        text: text.to_string(),
        created_at: Utc::now(),
        reply_to_message_id: None,
    }
}

pub fn answer(text: &str, from: i64, reply_to: i32) -> Message {
    Message {
        id: 78,
        user: user(from),
        chat: Some(Chat::private(from)),
        text: text.to_string(),
        created_at: Utc::now(),
        reply_to_message_id: Some(reply_to),
    }
}

pub struct Env {
    pub bot: Arc<MockBot>,
    pub hub: Arc<ReplyHub>,
    pub registry: Arc<EventRegistry>,
}

impl Env {
    pub fn new() -> Self {
        let bot = Arc::new(MockBot::new("ThisBot"));
        bot.set_member_status(CHAT, ADMIN, tracker_core::MemberStatus::Creator);
        Self {
            bot,
            hub: Arc::new(ReplyHub::new(Duration::from_secs(300))),
            registry: Arc::new(EventRegistry::new()),
        }
    }

    pub fn gate(&self) -> AdminGate {
        AdminGate::new(self.bot.clone())
    }

    pub fn dialog(&self) -> Dialog {
        Dialog::new(self.bot.clone(), self.hub.clone())
    }

    /// Waits for the `nth` (0-based) prompt sent to `user_id` that expects an answer, then waits until
    /// the hub has a waiter on it, and answers it with `text`.
    pub async fn answer_prompt(&self, user_id: i64, nth: usize, text: &str) -> SentRecord {
        let prompt = self
            .bot
            .wait_for_sent(Duration::from_secs(5), |r| {
                r.chat_id == user_id
                    && expects_answer(r)
                    && self.prompts_to(user_id).iter().position(|p| p == r) == Some(nth)
            })
            .await
            .expect("prompt was sent");
        while !self.hub.is_waiting(prompt.message_id).await {
            tokio::task::yield_now().await;
        }
        assert!(
            self.hub
                .deliver(prompt.message_id, answer(text, user_id, prompt.message_id))
                .await
        );
        prompt
    }

    pub fn prompts_to(&self, user_id: i64) -> Vec<SentRecord> {
        self.bot
            .sent_to(user_id)
            .into_iter()
            .filter(expects_answer)
            .collect()
    }
}

fn expects_answer(record: &SentRecord) -> bool {
    matches!(
        record.markup,
        Some(ReplyMarkup::ForceReply) | Some(ReplyMarkup::Keyboard(_))
    )
}
