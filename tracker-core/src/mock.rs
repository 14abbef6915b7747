//! In-memory [`Bot`] for tests (feature `test-util`).
//!
//! Records every send, answers membership queries from a table, and replays scripted update
//! batches. Outgoing messages get sequential ids starting at 1000.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Notify;

use crate::bot::Bot;
use crate::error::{Result, TrackerError};
use crate::types::{MemberStatus, ReplyMarkup, SentMessage, Update, User};

/// One recorded `send_message` / `send_reply` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentRecord {
    pub message_id: i32,
    pub chat_id: i64,
    pub text: String,
    pub markup: Option<ReplyMarkup>,
    pub reply_to_message_id: Option<i32>,
}

/// Scripted outcome of one `fetch_updates` call.
#[derive(Debug, Clone)]
pub enum ScriptedBatch {
    Updates(Vec<Update>),
    TransportFailure(String),
}

/// Recording Bot. Unknown members are reported as [`MemberStatus::Member`].
pub struct MockBot {
    username: String,
    next_message_id: AtomicI32,
    sent: Mutex<Vec<SentRecord>>,
    sent_notify: Notify,
    members: Mutex<HashMap<(i64, i64), MemberStatus>>,
    member_lookup_fails: Mutex<bool>,
    batches: Mutex<VecDeque<ScriptedBatch>>,
    fetch_offsets: Mutex<Vec<i32>>,
}

fn lock<T>(m: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl MockBot {
    /// Creates a bot named `username`.
    pub fn new(username: &str) -> Self {
        Self {
            username: username.to_string(),
            next_message_id: AtomicI32::new(1000),
            sent: Mutex::new(Vec::new()),
            sent_notify: Notify::new(),
            members: Mutex::new(HashMap::new()),
            member_lookup_fails: Mutex::new(false),
            batches: Mutex::new(VecDeque::new()),
            fetch_offsets: Mutex::new(Vec::new()),
        }
    }

    /// Sets the status `get_chat_member_status(chat_id, user_id)` reports.
    pub fn set_member_status(&self, chat_id: i64, user_id: i64, status: MemberStatus) {
        lock(&self.members).insert((chat_id, user_id), status);
    }

    /// Makes every membership lookup fail with a transport error.
    pub fn fail_member_lookups(&self) {
        *lock(&self.member_lookup_fails) = true;
    }

    /// Queues a batch returned by the next `fetch_updates` call.
    pub fn push_batch(&self, batch: ScriptedBatch) {
        lock(&self.batches).push_back(batch);
    }

    /// Offsets passed to `fetch_updates`, in call order.
    pub fn fetch_offsets(&self) -> Vec<i32> {
        lock(&self.fetch_offsets).clone()
    }

    /// All recorded sends.
    pub fn sent(&self) -> Vec<SentRecord> {
        lock(&self.sent).clone()
    }

    /// Recorded sends to `chat_id`.
    pub fn sent_to(&self, chat_id: i64) -> Vec<SentRecord> {
        self.sent()
            .into_iter()
            .filter(|r| r.chat_id == chat_id)
            .collect()
    }

    /// Waits until a send matching `predicate` was recorded, or `timeout` elapsed.
    pub async fn wait_for_sent<F>(&self, timeout: Duration, predicate: F) -> Option<SentRecord>
    where
        F: Fn(&SentRecord) -> bool,
    {
        let deadline = tokio::time::Instant::now() + timeout;
        loop {
            let notified = self.sent_notify.notified();
            if let Some(found) = self.sent().into_iter().find(|r| predicate(r)) {
                return Some(found);
            }
            if tokio::time::timeout_at(deadline, notified).await.is_err() {
                return None;
            }
        }
    }

    fn record(
        &self,
        chat_id: i64,
        text: &str,
        markup: Option<ReplyMarkup>,
        reply_to_message_id: Option<i32>,
    ) -> SentMessage {
        let message_id = self.next_message_id.fetch_add(1, Ordering::SeqCst);
        lock(&self.sent).push(SentRecord {
            message_id,
            chat_id,
            text: text.to_string(),
            markup,
            reply_to_message_id,
        });
        self.sent_notify.notify_waiters();
        SentMessage {
            id: message_id,
            chat_id,
        }
    }
}

#[async_trait]
impl Bot for MockBot {
    async fn fetch_updates(&self, offset: i32, _limit: u8, timeout: Duration) -> Result<Vec<Update>> {
        lock(&self.fetch_offsets).push(offset);
        let next = lock(&self.batches).pop_front();
        match next {
            Some(ScriptedBatch::Updates(updates)) => Ok(updates),
            Some(ScriptedBatch::TransportFailure(reason)) => Err(TrackerError::Transport(reason)),
            None => {
                tokio::time::sleep(timeout).await;
                Ok(Vec::new())
            }
        }
    }

    async fn send_message(
        &self,
        chat_id: i64,
        text: &str,
        markup: Option<ReplyMarkup>,
    ) -> Result<SentMessage> {
        Ok(self.record(chat_id, text, markup, None))
    }

    async fn send_reply(
        &self,
        chat_id: i64,
        reply_to_message_id: i32,
        text: &str,
    ) -> Result<SentMessage> {
        Ok(self.record(chat_id, text, None, Some(reply_to_message_id)))
    }

    async fn get_chat_member_status(&self, chat_id: i64, user_id: i64) -> Result<MemberStatus> {
        if *lock(&self.member_lookup_fails) {
            return Err(TrackerError::Transport("member lookup failed".to_string()));
        }
        Ok(lock(&self.members)
            .get(&(chat_id, user_id))
            .copied()
            .unwrap_or(MemberStatus::Member))
    }

    async fn get_me(&self) -> Result<User> {
        Ok(User {
            id: 1,
            username: Some(self.username.clone()),
            first_name: Some(self.username.clone()),
            last_name: None,
        })
    }
}
