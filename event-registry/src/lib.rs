//! # Event registry
//!
//! Process-wide map from chat id to the one event currently open in that chat, plus the list of
//! events ever opened per chat. State is volatile and lost on restart.
//!
//! ## Thread Safety
//!
//! All state sits behind one `tokio::sync::Mutex`; every public operation takes the lock once, so
//! check-then-modify sequences (e.g. "no event yet, so open one") cannot interleave.

mod event;

pub use event::{Event, EventSummary, MemberRecord};

use std::collections::HashMap;

use chrono::Utc;
use tokio::sync::Mutex;
use tracing::{info, instrument};
use tracker_core::{HandlerError, Result};

#[derive(Default)]
struct RegistryState {
    last_event_id: u64,
    events: HashMap<i64, Event>,
    history: HashMap<i64, Vec<EventSummary>>,
}

/// In-memory event registry. Share it behind an `Arc`.
#[derive(Default)]
pub struct EventRegistry {
    state: Mutex<RegistryState>,
}

impl EventRegistry {
    /// Creates an empty registry; the first event gets id 1.
    pub fn new() -> Self {
        Self::default()
    }

    /// True if `chat_id` has an open event.
    pub async fn contains(&self, chat_id: i64) -> bool {
        self.state.lock().await.events.contains_key(&chat_id)
    }

    /// Snapshot of the open event of `chat_id`.
    pub async fn get(&self, chat_id: i64) -> Option<Event> {
        self.state.lock().await.events.get(&chat_id).cloned()
    }

    /// Opens a new event in `chat_id` with a fresh sequential id.
    ///
    /// Fails with [`HandlerError::EventAlreadyExists`] if the chat already has one; no id is consumed then.
    #[instrument(skip(self, description))]
    pub async fn open(&self, chat_id: i64, description: &str) -> Result<Event> {
        let mut state = self.state.lock().await;
        if state.events.contains_key(&chat_id) {
            return Err(HandlerError::EventAlreadyExists.into());
        }

        state.last_event_id += 1;
        let event = Event {
            id: state.last_event_id,
            chat_id,
            description: description.to_string(),
            opened_at: Utc::now(),
            registrations: Vec::new(),
        };
        state
            .history
            .entry(chat_id)
            .or_default()
            .push(EventSummary::from(&event));
        state.events.insert(chat_id, event.clone());

        info!(chat_id, event_id = event.id, "Event opened");
        Ok(event)
    }

    /// Removes and returns the open event of `chat_id`.
    ///
    /// Fails with [`HandlerError::NoActiveEvent`] if there is none.
    #[instrument(skip(self))]
    pub async fn close(&self, chat_id: i64) -> Result<Event> {
        let event = self
            .state
            .lock()
            .await
            .events
            .remove(&chat_id)
            .ok_or(HandlerError::NoActiveEvent)?;
        info!(
            chat_id,
            event_id = event.id,
            registrations = event.registrations.len(),
            "Event closed"
        );
        Ok(event)
    }

    /// Appends a registration to the open event of `chat_id` and returns the new participant count.
    ///
    /// Names are unique per event (case-insensitive).
    #[instrument(skip(self, record), fields(name = %record.name))]
    pub async fn register(&self, chat_id: i64, record: MemberRecord) -> Result<usize> {
        let mut state = self.state.lock().await;
        let event = state
            .events
            .get_mut(&chat_id)
            .ok_or(HandlerError::NoActiveEvent)?;
        if event.find_registration(&record.name).is_some() {
            return Err(HandlerError::AlreadyRegistered(record.name).into());
        }
        event.registrations.push(record);
        info!(chat_id, event_id = event.id, count = event.registrations.len(), "Participant registered");
        Ok(event.registrations.len())
    }

    /// Removes the registration named `name` from the open event of `chat_id`.
    #[instrument(skip(self))]
    pub async fn unregister(&self, chat_id: i64, name: &str) -> Result<MemberRecord> {
        let mut state = self.state.lock().await;
        let event = state
            .events
            .get_mut(&chat_id)
            .ok_or(HandlerError::NoActiveEvent)?;
        let index = event
            .find_registration(name)
            .ok_or_else(|| HandlerError::NotRegistered(name.to_string()))?;
        let record = event.registrations.remove(index);
        info!(chat_id, event_id = event.id, "Participant unregistered");
        Ok(record)
    }

    /// Events opened in `chat_id`, oldest first.
    pub async fn history(&self, chat_id: i64) -> Vec<EventSummary> {
        self.state
            .lock()
            .await
            .history
            .get(&chat_id)
            .cloned()
            .unwrap_or_default()
    }
}
