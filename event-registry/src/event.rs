//! Event records held by the registry.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One participant registered for an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberRecord {
    pub name: String,
    pub license: String,
}

/// The open event of a chat.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    /// Process-unique, issued sequentially from 1.
    pub id: u64,
    pub chat_id: i64,
    pub description: String,
    pub opened_at: DateTime<Utc>,
    /// In registration order.
    pub registrations: Vec<MemberRecord>,
}

impl Event {
    /// Index of the registration whose name matches `name`, ignoring case and surrounding whitespace.
    pub fn find_registration(&self, name: &str) -> Option<usize> {
        let name = name.trim();
        self.registrations
            .iter()
            .position(|r| r.name.trim().eq_ignore_ascii_case(name))
    }
}

/// History line for an event opened in a chat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventSummary {
    pub id: u64,
    pub description: String,
    pub opened_at: DateTime<Utc>,
}

impl From<&Event> for EventSummary {
    fn from(event: &Event) -> Self {
        Self {
            id: event.id,
            description: event.description.clone(),
            opened_at: event.opened_at,
        }
    }
}
