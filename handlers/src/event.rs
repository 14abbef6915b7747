//! Event lifecycle commands: `/open`, `/close`, `/show`, `/history`.

use std::fmt::Write as _;
use std::sync::Arc;

use async_trait::async_trait;
use event_registry::{Event, EventRegistry};
use tracing::{info, instrument};
use tracker_core::{texts, Handler, HandlerResponse, Message, Result};

use crate::auth::AdminGate;
use crate::dialog::{Confirmation, Dialog};
use crate::notice::notice_for;

/// `/open`: asks the admin for a description and opens a new event in the chat.
pub struct OpenEventHandler {
    gate: AdminGate,
    dialog: Dialog,
    registry: Arc<EventRegistry>,
}

impl OpenEventHandler {
    pub fn new(gate: AdminGate, dialog: Dialog, registry: Arc<EventRegistry>) -> Self {
        Self {
            gate,
            dialog,
            registry,
        }
    }
}

#[async_trait]
impl Handler for OpenEventHandler {
    async fn before(&self, message: &Message) -> Result<bool> {
        Ok(self.gate.require_admin(message).await)
    }

    #[instrument(skip(self, message), fields(user_id = message.user.id))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        let Some(chat_id) = message.chat_id() else {
            return Ok(HandlerResponse::Done);
        };
        if self.registry.contains(chat_id).await {
            info!(chat_id, "Open rejected, event already active");
            return Ok(HandlerResponse::Reply(texts::EVENT_ALREADY_EXISTS.to_string()));
        }

        let description = match self
            .dialog
            .ask_text(message.sender_id(), texts::ASK_EVENT_DESCRIPTION)
            .await
        {
            Ok(description) => description,
            Err(e) => return notice_for(e),
        };

        // Another admin may have opened one while we were waiting; open() re-checks atomically.
        match self.registry.open(chat_id, &description).await {
            Ok(event) => Ok(HandlerResponse::Reply(texts::event_created(event.id))),
            Err(e) => notice_for(e),
        }
    }
}

/// `/close`: after a YES/NO confirmation removes the chat's open event.
///
/// Pressing a reply-keyboard button sends a plain private message without `reply_to_message`,
/// so it never reaches the wait. The user has to reply to the confirmation prompt; otherwise
/// `/close` times out and reports a cancellation.
///
/// Closing only removes the event. Whether a closed event should be archived, or block further
/// registrations in some other way, is not decided yet.
pub struct CloseEventHandler {
    gate: AdminGate,
    dialog: Dialog,
    registry: Arc<EventRegistry>,
}

impl CloseEventHandler {
    pub fn new(gate: AdminGate, dialog: Dialog, registry: Arc<EventRegistry>) -> Self {
        Self {
            gate,
            dialog,
            registry,
        }
    }
}

#[async_trait]
impl Handler for CloseEventHandler {
    async fn before(&self, message: &Message) -> Result<bool> {
        Ok(self.gate.require_admin(message).await)
    }

    #[instrument(skip(self, message), fields(user_id = message.user.id))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        let Some(chat_id) = message.chat_id() else {
            return Ok(HandlerResponse::Done);
        };
        if !self.registry.contains(chat_id).await {
            return Ok(HandlerResponse::Reply(texts::NO_ACTIVE_EVENT.to_string()));
        }

        let confirmation = match self
            .dialog
            .confirm(message.sender_id(), texts::CONFIRM_CLOSE)
            .await
        {
            Ok(confirmation) => confirmation,
            Err(e) if e.is_timeout() => Confirmation::No,
            Err(e) => return Err(e),
        };

        if confirmation == Confirmation::No {
            info!(chat_id, "Close cancelled");
            return Ok(HandlerResponse::Reply(texts::CLOSE_CANCELLED.to_string()));
        }

        match self.registry.close(chat_id).await {
            Ok(event) => Ok(HandlerResponse::Reply(texts::event_closed(
                event.id,
                event.registrations.len(),
            ))),
            Err(e) => notice_for(e),
        }
    }
}

/// `/show`: the chat's open event and its participants.
pub struct ShowEventHandler {
    registry: Arc<EventRegistry>,
}

impl ShowEventHandler {
    pub fn new(registry: Arc<EventRegistry>) -> Self {
        Self { registry }
    }
}

/// Renders an event with its numbered participant list.
pub fn format_event(event: &Event) -> String {
    let mut out = format!("Event #{}: {}\n", event.id, event.description);
    if event.registrations.is_empty() {
        out.push_str("No participants yet.");
        return out;
    }
    let _ = write!(out, "Participants ({}):", event.registrations.len());
    for (i, record) in event.registrations.iter().enumerate() {
        let _ = write!(out, "\n{}. {} ({})", i + 1, record.name, record.license);
    }
    out
}

#[async_trait]
impl Handler for ShowEventHandler {
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        let Some(chat_id) = message.chat_id() else {
            return Ok(HandlerResponse::Done);
        };
        let text = match self.registry.get(chat_id).await {
            Some(event) => format_event(&event),
            None => texts::NO_ACTIVE_EVENT.to_string(),
        };
        Ok(HandlerResponse::Reply(text))
    }
}

/// `/history`: every event opened in the chat, oldest first.
pub struct HistoryHandler {
    registry: Arc<EventRegistry>,
}

impl HistoryHandler {
    pub fn new(registry: Arc<EventRegistry>) -> Self {
        Self { registry }
    }
}

#[async_trait]
impl Handler for HistoryHandler {
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        let Some(chat_id) = message.chat_id() else {
            return Ok(HandlerResponse::Done);
        };
        let history = self.registry.history(chat_id).await;
        if history.is_empty() {
            return Ok(HandlerResponse::Reply("No events have been held in this chat.".to_string()));
        }

        let mut out = String::from("Events:");
        for summary in &history {
            let _ = write!(
                out,
                "\n#{} {} {}",
                summary.id,
                summary.opened_at.format("%Y-%m-%d"),
                summary.description
            );
        }
        Ok(HandlerResponse::Reply(out))
    }
}
