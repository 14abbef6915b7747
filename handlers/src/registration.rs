//! Participant commands: `/register`, `/unregister`.

use std::sync::Arc;

use async_trait::async_trait;
use event_registry::{EventRegistry, MemberRecord};
use tracing::instrument;
use tracker_core::{texts, Handler, HandlerResponse, Message, Result};

use crate::dialog::Dialog;
use crate::notice::notice_for;

/// `/register`: asks for a participant's name and license and adds them to the open event.
pub struct RegisterHandler {
    dialog: Dialog,
    registry: Arc<EventRegistry>,
}

impl RegisterHandler {
    pub fn new(dialog: Dialog, registry: Arc<EventRegistry>) -> Self {
        Self { dialog, registry }
    }

    async fn collect(&self, user_id: i64) -> Result<MemberRecord> {
        let name = self
            .dialog
            .ask_text(user_id, texts::ASK_PARTICIPANT_NAME)
            .await?;
        let license = self
            .dialog
            .ask_text(user_id, texts::ASK_PARTICIPANT_LICENSE)
            .await?;
        Ok(MemberRecord { name, license })
    }
}

#[async_trait]
impl Handler for RegisterHandler {
    #[instrument(skip(self, message), fields(user_id = message.user.id))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        let Some(chat_id) = message.chat_id() else {
            return Ok(HandlerResponse::Done);
        };
        if !self.registry.contains(chat_id).await {
            return Ok(HandlerResponse::Reply(texts::NO_ACTIVE_EVENT.to_string()));
        }

        let record = match self.collect(message.sender_id()).await {
            Ok(record) => record,
            Err(e) => return notice_for(e),
        };
        let name = record.name.clone();
        match self.registry.register(chat_id, record).await {
            Ok(count) => Ok(HandlerResponse::Reply(texts::registered(&name, count))),
            Err(e) => notice_for(e),
        }
    }
}

/// `/unregister`: asks for a participant's name and removes their registration.
pub struct UnregisterHandler {
    dialog: Dialog,
    registry: Arc<EventRegistry>,
}

impl UnregisterHandler {
    pub fn new(dialog: Dialog, registry: Arc<EventRegistry>) -> Self {
        Self { dialog, registry }
    }
}

#[async_trait]
impl Handler for UnregisterHandler {
    #[instrument(skip(self, message), fields(user_id = message.user.id))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        let Some(chat_id) = message.chat_id() else {
            return Ok(HandlerResponse::Done);
        };
        if !self.registry.contains(chat_id).await {
            return Ok(HandlerResponse::Reply(texts::NO_ACTIVE_EVENT.to_string()));
        }

        let name = match self
            .dialog
            .ask_text(message.sender_id(), texts::ASK_PARTICIPANT_NAME)
            .await
        {
            Ok(name) => name,
            Err(e) => return notice_for(e),
        };
        match self.registry.unregister(chat_id, &name).await {
            Ok(record) => Ok(HandlerResponse::Reply(texts::unregistered(&record.name))),
            Err(e) => notice_for(e),
        }
    }
}
