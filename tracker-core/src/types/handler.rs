//! Handler trait and transport conversion traits.

use async_trait::async_trait;

use super::{
    message::{Message, Update},
    response::HandlerResponse,
    user::User,
};

/// Converts a transport-specific user type to core [`User`].
pub trait ToCoreUser: Send + Sync {
    fn to_core(&self) -> User;
}

/// Converts a transport-specific message type to core [`Message`].
pub trait ToCoreMessage: Send + Sync {
    fn to_core(&self) -> Message;
}

/// Converts a transport-specific update type to core [`Update`].
/// `None` when the update cannot be represented, e.g. its id does not fit the `i32` cursor.
pub trait ToCoreUpdate: Send + Sync {
    fn to_core(&self) -> Option<Update>;
}

/// One slash-command. The dispatcher runs `before`, and only if it returns true, `handle`.
#[async_trait]
pub trait Handler: Send + Sync {
    /// Gate run before `handle`, e.g. an admin check. Returning false stops the command;
    /// the gate is responsible for telling the user why.
    async fn before(&self, _message: &Message) -> crate::error::Result<bool> {
        Ok(true)
    }
    /// Runs the command.
    async fn handle(&self, message: &Message) -> crate::error::Result<HandlerResponse>;
}
