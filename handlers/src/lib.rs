//! # Handlers for the drift tracker bot
//!
//! Command handlers plus the two services they share: [`AdminGate`] (creator/administrator
//! check) and [`Dialog`] (ask a question and block until the answer arrives).

mod auth;
mod dialog;
mod event;
mod info;
mod notice;
mod registration;

#[cfg(test)]
mod test;

pub use auth::AdminGate;
pub use dialog::{Confirmation, Dialog};
pub use event::{format_event, CloseEventHandler, HistoryHandler, OpenEventHandler, ShowEventHandler};
pub use info::{HelpHandler, WhoAmIHandler};
pub use registration::{RegisterHandler, UnregisterHandler};
