//! # Dispatch
//!
//! Classifies each incoming update and routes it: replies go to the [`reply_hub::ReplyHub`],
//! slash-commands go to the [`Handler`](tracker_core::Handler) registered for them in a
//! [`CommandTable`]. Unknown commands and commands addressed to another bot are dropped silently.

mod command;
mod dispatcher;

pub use command::{command_token, CommandTable};
pub use dispatcher::Dispatcher;
