//! # tracker-core
//!
//! Core types and traits for the drift tracker bot: the transport-facing [`Bot`] trait, the command
//! [`Handler`] trait, update/message/user types, the error taxonomy and tracing initialization.
//! Transport-agnostic; used by reply-hub, event-registry, dispatch, handlers and tracker-telegram.

pub mod bot;
pub mod error;
pub mod logger;
#[cfg(feature = "test-util")]
pub mod mock;
pub mod texts;
pub mod types;

pub use bot::Bot;
pub use error::{HandlerError, Result, TrackerError};
pub use logger::{init_tracing, DEFAULT_LOG_FILTER};
pub use types::{
    Chat, Handler, HandlerResponse, MemberStatus, Message, ReplyMarkup, SentMessage, ToCoreMessage,
    ToCoreUpdate, ToCoreUser, Update, User,
};
