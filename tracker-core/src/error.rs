//! Error types for the bot core.
//!
//! [`TrackerError`] is the top-level error; [`HandlerError`] covers command and event-state failures.

use thiserror::Error;

/// Top-level error: transport, protocol, reply correlation, handler, config, IO.
#[derive(Error, Debug)]
pub enum TrackerError {
    /// Network or decode failure talking to the backend.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The backend answered but reported failure; carries its description.
    #[error("Protocol error: {0}")]
    Protocol(String),

    #[error("No reply to message {message_id} before the timeout")]
    ReplyTimeout { message_id: i32 },

    #[error("A reply to message {0} is already awaited")]
    DuplicateWait(i32),

    #[error("Handler error: {0}")]
    Handler(#[from] HandlerError),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl TrackerError {
    /// True for [`TrackerError::ReplyTimeout`]; handlers branch on this to tell the user.
    pub fn is_timeout(&self) -> bool {
        matches!(self, TrackerError::ReplyTimeout { .. })
    }
}

/// Errors produced by handlers and the event registry.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum HandlerError {
    #[error("An event is already active in this chat")]
    EventAlreadyExists,

    #[error("No active event in this chat")]
    NoActiveEvent,

    #[error("{0} is already registered")]
    AlreadyRegistered(String),

    #[error("{0} is not registered")]
    NotRegistered(String),

    #[error("Empty answer")]
    EmptyAnswer,
}

/// Result type for core operations; uses [`TrackerError`].
pub type Result<T> = std::result::Result<T, TrackerError>;
