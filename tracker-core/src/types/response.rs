//! Result of a command handler.

/// What the dispatcher should do after a handler finished.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlerResponse {
    /// The handler already did everything it needed to.
    Done,
    /// Send this text privately to the user who issued the command.
    Reply(String),
}
