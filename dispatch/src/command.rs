//! Command table and command-token extraction.

use std::collections::HashMap;
use std::sync::Arc;

use tracker_core::Handler;

/// Extracts the command token from message text.
///
/// The token is the first whitespace-separated word. A `/cmd@name` suffix must name this bot
/// exactly, otherwise the message is meant for another bot and `None` is returned.
pub fn command_token<'a>(text: &'a str, bot_name: &str) -> Option<&'a str> {
    let word = text.split_whitespace().next()?;
    match word.split_once('@') {
        Some((command, addressee)) if addressee == bot_name => Some(command),
        Some(_) => None,
        None => Some(word),
    }
}

/// Maps command tokens (e.g. `/open`) to handlers.
#[derive(Clone, Default)]
pub struct CommandTable {
    handlers: HashMap<String, Arc<dyn Handler>>,
}

impl CommandTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `handler` for `command`; a later registration for the same command replaces it.
    pub fn add_command(mut self, command: &str, handler: Arc<dyn Handler>) -> Self {
        self.handlers.insert(command.to_string(), handler);
        self
    }

    /// Handler registered for `command`.
    pub fn get(&self, command: &str) -> Option<Arc<dyn Handler>> {
        self.handlers.get(command).cloned()
    }

    /// Registered command tokens, sorted.
    pub fn commands(&self) -> Vec<&str> {
        let mut commands: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        commands.sort_unstable();
        commands
    }
}
