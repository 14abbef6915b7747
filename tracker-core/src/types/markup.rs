//! Reply markup attached to outgoing messages.

use serde::{Deserialize, Serialize};

/// Client-side UI hint sent with a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReplyMarkup {
    /// The client pre-addresses the user's next message as a reply to this one, enabling correlation.
    ForceReply,
    /// Custom reply keyboard, one inner vector per row of button labels.
    Keyboard(Vec<Vec<String>>),
    /// Hides a previously shown custom keyboard.
    RemoveKeyboard,
}

impl ReplyMarkup {
    /// One button per row, in the given order.
    pub fn single_column<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ReplyMarkup::Keyboard(labels.into_iter().map(|l| vec![l.into()]).collect())
    }
}
