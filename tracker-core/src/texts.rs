//! User-facing notice texts.

pub const ADMIN_REQUIRED: &str = "You must be a chat administrator to run this command.";
pub const REPLY_TOO_LATE: &str =
    "The time to answer has run out. Please run the command again.";

pub const ASK_EVENT_DESCRIPTION: &str = "Enter a description of the planned event:";
pub const EVENT_ALREADY_EXISTS: &str =
    "This chat already has an active event. Close it before creating a new one.";
pub const NO_ACTIVE_EVENT: &str = "This chat has no active event.";
pub const CONFIRM_CLOSE: &str = "Close the current event? Registration will end.";
pub const CLOSE_CANCELLED: &str = "Closing cancelled. The event stays open.";
pub const ANSWER_RECEIVED: &str = "Answer received.";

pub const ASK_PARTICIPANT_NAME: &str = "Enter the participant's name:";
pub const ASK_PARTICIPANT_LICENSE: &str = "Enter the participant's license number:";
pub const EMPTY_ANSWER: &str = "The answer was empty. Please run the command again.";

pub const YES: &str = "YES";
pub const NO: &str = "NO";

pub const HELP: &str = "\
/open - Create an event (chat admins only)
/close - Close registration for the event (chat admins only)
/show - Show the current event and its registered participants
/history - Show the events held in this chat
/register - Register a participant for the current event
/unregister - Cancel a registration
/whoami - Show your membership status in this chat
/help - Show this list";

/// Confirmation sent after `/open` succeeded.
pub fn event_created(event_id: u64) -> String {
    format!("Event #{} created.", event_id)
}

/// Confirmation sent after `/close` succeeded.
pub fn event_closed(event_id: u64, participants: usize) -> String {
    format!("Event #{} closed with {} participant(s).", event_id, participants)
}

pub fn registered(name: &str, count: usize) -> String {
    format!("{} is registered. Participants: {}.", name, count)
}

pub fn already_registered(name: &str) -> String {
    format!("{} is already registered.", name)
}

pub fn unregistered(name: &str) -> String {
    format!("Registration of {} cancelled.", name)
}

pub fn not_registered(name: &str) -> String {
    format!("{} is not registered.", name)
}
