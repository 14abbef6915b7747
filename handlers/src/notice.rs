//! Maps expected handler failures to the notice the user gets instead.

use tracing::info;
use tracker_core::{texts, HandlerError, HandlerResponse, Result, TrackerError};

/// Turns user-caused outcomes (timeout, empty answer, event state conflicts) into a private notice.
/// Transport and other failures are passed through for the task observer to log.
pub(crate) fn notice_for(err: TrackerError) -> Result<HandlerResponse> {
    let text = match &err {
        TrackerError::ReplyTimeout { message_id } => {
            info!(message_id, "User did not answer in time");
            texts::REPLY_TOO_LATE.to_string()
        }
        TrackerError::Handler(handler_err) => match handler_err {
            HandlerError::EmptyAnswer => texts::EMPTY_ANSWER.to_string(),
            HandlerError::NoActiveEvent => texts::NO_ACTIVE_EVENT.to_string(),
            HandlerError::EventAlreadyExists => texts::EVENT_ALREADY_EXISTS.to_string(),
            HandlerError::AlreadyRegistered(name) => texts::already_registered(name),
            HandlerError::NotRegistered(name) => texts::not_registered(name),
        },
        _ => return Err(err),
    };
    Ok(HandlerResponse::Reply(text))
}
