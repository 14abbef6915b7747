//! Core types: user, chat, message, update, reply markup, member status, handler response and Handler trait.
//!
//! One file per main type.

mod chat;
mod handler;
mod markup;
mod member;
mod message;
mod response;
mod user;

pub use chat::Chat;
pub use handler::{Handler, ToCoreMessage, ToCoreUpdate, ToCoreUser};
pub use markup::ReplyMarkup;
pub use member::MemberStatus;
pub use message::{Message, SentMessage, Update};
pub use response::HandlerResponse;
pub use user::User;
