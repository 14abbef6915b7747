//! # tracker-telegram
//!
//! Telegram layer of the drift tracker bot: teloxide-to-core adapters, the [`tracker_core::Bot`]
//! implementation, minimal config, and the long-poll ingestion loop that hands every update to the
//! [`dispatch::Dispatcher`] in its own task. No event or command logic lives here.

mod adapters;
mod bot_adapter;
mod config;
mod poller;

pub use adapters::{TelegramMessageWrapper, TelegramUpdateWrapper, TelegramUserWrapper};
pub use bot_adapter::TelegramBotAdapter;
pub use config::TelegramConfig;
pub use poller::{run_polling, spawn_update, LoggingObserver, PollerConfig, TaskObserver, UpdatePoller};
