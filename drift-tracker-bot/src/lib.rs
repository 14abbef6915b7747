//! # drift-tracker-bot
//!
//! Wires the drift tracker together: loads [`BotConfig`], builds the Telegram adapter, reply hub,
//! event registry and command table, then runs the polling loop until Ctrl-C.

mod cli;
mod components;
mod config;
mod runner;

pub use cli::{Cli, Commands};
pub use components::{build_command_table, build_components, resolve_bot_name, BotComponents};
pub use config::{BotConfig, DEFAULT_LOG_FILE};
pub use runner::{run_bot, run_until};
