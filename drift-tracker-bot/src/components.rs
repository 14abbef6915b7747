//! Builds the shared services and the command table on top of any [`Bot`].

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use dispatch::{CommandTable, Dispatcher};
use event_registry::EventRegistry;
use handlers::{
    AdminGate, CloseEventHandler, Dialog, HelpHandler, HistoryHandler, OpenEventHandler,
    RegisterHandler, ShowEventHandler, UnregisterHandler, WhoAmIHandler,
};
use reply_hub::ReplyHub;
use tracing::{info, instrument};
use tracker_core::Bot;

/// Long-lived pieces shared by every update task.
#[derive(Clone)]
pub struct BotComponents {
    pub bot: Arc<dyn Bot>,
    pub reply_hub: Arc<ReplyHub>,
    pub registry: Arc<EventRegistry>,
    pub dispatcher: Arc<Dispatcher>,
}

/// Maps every supported command to its handler.
pub fn build_command_table(
    bot: Arc<dyn Bot>,
    reply_hub: Arc<ReplyHub>,
    registry: Arc<EventRegistry>,
) -> CommandTable {
    let gate = AdminGate::new(bot.clone());
    let dialog = Dialog::new(bot.clone(), reply_hub);

    CommandTable::new()
        .add_command(
            "/open",
            Arc::new(OpenEventHandler::new(
                gate.clone(),
                dialog.clone(),
                registry.clone(),
            )),
        )
        .add_command(
            "/close",
            Arc::new(CloseEventHandler::new(gate, dialog.clone(), registry.clone())),
        )
        .add_command("/show", Arc::new(ShowEventHandler::new(registry.clone())))
        .add_command("/history", Arc::new(HistoryHandler::new(registry.clone())))
        .add_command(
            "/register",
            Arc::new(RegisterHandler::new(dialog.clone(), registry.clone())),
        )
        .add_command(
            "/unregister",
            Arc::new(UnregisterHandler::new(dialog, registry)),
        )
        .add_command("/whoami", Arc::new(WhoAmIHandler::new(bot)))
        .add_command("/help", Arc::new(HelpHandler))
}

/// Builds hub, registry and dispatcher for a bot whose username is `bot_name`.
pub fn build_components(bot: Arc<dyn Bot>, bot_name: &str, reply_timeout: Duration) -> BotComponents {
    let reply_hub = Arc::new(ReplyHub::new(reply_timeout));
    let registry = Arc::new(EventRegistry::new());
    let commands = build_command_table(bot.clone(), reply_hub.clone(), registry.clone());
    info!(commands = ?commands.commands(), bot_name = %bot_name, "Command table ready");
    let dispatcher = Arc::new(Dispatcher::new(
        bot.clone(),
        reply_hub.clone(),
        commands,
        bot_name,
    ));
    BotComponents {
        bot,
        reply_hub,
        registry,
        dispatcher,
    }
}

/// Asks the backend who we are. The username is needed to filter `/cmd@OtherBot`.
#[instrument(skip(bot))]
pub async fn resolve_bot_name(bot: &dyn Bot) -> Result<String> {
    let me = bot.get_me().await.context("getMe failed")?;
    let name = me
        .username
        .context("Bot account has no username")?;
    info!(username = %name, "Bot username resolved");
    Ok(name)
}
