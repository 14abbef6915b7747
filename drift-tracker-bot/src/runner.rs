use std::future::Future;
use std::sync::Arc;

use anyhow::Result;
use tracing::{info, instrument};
use tracker_core::{init_tracing, Bot};
use tracker_telegram::{run_polling, LoggingObserver, TaskObserver, TelegramBotAdapter, UpdatePoller};

use crate::components::{build_components, resolve_bot_name};
use crate::config::BotConfig;

/// Main entry: validate config, init logging, build the Telegram adapter, then serve until Ctrl-C.
#[instrument(skip(config))]
pub async fn run_bot(config: BotConfig) -> Result<()> {
    config.validate()?;
    init_tracing(&config.log_file)?;

    let adapter = TelegramBotAdapter::from_config(&config.telegram, config.poll_timeout)?;
    let bot: Arc<dyn Bot> = Arc::new(adapter);

    run_until(bot, &config, async {
        // If the signal handler cannot be installed, run until killed.
        if tokio::signal::ctrl_c().await.is_err() {
            std::future::pending::<()>().await;
        }
    })
    .await
}

/// Resolves the bot's username, builds the components and polls until `shutdown` completes.
/// Handler tasks still in flight at shutdown are abandoned with the runtime.
pub async fn run_until<F>(bot: Arc<dyn Bot>, config: &BotConfig, shutdown: F) -> Result<()>
where
    F: Future<Output = ()>,
{
    let bot_name = resolve_bot_name(bot.as_ref()).await?;
    let components = build_components(bot.clone(), &bot_name, config.reply_timeout);
    let poller = UpdatePoller::new(bot, config.poller_config());
    let observer: Arc<dyn TaskObserver> = Arc::new(LoggingObserver);

    info!(bot_name = %bot_name, "Bot started successfully");

    tokio::select! {
        _ = run_polling(poller, components.dispatcher.clone(), observer) => {}
        _ = shutdown => {
            let pending_waits = components.reply_hub.pending_count().await;
            info!(pending_waits, "Shutting down");
        }
    }
    Ok(())
}
