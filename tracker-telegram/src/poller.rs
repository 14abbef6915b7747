//! Long-poll ingestion: fetch a batch from the cursor, start one task per update, advance the cursor.

use std::any::Any;
use std::sync::Arc;
use std::time::Duration;

use dispatch::Dispatcher;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, instrument, warn};
use tracker_core::{Bot, TrackerError, Update};

/// Batch size, long-poll timeout and pause between cycles.
#[derive(Debug, Clone)]
pub struct PollerConfig {
    pub limit: u8,
    pub long_poll_timeout: Duration,
    pub interval: Duration,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            limit: 10,
            long_poll_timeout: Duration::from_secs(15),
            interval: Duration::from_secs(2),
        }
    }
}

/// Sees the outcome of every update task the poller started.
pub trait TaskObserver: Send + Sync {
    /// The dispatcher returned an error for `update_id`.
    fn on_error(&self, update_id: i32, error: &TrackerError);

    /// The task for `update_id` panicked.
    fn on_panic(&self, update_id: i32, message: &str);
}

/// Default observer: logs failures.
pub struct LoggingObserver;

impl TaskObserver for LoggingObserver {
    fn on_error(&self, update_id: i32, error: &TrackerError) {
        error!(update_id, error = %error, "Update handling failed");
    }

    fn on_panic(&self, update_id: i32, message: &str) {
        error!(update_id, panic = %message, "Update task panicked");
    }
}

/// Owns the update cursor. Only the polling loop touches it.
pub struct UpdatePoller {
    bot: Arc<dyn Bot>,
    cursor: i32,
    config: PollerConfig,
}

impl UpdatePoller {
    pub fn new(bot: Arc<dyn Bot>, config: PollerConfig) -> Self {
        Self {
            bot,
            cursor: 0,
            config,
        }
    }

    /// Next update id to request.
    pub fn cursor(&self) -> i32 {
        self.cursor
    }

    pub fn config(&self) -> &PollerConfig {
        &self.config
    }

    /// Fetches one batch starting at the cursor. A failed fetch is logged and yields an empty batch.
    pub async fn poll(&self) -> Vec<Update> {
        match self
            .bot
            .fetch_updates(self.cursor, self.config.limit, self.config.long_poll_timeout)
            .await
        {
            Ok(updates) => updates,
            Err(e) => {
                warn!(error = %e, cursor = self.cursor, "Fetching updates failed");
                Vec::new()
            }
        }
    }

    /// Moves the cursor past the last update of `batch`. An empty batch leaves it alone.
    pub fn advance(&mut self, batch: &[Update]) {
        if let Some(last) = batch.last() {
            self.cursor = last.id + 1;
        }
    }

    /// One cycle: fetch, start a task per update in batch order, then advance the cursor.
    /// Returns the number of tasks started. Never waits for the tasks themselves.
    #[instrument(skip(self, dispatcher, observer), fields(cursor = self.cursor))]
    pub async fn poll_once(
        &mut self,
        dispatcher: &Arc<Dispatcher>,
        observer: &Arc<dyn TaskObserver>,
    ) -> usize {
        let batch = self.poll().await;
        if batch.is_empty() {
            return 0;
        }
        debug!(count = batch.len(), "Received updates");

        for update in batch.iter().cloned() {
            spawn_update(dispatcher.clone(), observer.clone(), update);
        }
        self.advance(&batch);
        batch.len()
    }
}

/// Starts the routing task for `update` plus a supervisor that reports its outcome to `observer`.
/// The returned handle belongs to the supervisor.
pub fn spawn_update(
    dispatcher: Arc<Dispatcher>,
    observer: Arc<dyn TaskObserver>,
    update: Update,
) -> JoinHandle<()> {
    let update_id = update.id;
    let task = tokio::spawn(async move { dispatcher.route(update).await });
    tokio::spawn(async move {
        match task.await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => observer.on_error(update_id, &e),
            Err(join_err) if join_err.is_panic() => {
                let payload = join_err.into_panic();
                observer.on_panic(update_id, &panic_message(payload.as_ref()));
            }
            Err(_) => debug!(update_id, "Update task cancelled"),
        }
    })
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Polls forever, sleeping `interval` between cycles. Stop it by dropping the future.
///
/// Delivery is at-most-once: the cursor moves past a batch as soon as its tasks have been started,
/// so an update whose handler later fails or panics is never fetched again. Handlers run
/// concurrently and may finish in any order.
pub async fn run_polling(
    mut poller: UpdatePoller,
    dispatcher: Arc<Dispatcher>,
    observer: Arc<dyn TaskObserver>,
) {
    info!(
        bot_name = %dispatcher.bot_name(),
        limit = poller.config.limit,
        "Polling started"
    );
    loop {
        poller.poll_once(&dispatcher, &observer).await;
        tokio::time::sleep(poller.config.interval).await;
    }
}
