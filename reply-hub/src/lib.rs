//! # reply-hub
//!
//! Bridges the asynchronous reply channel of the transport to straight-line handler code.
//! A handler that asked a question registers a wait on the id of the message it sent, then
//! suspends in [`ReplyHub::wait`]. The dispatcher hands every incoming reply to
//! [`ReplyHub::deliver`], which wakes the matching waiter.
//!
//! Each wait resolves exactly once, by whichever comes first of a matching reply or the timeout,
//! and removes its own entry on resolution. A reply arriving after that finds nobody waiting.

use std::collections::HashMap;
use std::time::Duration;

use tokio::sync::{oneshot, Mutex};
use tracing::{debug, info, instrument, warn};
use tracker_core::{Message, Result, TrackerError};

/// How long a handler waits for an answer unless configured otherwise.
pub const DEFAULT_REPLY_TIMEOUT: Duration = Duration::from_secs(5 * 60);

struct PendingWait {
    generation: u64,
    sender: oneshot::Sender<Message>,
}

#[derive(Default)]
struct HubState {
    next_generation: u64,
    pending: HashMap<i32, PendingWait>,
}

/// Registry of message id → pending wait. Share it behind an `Arc`.
pub struct ReplyHub {
    state: Mutex<HubState>,
    timeout: Duration,
}

/// Single-use handle returned by [`ReplyHub::register_wait`]; consume it with [`ReplyHub::wait`].
#[derive(Debug)]
pub struct WaitHandle {
    message_id: i32,
    generation: u64,
    receiver: oneshot::Receiver<Message>,
}

impl WaitHandle {
    /// Id of the outgoing message this handle waits on.
    pub fn message_id(&self) -> i32 {
        self.message_id
    }
}

impl ReplyHub {
    /// Creates a hub whose waits give up after `timeout`.
    pub fn new(timeout: Duration) -> Self {
        Self {
            state: Mutex::new(HubState::default()),
            timeout,
        }
    }

    /// Timeout applied by [`ReplyHub::wait`].
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Registers a wait for replies to `message_id`.
    ///
    /// Fails with [`TrackerError::DuplicateWait`] if someone is already waiting on that id.
    /// A leftover entry whose handle was dropped unused is replaced.
    #[instrument(skip(self))]
    pub async fn register_wait(&self, message_id: i32) -> Result<WaitHandle> {
        let mut state = self.state.lock().await;
        if let Some(existing) = state.pending.get(&message_id) {
            if !existing.sender.is_closed() {
                warn!(message_id, "Wait already registered for message");
                return Err(TrackerError::DuplicateWait(message_id));
            }
            debug!(message_id, "Replacing abandoned wait");
        }

        state.next_generation += 1;
        let generation = state.next_generation;
        let (sender, receiver) = oneshot::channel();
        state
            .pending
            .insert(message_id, PendingWait { generation, sender });
        debug!(message_id, pending = state.pending.len(), "Wait registered");

        Ok(WaitHandle {
            message_id,
            generation,
            receiver,
        })
    }

    /// Suspends until a reply for the handle's message arrives or the hub timeout elapses.
    pub async fn wait(&self, handle: WaitHandle) -> Result<Message> {
        self.wait_timeout(handle, self.timeout).await
    }

    /// Like [`ReplyHub::wait`] with an explicit timeout.
    ///
    /// Returns [`TrackerError::ReplyTimeout`] when nothing arrived in time. The entry is removed on
    /// both paths.
    #[instrument(skip(self, handle), fields(message_id = handle.message_id))]
    pub async fn wait_timeout(&self, handle: WaitHandle, timeout: Duration) -> Result<Message> {
        let WaitHandle {
            message_id,
            generation,
            mut receiver,
        } = handle;

        let outcome = tokio::time::timeout(timeout, &mut receiver).await;
        self.forget(message_id, generation).await;

        match outcome {
            Ok(Ok(reply)) => {
                info!(message_id, "Reply received");
                Ok(reply)
            }
            // deliver() sends while holding the lock, so once forget() returned a reply is either
            // in the channel already or can no longer be sent.
            _ => match receiver.try_recv() {
                Ok(reply) => {
                    info!(message_id, "Reply received at timeout boundary");
                    Ok(reply)
                }
                Err(_) => {
                    info!(message_id, timeout_secs = timeout.as_secs(), "Reply timed out");
                    Err(TrackerError::ReplyTimeout { message_id })
                }
            },
        }
    }

    /// Hands `reply` to whoever waits on `reply_to_message_id`.
    ///
    /// Returns false if nobody is waiting (never asked, already answered, or timed out).
    #[instrument(skip(self, reply), fields(user_id = reply.user.id))]
    pub async fn deliver(&self, reply_to_message_id: i32, reply: Message) -> bool {
        let mut state = self.state.lock().await;
        let Some(waiter) = state.pending.remove(&reply_to_message_id) else {
            debug!(reply_to_message_id, "No wait registered for reply");
            return false;
        };
        let delivered = waiter.sender.send(reply).is_ok();
        debug!(reply_to_message_id, delivered, "Reply handed to waiter");
        delivered
    }

    /// True if a live wait is registered for `message_id`.
    pub async fn is_waiting(&self, message_id: i32) -> bool {
        self.state
            .lock()
            .await
            .pending
            .get(&message_id)
            .is_some_and(|w| !w.sender.is_closed())
    }

    /// Number of registered entries.
    pub async fn pending_count(&self) -> usize {
        self.state.lock().await.pending.len()
    }

    /// Removes the entry for `message_id` if it still belongs to the wait identified by `generation`.
    async fn forget(&self, message_id: i32, generation: u64) {
        let mut state = self.state.lock().await;
        if state
            .pending
            .get(&message_id)
            .is_some_and(|w| w.generation == generation)
        {
            state.pending.remove(&message_id);
        }
    }
}

impl Default for ReplyHub {
    fn default() -> Self {
        Self::new(DEFAULT_REPLY_TIMEOUT)
    }
}
