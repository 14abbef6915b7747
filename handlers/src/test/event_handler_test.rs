//! Unit tests for /open, /close, /show and /history handlers.

use std::sync::Arc;

use event_registry::MemberRecord;
use tracker_core::{texts, Handler, HandlerResponse};

use super::support::{command, Env, ADMIN, CHAT};
use crate::{CloseEventHandler, HistoryHandler, OpenEventHandler, ShowEventHandler};

fn open_handler(env: &Env) -> Arc<OpenEventHandler> {
    Arc::new(OpenEventHandler::new(env.gate(), env.dialog(), env.registry.clone()))
}

fn close_handler(env: &Env) -> Arc<CloseEventHandler> {
    Arc::new(CloseEventHandler::new(env.gate(), env.dialog(), env.registry.clone()))
}

/// **Test: /open asks for a description and creates event #1.**
///
/// **Setup:** empty registry, admin sender.
/// **Action:** run handle, answer the description prompt with "Picnic".
/// **Expected:** Reply("Event #1 created."); event stored for the chat.
#[tokio::test]
async fn test_open_creates_event() {
    let env = Arc::new(Env::new());
    let handler = open_handler(&env);
    let task = tokio::spawn(async move { handler.handle(&command("/open", ADMIN)).await });

    let prompt = env.answer_prompt(ADMIN, 0, "Picnic").await;
    assert_eq!(prompt.text, texts::ASK_EVENT_DESCRIPTION);

    let response = task.await.unwrap().unwrap();
    assert_eq!(response, HandlerResponse::Reply(texts::event_created(1)));
    let event = env.registry.get(CHAT).await.unwrap();
    assert_eq!(event.id, 1);
    assert_eq!(event.description, "Picnic");
}

/// **Test: second /open on the same chat is rejected without asking anything.**
#[tokio::test]
async fn test_open_rejected_when_event_exists() {
    let env = Env::new();
    env.registry.open(CHAT, "Picnic").await.unwrap();

    let response = open_handler(&env)
        .handle(&command("/open", ADMIN))
        .await
        .unwrap();

    assert_eq!(
        response,
        HandlerResponse::Reply(texts::EVENT_ALREADY_EXISTS.to_string())
    );
    assert!(env.prompts_to(ADMIN).is_empty());
    assert_eq!(env.registry.get(CHAT).await.unwrap().description, "Picnic");
}

/// **Test: /open without an answer creates nothing and tells the user.**
#[tokio::test(start_paused = true)]
async fn test_open_timeout_creates_nothing() {
    let env = Env::new();
    let response = open_handler(&env)
        .handle(&command("/open", ADMIN))
        .await
        .unwrap();

    assert_eq!(response, HandlerResponse::Reply(texts::REPLY_TOO_LATE.to_string()));
    assert!(!env.registry.contains(CHAT).await);
    assert_eq!(env.hub.pending_count().await, 0);
}

/// **Test: an event opened by someone else during the dialog wins; ours is rejected.**
#[tokio::test]
async fn test_open_race_detected_after_answer() {
    let env = Arc::new(Env::new());
    let handler = open_handler(&env);
    let task = tokio::spawn(async move { handler.handle(&command("/open", ADMIN)).await });

    let prompt = env
        .bot
        .wait_for_sent(std::time::Duration::from_secs(5), |r| {
            r.text == texts::ASK_EVENT_DESCRIPTION
        })
        .await
        .unwrap();
    env.registry.open(CHAT, "Other").await.unwrap();
    while !env.hub.is_waiting(prompt.message_id).await {
        tokio::task::yield_now().await;
    }
    env.hub
        .deliver(
            prompt.message_id,
            super::support::answer("Picnic", ADMIN, prompt.message_id),
        )
        .await;

    let response = task.await.unwrap().unwrap();
    assert_eq!(
        response,
        HandlerResponse::Reply(texts::EVENT_ALREADY_EXISTS.to_string())
    );
    assert_eq!(env.registry.get(CHAT).await.unwrap().description, "Other");
}

/// **Test: /close with YES removes the event.**
#[tokio::test]
async fn test_close_yes_removes_event() {
    let env = Arc::new(Env::new());
    env.registry.open(CHAT, "Picnic").await.unwrap();
    let handler = close_handler(&env);
    let task = tokio::spawn(async move { handler.handle(&command("/close", ADMIN)).await });

    let prompt = env.answer_prompt(ADMIN, 0, "YES").await;
    assert_eq!(prompt.text, texts::CONFIRM_CLOSE);

    let response = task.await.unwrap().unwrap();
    assert_eq!(response, HandlerResponse::Reply(texts::event_closed(1, 0)));
    assert!(!env.registry.contains(CHAT).await);
}

/// **Test: /close with NO keeps the event.**
#[tokio::test]
async fn test_close_no_keeps_event() {
    let env = Arc::new(Env::new());
    env.registry.open(CHAT, "Picnic").await.unwrap();
    let handler = close_handler(&env);
    let task = tokio::spawn(async move { handler.handle(&command("/close", ADMIN)).await });

    env.answer_prompt(ADMIN, 0, "NO").await;

    let response = task.await.unwrap().unwrap();
    assert_eq!(response, HandlerResponse::Reply(texts::CLOSE_CANCELLED.to_string()));
    assert!(env.registry.contains(CHAT).await);
}

/// **Test: /close timing out is reported as cancellation and keeps the event.**
#[tokio::test(start_paused = true)]
async fn test_close_timeout_keeps_event() {
    let env = Env::new();
    env.registry.open(CHAT, "Picnic").await.unwrap();

    let response = close_handler(&env)
        .handle(&command("/close", ADMIN))
        .await
        .unwrap();

    assert_eq!(response, HandlerResponse::Reply(texts::CLOSE_CANCELLED.to_string()));
    assert!(env.registry.contains(CHAT).await);
}

#[tokio::test]
async fn test_close_without_event() {
    let env = Env::new();
    let response = close_handler(&env)
        .handle(&command("/close", ADMIN))
        .await
        .unwrap();
    assert_eq!(response, HandlerResponse::Reply(texts::NO_ACTIVE_EVENT.to_string()));
    assert!(env.prompts_to(ADMIN).is_empty());
}

#[tokio::test]
async fn test_show_lists_participants() {
    let env = Env::new();
    env.registry.open(CHAT, "Picnic").await.unwrap();
    env.registry
        .register(
            CHAT,
            MemberRecord {
                name: "Ann".to_string(),
                license: "RU-77".to_string(),
            },
        )
        .await
        .unwrap();

    let response = ShowEventHandler::new(env.registry.clone())
        .handle(&command("/show", ADMIN))
        .await
        .unwrap();

    assert_eq!(
        response,
        HandlerResponse::Reply("Event #1: Picnic\nParticipants (1):\n1. Ann (RU-77)".to_string())
    );
}

#[tokio::test]
async fn test_show_without_event() {
    let env = Env::new();
    let response = ShowEventHandler::new(env.registry.clone())
        .handle(&command("/show", ADMIN))
        .await
        .unwrap();
    assert_eq!(response, HandlerResponse::Reply(texts::NO_ACTIVE_EVENT.to_string()));
}

#[tokio::test]
async fn test_history_lists_events_in_order() {
    let env = Env::new();
    env.registry.open(CHAT, "First").await.unwrap();
    env.registry.close(CHAT).await.unwrap();
    env.registry.open(CHAT, "Second").await.unwrap();

    let response = HistoryHandler::new(env.registry.clone())
        .handle(&command("/history", ADMIN))
        .await
        .unwrap();

    let HandlerResponse::Reply(text) = response else {
        panic!("expected a reply");
    };
    let first = text.find("#1").unwrap();
    let second = text.find("#2").unwrap();
    assert!(first < second);
    assert!(text.contains("First"));
    assert!(text.contains("Second"));
}
