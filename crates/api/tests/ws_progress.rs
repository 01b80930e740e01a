//! Tests for the connection registry and the progress forwarding loop.

use std::sync::Arc;
use std::time::Duration;

use axum::extract::ws::Message;
use tokio::sync::mpsc;
use tokio::time::timeout;

use oqim_api::progress::spawn_progress_forwarder;
use oqim_api::ws::WsManager;
use oqim_core::{JobKind, ProgressEvent};

const RECV_TIMEOUT: Duration = Duration::from_secs(2);

fn text(s: &str) -> Message {
    Message::Text(s.to_string().into())
}

async fn recv_json(rx: &mut mpsc::UnboundedReceiver<Message>) -> serde_json::Value {
    let message = timeout(RECV_TIMEOUT, rx.recv())
        .await
        .expect("timed out waiting for frame")
        .expect("channel closed");
    let Message::Text(body) = message else {
        panic!("expected a text frame, got {message:?}");
    };
    serde_json::from_str(&body).expect("valid JSON frame")
}

#[tokio::test]
async fn registry_starts_empty() {
    let manager = WsManager::new();
    assert_eq!(manager.connection_count().await, 0);
}

#[tokio::test]
async fn add_and_remove_track_connection_count() {
    let manager = WsManager::new();
    let _rx_a = manager.add("a".into()).await;
    let _rx_b = manager.add("b".into()).await;
    assert_eq!(manager.connection_count().await, 2);

    manager.remove("a").await;
    assert_eq!(manager.connection_count().await, 1);
}

#[tokio::test]
async fn removing_unknown_connection_is_a_noop() {
    let manager = WsManager::new();
    let _rx = manager.add("a".into()).await;
    manager.remove("ghost").await;
    assert_eq!(manager.connection_count().await, 1);
}

#[tokio::test]
async fn send_to_reaches_only_the_named_connection() {
    let manager = WsManager::new();
    let mut rx_a = manager.add("a".into()).await;
    let mut rx_b = manager.add("b".into()).await;

    assert!(manager.send_to("a", text("hello")).await);

    let received = timeout(RECV_TIMEOUT, rx_a.recv()).await.unwrap().unwrap();
    assert_eq!(received, text("hello"));
    assert!(rx_b.try_recv().is_err());
}

#[tokio::test]
async fn send_to_unknown_connection_reports_failure() {
    let manager = WsManager::new();
    assert!(!manager.send_to("ghost", text("hello")).await);
}

#[tokio::test]
async fn broadcast_reaches_every_connection() {
    let manager = WsManager::new();
    let mut rx_a = manager.add("a".into()).await;
    let mut rx_b = manager.add("b".into()).await;

    manager.broadcast(text("all")).await;

    assert_eq!(rx_a.recv().await.unwrap(), text("all"));
    assert_eq!(rx_b.recv().await.unwrap(), text("all"));
}

#[tokio::test]
async fn shutdown_sends_close_frames_and_clears_registry() {
    let manager = WsManager::new();
    let mut rx_a = manager.add("a".into()).await;
    let mut rx_b = manager.add("b".into()).await;

    manager.shutdown_all().await;

    assert!(matches!(rx_a.recv().await, Some(Message::Close(_))));
    assert!(matches!(rx_b.recv().await, Some(Message::Close(_))));
    assert_eq!(manager.connection_count().await, 0);
}

#[tokio::test]
async fn targeted_event_reaches_only_the_submitting_client() {
    let manager = Arc::new(WsManager::new());
    let mut rx_target = manager.add("conn-1".into()).await;
    let mut rx_other = manager.add("conn-2".into()).await;

    let (tx, rx) = mpsc::unbounded_channel();
    let handle = spawn_progress_forwarder(Arc::clone(&manager), rx);

    tx.send(ProgressEvent::new(JobKind::AudioToText, 40, "Transcribing").with_target("conn-1"))
        .unwrap();

    let frame = recv_json(&mut rx_target).await;
    assert_eq!(frame["type"], "progress");
    assert_eq!(frame["task"], "audio_to_text");
    assert_eq!(frame["progress"], 40);
    assert_eq!(frame["message"], "Transcribing");

    // The other client never sees the targeted event.
    drop(tx);
    timeout(RECV_TIMEOUT, handle).await.unwrap().unwrap();
    assert!(rx_other.try_recv().is_err());
}

#[tokio::test]
async fn untargeted_event_broadcasts_to_all_clients() {
    let manager = Arc::new(WsManager::new());
    let mut rx_a = manager.add("a".into()).await;
    let mut rx_b = manager.add("b".into()).await;

    let (tx, rx) = mpsc::unbounded_channel();
    let handle = spawn_progress_forwarder(Arc::clone(&manager), rx);

    tx.send(ProgressEvent::new(JobKind::UzbekLlm, 70, "Generating"))
        .unwrap();
    drop(tx);
    timeout(RECV_TIMEOUT, handle).await.unwrap().unwrap();

    for rx in [&mut rx_a, &mut rx_b] {
        let frame = recv_json(rx).await;
        assert_eq!(frame["task"], "uzbek_llm");
        assert_eq!(frame["progress"], 70);
    }
}

#[tokio::test]
async fn event_for_departed_client_is_dropped_quietly() {
    let manager = Arc::new(WsManager::new());
    let mut rx_other = manager.add("still-here".into()).await;

    let (tx, rx) = mpsc::unbounded_channel();
    let handle = spawn_progress_forwarder(Arc::clone(&manager), rx);

    tx.send(
        ProgressEvent::new(JobKind::TextToSpeech, 10, "Synthesizing").with_target("long-gone"),
    )
    .unwrap();
    drop(tx);

    // The forwarder keeps running past the failed delivery and exits
    // cleanly once the channel closes.
    timeout(RECV_TIMEOUT, handle).await.unwrap().unwrap();
    assert!(rx_other.try_recv().is_err());
}
