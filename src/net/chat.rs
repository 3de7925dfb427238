//! Realtime chat client: one STOMP-over-WebSocket connection per open room.
//!
//! `ChatConnection` owns the transport for exactly one mounted chat room
//! view: opened on mount, closed on every exit path, idempotently. There is
//! no reconnect loop: a dropped transport flips the session to
//! `Disconnected` and the room must be reopened.
//!
//! Frame handling is split in two: `handle_frame` is a pure transition on
//! `ChatSessionState` (exercised by the sibling test module), while the
//! socket plumbing is gated behind `hydrate` like the rest of the browser
//! code.

#[cfg(test)]
#[path = "chat_test.rs"]
mod chat_test;

use crate::net::stomp::{self, StompFrame};
use crate::net::types::{TranslatedMessage, WireMessage};
use crate::state::chat_session::{ChatSessionState, ConnectionStatus};

/// Subscription id prefix for the per-user translation queue; the epoch is
/// appended so late frames can be matched back to the subscription that
/// requested them.
const TRANSLATION_SUBSCRIPTION_PREFIX: &str = "translate-";

/// Subscription id for the translation queue at a given epoch.
pub fn translation_subscription_id(epoch: u64) -> String {
    format!("{TRANSLATION_SUBSCRIPTION_PREFIX}{epoch}")
}

/// Recover the epoch from a translation subscription id.
pub fn translation_epoch(subscription_id: &str) -> Option<u64> {
    subscription_id
        .strip_prefix(TRANSLATION_SUBSCRIPTION_PREFIX)?
        .parse()
        .ok()
}

/// Apply one inbound STOMP frame to the session.
///
/// Returns a frame to send back, if the protocol calls for one (the room
/// subscription right after `CONNECTED`). Malformed bodies are dropped
/// without touching session state.
pub fn handle_frame(
    session: &mut ChatSessionState,
    my_id: i64,
    room_subscription: &str,
    frame: &StompFrame,
) -> Option<StompFrame> {
    match frame.command.as_str() {
        "CONNECTED" => {
            session.connection_status = ConnectionStatus::Connected;
            session.error = None;
            Some(stomp::subscribe_room(room_subscription, session.room_id))
        }
        "MESSAGE" => {
            let subscription = frame.header("subscription").unwrap_or_default();
            if subscription == room_subscription {
                match serde_json::from_str::<WireMessage>(&frame.body) {
                    Ok(wire) => session.apply_inbound(wire, my_id),
                    Err(e) => leptos::logging::warn!("dropping malformed chat frame: {e}"),
                }
            } else if let Some(epoch) = translation_epoch(subscription) {
                match serde_json::from_str::<Vec<TranslatedMessage>>(&frame.body) {
                    Ok(translations) => session.apply_translations(epoch, &translations),
                    Err(e) => leptos::logging::warn!("dropping malformed translation frame: {e}"),
                }
            }
            None
        }
        "ERROR" => {
            leptos::logging::warn!(
                "chat broker error: {}",
                frame.header("message").unwrap_or(&frame.body)
            );
            session.connection_status = ConnectionStatus::Disconnected;
            None
        }
        // Heartbeats and unknown server frames.
        _ => None,
    }
}

/// Handle to the realtime connection of one chat room.
///
/// The default value is a closed handle; `send_frame` on it is a no-op
/// returning `false`, and `close` does nothing.
#[derive(Clone, Default)]
pub struct ChatConnection {
    #[cfg(feature = "hydrate")]
    inner: Option<Inner>,
}

#[cfg(feature = "hydrate")]
#[derive(Clone)]
struct Inner {
    tx: futures::channel::mpsc::UnboundedSender<String>,
    alive: std::sync::Arc<std::sync::atomic::AtomicBool>,
    room_subscription: String,
}

impl ChatConnection {
    /// Whether this handle refers to a connection that has not been closed.
    pub fn is_open(&self) -> bool {
        #[cfg(feature = "hydrate")]
        {
            self.inner
                .as_ref()
                .is_some_and(|i| i.alive.load(std::sync::atomic::Ordering::SeqCst))
        }
        #[cfg(not(feature = "hydrate"))]
        {
            false
        }
    }

    /// Queue a frame for the transport. Returns `false` when the connection
    /// is closed (the frame is dropped).
    pub fn send_frame(&self, frame: &StompFrame) -> bool {
        #[cfg(feature = "hydrate")]
        {
            let Some(inner) = &self.inner else {
                return false;
            };
            if !inner.alive.load(std::sync::atomic::Ordering::SeqCst) {
                return false;
            }
            inner.tx.unbounded_send(frame.serialize()).is_ok()
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = frame;
            false
        }
    }

    /// Tear the connection down: unsubscribe, disconnect, release the
    /// channel. Safe to call any number of times; callbacks still in
    /// flight observe the cleared liveness flag and mutate nothing.
    pub fn close(&self) {
        #[cfg(feature = "hydrate")]
        {
            let Some(inner) = &self.inner else {
                return;
            };
            if !inner.alive.swap(false, std::sync::atomic::Ordering::SeqCst) {
                return;
            }
            let _ = inner
                .tx
                .unbounded_send(stomp::unsubscribe(&inner.room_subscription).serialize());
            let _ = inner.tx.unbounded_send(stomp::disconnect().serialize());
            inner.tx.close_channel();
        }
    }
}

/// ISO-8601 timestamp for optimistic local messages.
pub fn now_iso() -> String {
    #[cfg(feature = "hydrate")]
    {
        js_sys::Date::new_0()
            .to_iso_string()
            .as_string()
            .unwrap_or_default()
    }
    #[cfg(not(feature = "hydrate"))]
    {
        String::new()
    }
}

/// Open the transport for a room and drive it until either side drops.
///
/// The caller must have closed any prior connection for this room view
/// first; exactly one connection is live per mounted room.
#[cfg(feature = "hydrate")]
pub fn open(
    identity: &crate::util::session_store::Identity,
    session: leptos::prelude::RwSignal<ChatSessionState>,
) -> ChatConnection {
    use futures::channel::mpsc;

    let (tx, rx) = mpsc::unbounded::<String>();
    let alive = std::sync::Arc::new(std::sync::atomic::AtomicBool::new(true));
    let room_subscription = format!("room-{}", uuid::Uuid::new_v4());

    let connection = ChatConnection {
        inner: Some(Inner {
            tx: tx.clone(),
            alive: alive.clone(),
            room_subscription: room_subscription.clone(),
        }),
    };

    leptos::task::spawn_local(run_connection(
        identity.user_id,
        identity.access_token.clone(),
        room_subscription,
        session,
        tx,
        rx,
        alive,
    ));

    connection
}

/// Connect, perform the STOMP handshake, and pump frames until disconnect.
#[cfg(feature = "hydrate")]
async fn run_connection(
    user_id: i64,
    access_token: String,
    room_subscription: String,
    session: leptos::prelude::RwSignal<ChatSessionState>,
    tx: futures::channel::mpsc::UnboundedSender<String>,
    rx: futures::channel::mpsc::UnboundedReceiver<String>,
    alive: std::sync::Arc<std::sync::atomic::AtomicBool>,
) {
    use futures::{SinkExt, StreamExt};
    use gloo_net::websocket::Message;
    use gloo_net::websocket::futures::WebSocket;
    use leptos::prelude::Update;
    use std::sync::atomic::Ordering;

    session.update(|s| s.connection_status = ConnectionStatus::Connecting);

    let url = format!(
        "{}?userId={user_id}&accessToken={access_token}",
        crate::config::CHAT_URL
    );
    let ws = match WebSocket::open(&url) {
        Ok(ws) => ws,
        Err(e) => {
            leptos::logging::warn!("chat connect failed: {e}");
            if alive.load(Ordering::SeqCst) {
                session.update(|s| s.connection_status = ConnectionStatus::Disconnected);
            }
            return;
        }
    };
    let (mut ws_write, mut ws_read) = ws.split();

    if ws_write
        .send(Message::Text(stomp::connect(user_id, &access_token).serialize()))
        .await
        .is_err()
    {
        if alive.load(Ordering::SeqCst) {
            session.update(|s| s.connection_status = ConnectionStatus::Disconnected);
        }
        return;
    }

    // Forward queued outbound frames to the socket.
    let mut rx = rx;
    let send_task = async {
        while let Some(raw) = rx.next().await {
            if ws_write.send(Message::Text(raw)).await.is_err() {
                break;
            }
        }
    };

    // Receive loop: short-circuit once the view has torn the session down.
    let recv_task = async {
        while let Some(msg) = ws_read.next().await {
            if !alive.load(Ordering::SeqCst) {
                break;
            }
            match msg {
                Ok(Message::Text(text)) => match StompFrame::parse(&text) {
                    Ok(frame) => {
                        let reply = session
                            .try_update(|s| handle_frame(s, user_id, &room_subscription, &frame))
                            .flatten();
                        if let Some(reply) = reply {
                            let _ = tx.unbounded_send(reply.serialize());
                        }
                    }
                    Err(e) => leptos::logging::warn!("unparseable chat frame: {e}"),
                },
                Ok(Message::Bytes(_)) => {}
                Err(e) => {
                    leptos::logging::warn!("chat recv error: {e}");
                    break;
                }
            }
        }
    };

    futures::future::select(Box::pin(send_task), Box::pin(recv_task)).await;

    if alive.load(Ordering::SeqCst) {
        session.update(|s| s.connection_status = ConnectionStatus::Disconnected);
    }
}
