//! Chat room page.
//!
//! Owns the realtime connection for one room: backlog fetch, STOMP
//! connect/subscribe, optimistic sends, and the translation subscription.
//! The connection is opened when the route mounts (or the room id changes)
//! and closed on every exit path via `on_cleanup`; session transitions
//! themselves live in `state::chat_session`.

#[cfg(test)]
#[path = "chat_room_test.rs"]
mod chat_room_test;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_navigate, use_params_map, use_query_map};

use crate::net::api;
use crate::net::chat::{self, ChatConnection};
use crate::net::error::ClientError;
use crate::net::stomp;
use crate::state::auth::AuthState;
use crate::state::chat_session::{
    ChatSessionState, ConnectionStatus, Delivery, TargetLanguage,
};
use crate::util::session_store::Identity;

/// Load the backlog and bring up the room's transport.
///
/// `alive` is this open's generation guard: the view clears it when the
/// room changes or unmounts, and a task that resumes after that writes
/// nothing and opens nothing. A backlog failure is shown but does not
/// prevent the realtime connect, matching the server's behavior of
/// replaying nothing on subscribe.
async fn open_room(
    room_id: i64,
    identity: Identity,
    alive: Arc<AtomicBool>,
    session: RwSignal<ChatSessionState>,
    conn: RwSignal<ChatConnection>,
) {
    let backlog = api::fetch_chat_history(&identity.access_token, room_id).await;
    // The view may have moved on while the fetch was in flight.
    if !alive.load(Ordering::SeqCst) {
        return;
    }
    match backlog {
        Ok(history) => {
            session.try_update(|s| s.load_backlog(history, identity.user_id));
        }
        Err(e) => {
            leptos::logging::warn!("backlog fetch for room {room_id} failed: {e}");
            session.try_update(|s| {
                s.loading = false;
                s.error = Some("Failed to load messages".to_owned());
            });
        }
    }

    #[cfg(feature = "hydrate")]
    {
        conn.get_untracked().close();
        conn.set(chat::open(&identity, session));
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = conn;
    }
}

/// Chat room page.
#[component]
pub fn ChatRoomPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let params = use_params_map();
    let query = use_query_map();
    let navigate = use_navigate();

    let session = RwSignal::new(ChatSessionState::new(0));
    let conn = RwSignal::new(ChatConnection::default());
    let input = RwSignal::new(String::new());
    let show_congrats = RwSignal::new(true);
    let language_menu_open = RwSignal::new(false);

    let room_id = move || params.read().get("id").and_then(|raw| raw.parse::<i64>().ok());

    // Redirect to login if not authenticated.
    {
        let navigate = navigate.clone();
        Effect::new(move || {
            let state = auth.get();
            if !state.loading && state.identity.is_none() {
                navigate("/login", NavigateOptions::default());
            }
        });
    }

    // Open the session once per room id; reopening tears the previous
    // connection down first. `open_guard` holds the liveness flag of the
    // in-flight `open_room` task so a room change or unmount can cancel it.
    let last_room = RwSignal::new(None::<i64>);
    let open_guard = RwSignal::new(None::<Arc<AtomicBool>>);
    Effect::new(move || {
        let Some(id) = room_id() else {
            return;
        };
        let state = auth.get();
        if state.loading {
            return;
        }
        let Some(identity) = state.identity else {
            session.update(|s| {
                s.loading = false;
                s.error = Some(ClientError::AuthMissing.to_string());
            });
            return;
        };
        if last_room.get_untracked() == Some(id) {
            return;
        }
        last_room.set(Some(id));

        if let Some(stale) = open_guard.get_untracked() {
            stale.store(false, Ordering::SeqCst);
        }
        let alive = Arc::new(AtomicBool::new(true));
        open_guard.set(Some(alive.clone()));

        conn.get_untracked().close();
        session.set(ChatSessionState::new(id));
        leptos::task::spawn_local(open_room(id, identity, alive, session, conn));
    });

    on_cleanup(move || {
        if let Some(stale) = open_guard.get_untracked() {
            stale.store(false, Ordering::SeqCst);
        }
        conn.get_untracked().close();
    });

    // Prefill the input with a quick message carried over from the match
    // modal, once.
    let greet_applied = RwSignal::new(false);
    Effect::new(move || {
        if greet_applied.get_untracked() {
            return;
        }
        if let Some(greet) = query.read().get("greet") {
            if !greet.is_empty() {
                input.set(greet);
            }
        }
        greet_applied.set(true);
    });

    // The congratulations banner dismisses itself after a few seconds.
    Effect::new(move || {
        #[cfg(feature = "hydrate")]
        {
            leptos::task::spawn_local(async move {
                gloo_timers::future::sleep(std::time::Duration::from_secs(3)).await;
                show_congrats.set(false);
            });
        }
    });

    let do_send = move || {
        let Some(identity) = auth.with_untracked(|a| a.identity.clone()) else {
            return;
        };
        let text = input.get_untracked();
        let staged = session
            .try_update(|s| s.stage_outgoing(&text, identity.user_id, chat::now_iso()))
            .flatten();
        // Not connected, no counterpart, or blank input: silently ignore.
        let Some(wire) = staged else {
            return;
        };
        input.set(String::new());

        let body = serde_json::json!({
            "content": wire.content,
            "senderId": wire.sender_id,
            "sendedId": wire.recipient_id,
            "chatRoomId": wire.chat_room_id,
            "createdAt": wire.created_at,
        })
        .to_string();
        let frame = stomp::send_chat(wire.chat_room_id, &identity.access_token, body);
        if !conn.get_untracked().send_frame(&frame) {
            session.update(|s| s.mark_send_failed(wire.id));
        }
    };

    let toggle_translation = move |_| {
        let Some(identity) = auth.with_untracked(|a| a.identity.clone()) else {
            return;
        };
        if session.with_untracked(|s| s.translation_enabled) {
            let epoch = session.with_untracked(|s| s.translation_epoch);
            conn.get_untracked()
                .send_frame(&stomp::unsubscribe(&chat::translation_subscription_id(epoch)));
            session.update(ChatSessionState::disable_translation);
            language_menu_open.set(false);
        } else {
            let Some((epoch, ids, language)) = session.try_update(|s| {
                let epoch = s.enable_translation();
                (epoch, s.foreign_message_ids(), s.target_language)
            }) else {
                return;
            };
            conn.get_untracked().send_frame(&stomp::subscribe_translation(
                &chat::translation_subscription_id(epoch),
                identity.user_id,
                language.code(),
                &ids,
            ));
        }
    };

    let change_language = move |language: TargetLanguage| {
        language_menu_open.set(false);
        let Some(identity) = auth.with_untracked(|a| a.identity.clone()) else {
            return;
        };
        let old_epoch = session.with_untracked(|s| s.translation_epoch);
        let Some(resubscribe) = session.try_update(|s| {
            s.set_language(language)
                .map(|epoch| (epoch, s.foreign_message_ids()))
        }) else {
            return;
        };
        // Only an active translation carries a subscription to replace.
        if let Some((epoch, ids)) = resubscribe {
            let conn = conn.get_untracked();
            conn.send_frame(&stomp::unsubscribe(&chat::translation_subscription_id(
                old_epoch,
            )));
            conn.send_frame(&stomp::subscribe_translation(
                &chat::translation_subscription_id(epoch),
                identity.user_id,
                language.code(),
                &ids,
            ));
        }
    };

    let on_back = move |_| {
        navigate("/chat", NavigateOptions::default());
    };

    let connected = move || session.get().connection_status == ConnectionStatus::Connected;

    view! {
        <div class="chat-room-page">
            <header class="chat-room-page__header">
                <div class="chat-room-page__header-left">
                    <button class="chat-room-page__back" on:click=on_back>
                        "<"
                    </button>
                    <span class="chat-room-page__title">"Contacto Manager"</span>
                </div>

                <div class="chat-room-page__translation">
                    <button
                        class="chat-room-page__translate-toggle"
                        class:chat-room-page__translate-toggle--on=move || {
                            session.get().translation_enabled
                        }
                        on:click=toggle_translation
                    >
                        {move || {
                            if session.get().translation_enabled {
                                "Translation: on"
                            } else {
                                "Translation: off"
                            }
                        }}
                    </button>

                    <Show when=move || session.get().translation_enabled>
                        <button
                            class="chat-room-page__language"
                            on:click=move |_| language_menu_open.update(|open| *open = !*open)
                        >
                            {move || session.get().target_language.code()}
                        </button>
                    </Show>

                    <Show when=move || language_menu_open.get()>
                        <div class="chat-room-page__language-menu">
                            {TargetLanguage::ALL
                                .into_iter()
                                .map(|language| {
                                    view! {
                                        <button
                                            class="chat-room-page__language-option"
                                            class:chat-room-page__language-option--selected=move || {
                                                session.get().target_language == language
                                            }
                                            on:click=move |_| change_language(language)
                                        >
                                            {language.code()}
                                        </button>
                                    }
                                })
                                .collect::<Vec<_>>()}
                        </div>
                    </Show>
                </div>
            </header>

            <Show when=move || {
                !connected() && !session.get().loading && session.get().error.is_none()
            }>
                <div class="chat-room-page__banner chat-room-page__banner--disconnected">
                    <strong>"Connection Error!"</strong>
                    " Unable to connect to the chat server. Please try again later."
                </div>
            </Show>

            {move || {
                session
                    .get()
                    .error
                    .map(|error| {
                        view! {
                            <div class="chat-room-page__banner chat-room-page__banner--error">
                                {error}
                            </div>
                        }
                    })
            }}

            {move || {
                let state = session.get();
                if state.loading {
                    return view! {
                        <div class="chat-room-page__notice">"Loading messages..."</div>
                    }
                        .into_any();
                }

                view! {
                    <div class="chat-room-page__messages">
                        <Show when=move || show_congrats.get()>
                            <div class="chat-room-page__congrats">
                                <p>"Congratulation!"</p>
                                <p>
                                    "WE THINK YOU BOTH HAVE A LOT IN COMMON." <br/>
                                    "FEEL FREE TO TALK COMFORTABLY."
                                </p>
                            </div>
                        </Show>

                        {state
                            .messages
                            .iter()
                            .map(|message| {
                                message_bubble(
                                    message.content.clone(),
                                    message.created_at.clone(),
                                    message.is_mine,
                                    state.translation_enabled,
                                    message.translated_content.clone(),
                                    message.delivery,
                                )
                            })
                            .collect::<Vec<_>>()}
                    </div>
                }
                    .into_any()
            }}

            <div class="chat-room-page__input-row">
                <input
                    class="chat-room-page__input"
                    type="text"
                    placeholder="Type a message..."
                    prop:value=move || input.get()
                    on:input=move |ev| input.set(event_target_value(&ev))
                    on:keydown=move |ev: leptos::ev::KeyboardEvent| {
                        if ev.key() == "Enter" && !ev.shift_key() {
                            ev.prevent_default();
                            do_send();
                        }
                    }
                />
                <button
                    class="btn btn--primary chat-room-page__send"
                    disabled=move || !connected() || input.get().trim().is_empty()
                    on:click=move |_| do_send()
                >
                    "Send"
                </button>
            </div>
        </div>
    }
}

/// Render one message bubble.
fn message_bubble(
    content: String,
    created_at: String,
    is_mine: bool,
    translation_enabled: bool,
    translated_content: Option<String>,
    delivery: Delivery,
) -> impl IntoView {
    let show_translation = translation_enabled && !is_mine;
    // ISO-8601 "YYYY-MM-DDTHH:MM:..." -> "HH:MM".
    let time = created_at.get(11..16).unwrap_or_default().to_owned();

    view! {
        <div
            class="chat-message"
            class:chat-message--mine=is_mine
            class:chat-message--pending=delivery == Delivery::Pending
        >
            <div class="chat-message__bubble">
                <p>{content}</p>
                {show_translation
                    .then(|| {
                        translated_content
                            .map(|translated| {
                                view! { <p class="chat-message__translated">{translated}</p> }
                            })
                    })
                    .flatten()}
            </div>
            <span class="chat-message__time">{time}</span>
            <Show when=move || delivery == Delivery::Failed>
                <span class="chat-message__failed">"Failed to send"</span>
            </Show>
        </div>
    }
}
