//! Chat list page showing the signed-in user's rooms.

use leptos::prelude::*;
use leptos_router::NavigateOptions;

use crate::components::bottom_nav::BottomNav;
use crate::net::api;
use crate::net::error::ClientError;
use crate::net::types::ChatRoomSummary;
use crate::state::auth::AuthState;

const ROOM_PAGE_SIZE: u32 = 10;

/// Chat list page. Paged room summaries with unread badges and the latest
/// message preview; each row opens its room.
#[component]
pub fn ChatListPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();

    // Redirect to login if not authenticated.
    let navigate = leptos_router::hooks::use_navigate();
    Effect::new(move || {
        let state = auth.get();
        if !state.loading && state.identity.is_none() {
            navigate("/login", NavigateOptions::default());
        }
    });

    let rooms = LocalResource::new(move || {
        let token = auth
            .get()
            .identity
            .map(|i| i.access_token)
            .ok_or(ClientError::AuthMissing);
        async move { api::fetch_chat_rooms(&token?, 0, ROOM_PAGE_SIZE).await }
    });

    view! {
        <div class="chat-list-page">
            <header class="chat-list-page__header">
                <h1>"Messages"</h1>
            </header>

            <div class="chat-list-page__rooms">
                <Suspense fallback=move || {
                    view! { <div class="chat-list-page__notice">"Loading..."</div> }
                }>
                    {move || {
                        rooms
                            .get()
                            .map(|result| match result {
                                Ok(list) if list.is_empty() => {
                                    view! {
                                        <div class="chat-list-page__empty">
                                            <p class="chat-list-page__empty-title">"Not Yet"</p>
                                            <p>
                                                "If we find first match," <br/>
                                                "We'll notice you on push."
                                            </p>
                                        </div>
                                    }
                                        .into_any()
                                }
                                Ok(list) => {
                                    list.into_iter()
                                        .map(|room| view! { <ChatRoomRow room=room/> })
                                        .collect::<Vec<_>>()
                                        .into_any()
                                }
                                Err(e) => {
                                    view! {
                                        <div class="chat-list-page__notice">
                                            {if e == ClientError::AuthMissing {
                                                e.to_string()
                                            } else {
                                                "Failed to load chat rooms".to_owned()
                                            }}
                                        </div>
                                    }
                                        .into_any()
                                }
                            })
                    }}
                </Suspense>
            </div>

            <BottomNav current_path="/chat"/>
        </div>
    }
}

/// One room row: thumbnail, unread badge, title, latest message preview.
#[component]
fn ChatRoomRow(room: ChatRoomSummary) -> impl IntoView {
    let navigate = leptos_router::hooks::use_navigate();
    let room_id = room.id;
    let thumbnail = room
        .chat_room_thumbnail
        .clone()
        .unwrap_or_else(|| "/placeholder.svg".to_owned());
    let preview = room
        .latest_message_content
        .clone()
        .unwrap_or_else(|| "No messages yet".to_owned());
    let unread = room.unread_message_count;
    let title = room.title.clone();

    view! {
        <button
            class="chat-room-row"
            on:click=move |_| navigate(&format!("/chat/{room_id}"), NavigateOptions::default())
        >
            <div class="chat-room-row__avatar">
                <img src=thumbnail alt="room"/>
                <Show when=move || { unread > 0 }>
                    <span class="chat-room-row__badge">{unread}</span>
                </Show>
            </div>
            <div class="chat-room-row__body">
                <h3 class="chat-room-row__title">{title}</h3>
                <p class="chat-room-row__preview">{preview}</p>
            </div>
        </button>
    }
}
