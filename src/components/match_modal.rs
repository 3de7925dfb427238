//! Full-screen modal shown when a like produced a mutual match.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::net::types::MatchResult;

const QUICK_MESSAGES: [&str; 4] = ["hello!", "Nice to meet you!", "Hi", "Oh!"];

/// Match announcement with the counterpart's portfolio, quick-message
/// picks, and a jump into the unlocked chat room. Dismissal discards the
/// match result for good.
#[component]
pub fn MatchModal(result: MatchResult, on_close: Callback<()>) -> impl IntoView {
    let navigate = use_navigate();
    let greeting = RwSignal::new(String::new());

    let chat_room_id = result.chat_room_id;
    let portraits: Vec<String> = result
        .user_portfolios
        .as_deref()
        .unwrap_or_default()
        .iter()
        .filter_map(|p| p.portfolio_images.first().cloned())
        .collect();

    let start_chat = move |_| {
        let Some(room_id) = chat_room_id else {
            return;
        };
        let greet = greeting.get_untracked();
        let target = if greet.is_empty() {
            format!("/chat/{room_id}")
        } else {
            format!("/chat/{room_id}?greet={greet}")
        };
        on_close.run(());
        navigate(&target, NavigateOptions::default());
    };

    view! {
        <div class="match-modal">
            <div class="match-modal__panel">
                <button class="match-modal__close" on:click=move |_| on_close.run(())>
                    "X"
                </button>

                <h2 class="match-modal__title">"Oh! You both like each other"</h2>

                <div class="match-modal__portraits">
                    {portraits
                        .into_iter()
                        .map(|url| {
                            view! { <img class="match-modal__portrait" src=url alt="portfolio"/> }
                        })
                        .collect::<Vec<_>>()}
                </div>

                <div class="match-modal__quick">
                    {QUICK_MESSAGES
                        .into_iter()
                        .map(|msg| {
                            view! {
                                <button
                                    class="match-modal__quick-button"
                                    class:match-modal__quick-button--selected=move || {
                                        greeting.get() == msg
                                    }
                                    on:click=move |_| greeting.set(msg.to_owned())
                                >
                                    {msg}
                                </button>
                            }
                        })
                        .collect::<Vec<_>>()}
                </div>

                <button class="btn btn--primary match-modal__start" on:click=start_chat>
                    "Start Chat"
                </button>
            </div>
        </div>
    }
}
